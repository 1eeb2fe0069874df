/// Notification port trait
///
/// User-visible notices (progress, results, errors) are rendered by the
/// host; the core only emits them through this seam.
pub trait NotifierPort: Send + Sync {
    /// Show a transient notice to the user
    fn notify(&self, message: &str);
}
