/// Settings store port trait
///
/// The host application owns settings persistence; this trait is the seam
/// the core reads and writes through. A fresh load happens at the start of
/// every operation so settings edits are never observed stale.
use crate::domain::models::PluginSettings;
use crate::error::Result;

/// Port trait for settings persistence
pub trait SettingsStorePort: Send + Sync {
    /// Load settings, falling back to defaults where data is missing
    fn load(&self) -> Result<PluginSettings>;

    /// Persist the full settings object
    fn save(&self, settings: &PluginSettings) -> Result<()>;
}
