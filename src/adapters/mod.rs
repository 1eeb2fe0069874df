/// Adapters - implementations of the port traits
///
/// External service clients plus the built-in settings store and notifier.
pub mod notify;
pub mod services;
pub mod settings;
