//! Daily Insights plugin core
//!
//! Extracts up to three insight messages from a daily note using the
//! configured LLM provider (OpenAI, Gemini, or Claude), inserts them into
//! the note under a fixed markdown heading, and optionally forwards
//! selected insights to Airtable. Host integrations (file access, settings
//! UI, notifications) connect through the port traits in [`ports`].

pub mod adapters;
pub mod commands;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use adapters::notify::LogNotifier;
use adapters::settings::JsonSettingsStore;
use ports::notify::NotifierPort;
use ports::settings::SettingsStorePort;
use utils::keychain::{KeychainManager, KeychainPort};

/// Shared state handed to every command
///
/// Holds the injected collaborators; provider and forwarding adapters are
/// not kept here because they are rebuilt from settings on every call.
pub struct AppState {
    pub settings_store: Arc<dyn SettingsStorePort>,
    pub keychain: Arc<dyn KeychainPort>,
    pub notifier: Arc<dyn NotifierPort>,
}

impl AppState {
    /// Create state with explicit collaborators (hosts inject their own)
    pub fn new(
        settings_store: Arc<dyn SettingsStorePort>,
        keychain: Arc<dyn KeychainPort>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        Self {
            settings_store,
            keychain,
            notifier,
        }
    }

    /// Create state with the built-in adapters: JSON settings file, OS
    /// keychain, log-backed notifier
    pub fn with_defaults(settings_path: impl Into<PathBuf>) -> Self {
        Self::new(
            Arc::new(JsonSettingsStore::new(settings_path)),
            Arc::new(KeychainManager::new()),
            Arc::new(LogNotifier),
        )
    }
}
