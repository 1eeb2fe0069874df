//! JSON-file settings store
//!
//! Persists PluginSettings as pretty-printed JSON at a host-supplied path.
//! A missing file yields defaults, and fields absent from an older file
//! fall back individually, so upgrades never lose user configuration.

use crate::domain::models::PluginSettings;
use crate::error::Result;
use crate::ports::settings::SettingsStorePort;
use std::fs;
use std::path::PathBuf;

/// Settings store backed by a single JSON file
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    /// Create a store reading and writing the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsStorePort for JsonSettingsStore {
    fn load(&self) -> Result<PluginSettings> {
        if !self.path.exists() {
            return Ok(PluginSettings::default());
        }

        let data = fs::read_to_string(&self.path)?;
        let settings = serde_json::from_str(&data)?;
        Ok(settings)
    }

    fn save(&self, settings: &PluginSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, data)?;

        log::info!("Settings written to {}", self.path.display());
        Ok(())
    }
}
