//! Secure API key storage using OS keychain
//!
//! This module provides secure storage for API keys using:
//! - Windows: Windows Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KWallet)
//! - macOS: macOS Keychain
//!
//! Keys stored here back up the settings file: an explicit key in settings
//! wins, the keychain is consulted when the settings field is blank.

use crate::error::{AppError, Result};
use keyring::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Keychain service name for Daily Insights
const SERVICE_NAME: &str = "com.srprasanna.daily-insights";

/// Trait for keychain operations - allows for mocking in tests
pub trait KeychainPort: Send + Sync {
    fn save_api_key(&self, provider: &str, api_key: &str) -> Result<()>;
    fn get_api_key(&self, provider: &str) -> Result<String>;
    fn delete_api_key(&self, provider: &str) -> Result<()>;
    fn has_api_key(&self, provider: &str) -> bool;
}

/// Keychain manager for secure API key storage using OS keychain
pub struct KeychainManager;

impl KeychainPort for KeychainManager {
    fn save_api_key(&self, provider: &str, api_key: &str) -> Result<()> {
        let entry =
            Entry::new(SERVICE_NAME, provider).map_err(|e| AppError::Keychain(e.to_string()))?;

        entry
            .set_password(api_key)
            .map_err(|e| AppError::Keychain(format!("Failed to save API key: {}", e)))?;

        log::info!("API key saved for {}", provider);
        Ok(())
    }

    fn get_api_key(&self, provider: &str) -> Result<String> {
        let entry =
            Entry::new(SERVICE_NAME, provider).map_err(|e| AppError::Keychain(e.to_string()))?;

        entry
            .get_password()
            .map_err(|e| AppError::Keychain(format!("Failed to retrieve API key: {}", e)))
    }

    fn delete_api_key(&self, provider: &str) -> Result<()> {
        let entry =
            Entry::new(SERVICE_NAME, provider).map_err(|e| AppError::Keychain(e.to_string()))?;

        entry
            .delete_password()
            .map_err(|e| AppError::Keychain(format!("Failed to delete API key: {}", e)))?;

        log::info!("API key deleted for {}", provider);
        Ok(())
    }

    fn has_api_key(&self, provider: &str) -> bool {
        self.get_api_key(provider).is_ok()
    }
}

impl KeychainManager {
    /// Creates a new KeychainManager instance
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeychainManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock keychain implementation for testing (in-memory storage)
#[derive(Clone, Default)]
pub struct MockKeychain {
    storage: Arc<Mutex<HashMap<String, String>>>,
}

impl MockKeychain {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl KeychainPort for MockKeychain {
    fn save_api_key(&self, provider: &str, api_key: &str) -> Result<()> {
        self.storage
            .lock()
            .unwrap()
            .insert(provider.to_string(), api_key.to_string());
        Ok(())
    }

    fn get_api_key(&self, provider: &str) -> Result<String> {
        self.storage
            .lock()
            .unwrap()
            .get(provider)
            .cloned()
            .ok_or_else(|| AppError::Keychain(format!("API key not found for {}", provider)))
    }

    fn delete_api_key(&self, provider: &str) -> Result<()> {
        self.storage.lock().unwrap().remove(provider);
        Ok(())
    }

    fn has_api_key(&self, provider: &str) -> bool {
        self.storage.lock().unwrap().contains_key(provider)
    }
}
