//! Settings and provider catalog commands

use crate::domain::models::{self, AiProvider, ModelInfo, PluginSettings};
use crate::error::Result;
use crate::ports::settings::SettingsStorePort;
use crate::utils::keychain::KeychainPort;
use crate::AppState;
use serde::Serialize;

/// Load plugin settings through the store port
pub fn load_settings(state: &AppState) -> Result<PluginSettings> {
    state.settings_store.load()
}

/// Persist plugin settings
///
/// Adapters are rebuilt from settings on every operation, so a save is
/// visible to the next command without further wiring.
pub fn save_settings(state: &AppState, settings: &PluginSettings) -> Result<()> {
    for provider in AiProvider::all() {
        let model = settings.model_for(*provider);
        if !model.is_empty() && !models::is_known_model(*provider, model) {
            log::warn!(
                "Unknown {} model '{}' configured; requests may fail",
                provider,
                model
            );
        }
    }

    state.settings_store.save(settings)?;
    log::info!("Settings saved");
    Ok(())
}

/// List all supported AI providers
pub fn list_providers() -> Vec<String> {
    AiProvider::all().iter().map(|p| p.to_string()).collect()
}

/// List the model catalog for a provider
pub fn list_models(provider: AiProvider) -> &'static [ModelInfo] {
    models::models_for(provider)
}

/// API key status with a masked preview
#[derive(Debug, Serialize)]
pub struct ApiKeyStatus {
    pub has_key: bool,
    /// Last 4 characters, e.g. "...c123"
    pub masked_key: Option<String>,
}

/// Report whether a provider has a usable API key without revealing it
pub fn api_key_status(state: &AppState, provider: AiProvider) -> Result<ApiKeyStatus> {
    let settings = state.settings_store.load()?;
    let key = super::resolve_api_key(
        settings.api_key_for(provider),
        state.keychain.as_ref(),
        &provider.to_string(),
    );

    Ok(ApiKeyStatus {
        has_key: !key.is_empty(),
        masked_key: mask_key(&key),
    })
}

/// Save an API key to the OS keychain
pub fn save_api_key(state: &AppState, provider: &str, api_key: &str) -> Result<()> {
    state.keychain.save_api_key(provider, api_key)
}

/// Delete a provider's API key from the OS keychain
pub fn delete_api_key(state: &AppState, provider: &str) -> Result<()> {
    state.keychain.delete_api_key(provider)
}

fn mask_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return None;
    }

    let tail: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    Some(format!("...{}", tail))
}
