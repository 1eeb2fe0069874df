/// Host-facing command modules
pub mod forwarding;
pub mod insights;
pub mod settings;

use crate::utils::keychain::KeychainPort;

/// Resolve the API key for a provider
///
/// An explicit key in settings wins; the OS keychain is consulted when the
/// settings field is blank. An empty result means unconfigured, which the
/// adapters report before any network call.
pub(crate) fn resolve_api_key(explicit: &str, keychain: &dyn KeychainPort, provider: &str) -> String {
    if !explicit.is_empty() {
        return explicit.to_string();
    }

    keychain.get_api_key(provider).unwrap_or_default()
}
