/// Domain models for Daily Insights
///
/// These models represent core business entities and are host-agnostic.
use serde::{Deserialize, Serialize};

use crate::domain::prompts;

/// Represents an AI provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    OpenAi,
    Gemini,
    Claude,
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiProvider::OpenAi => write!(f, "openai"),
            AiProvider::Gemini => write!(f, "gemini"),
            AiProvider::Claude => write!(f, "claude"),
        }
    }
}

impl AiProvider {
    /// All supported providers, in settings-UI order
    pub fn all() -> &'static [AiProvider] {
        &[AiProvider::OpenAi, AiProvider::Gemini, AiProvider::Claude]
    }
}

/// An insight message extracted from a daily note
///
/// Immutable once created; two insights are equal when their fields are.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insight {
    pub message: String,
    #[serde(default)]
    pub description: String,
}

impl Insight {
    /// Creates a new insight
    pub fn new(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            description: description.into(),
        }
    }
}

/// Cost per million tokens in USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingTier {
    pub input: f64,
    pub output: f64,
}

/// A known model for a provider, with its pricing tier
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub pricing: PricingTier,
}

const fn model(id: &'static str, input: f64, output: f64) -> ModelInfo {
    ModelInfo {
        id,
        pricing: PricingTier { input, output },
    }
}

/// OpenAI chat models selectable in settings
pub const OPENAI_MODELS: &[ModelInfo] = &[
    model("gpt-4o", 2.5, 10.0),
    model("gpt-4o-mini", 0.15, 0.6),
    model("gpt-4-turbo", 10.0, 30.0),
    model("gpt-4", 30.0, 60.0),
    model("gpt-3.5-turbo", 0.5, 1.5),
    model("o1", 15.0, 60.0),
    model("o1-mini", 3.0, 12.0),
    model("o1-preview", 15.0, 60.0),
];

/// Google Gemini models selectable in settings
pub const GEMINI_MODELS: &[ModelInfo] = &[
    model("gemini-1.5-flash", 0.075, 0.3),
    model("gemini-1.5-pro", 1.25, 5.0),
    model("gemini-2.0-flash", 0.1, 0.4),
];

/// Anthropic Claude models selectable in settings
pub const CLAUDE_MODELS: &[ModelInfo] = &[
    model("claude-3-5-sonnet-20241022", 3.0, 15.0),
    model("claude-3-opus-20240229", 15.0, 75.0),
    model("claude-3-haiku-20240307", 0.25, 1.25),
];

/// Get the model catalog for a provider
pub fn models_for(provider: AiProvider) -> &'static [ModelInfo] {
    match provider {
        AiProvider::OpenAi => OPENAI_MODELS,
        AiProvider::Gemini => GEMINI_MODELS,
        AiProvider::Claude => CLAUDE_MODELS,
    }
}

/// Check whether a model identifier belongs to a provider's catalog
pub fn is_known_model(provider: AiProvider, model_id: &str) -> bool {
    models_for(provider).iter().any(|m| m.id == model_id)
}

/// Per-provider generation configuration for a single request
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: AiProvider,
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
}

/// Configuration for forwarding an insight to Airtable
#[derive(Debug, Clone)]
pub struct ForwardingConfig {
    pub api_key: String,
    pub base_id: String,
    pub table_name: String,
    /// Column receiving the insight message; falls back to "Message" when blank
    pub message_field: String,
    /// Column receiving the description; blank means not configured
    pub description_field: String,
}

/// Persisted plugin settings
///
/// Serialized camelCase to stay compatible with the settings file format
/// the host persists. Unknown or missing fields fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginSettings {
    pub ai_provider: AiProvider,

    pub openai_api_key: String,
    pub openai_model: String,

    pub gemini_api_key: String,
    pub gemini_model: String,

    pub claude_api_key: String,
    pub claude_model: String,

    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub airtable_table_name: String,
    pub airtable_message_field: String,
    pub airtable_description_field: String,

    pub system_prompt: String,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            ai_provider: AiProvider::OpenAi,

            openai_api_key: String::new(),
            openai_model: "gpt-4o-mini".to_string(),

            gemini_api_key: String::new(),
            gemini_model: "gemini-2.0-flash".to_string(),

            claude_api_key: String::new(),
            claude_model: "claude-3-5-sonnet-20241022".to_string(),

            airtable_api_key: String::new(),
            airtable_base_id: String::new(),
            airtable_table_name: "Messages".to_string(),
            airtable_message_field: "Message".to_string(),
            airtable_description_field: "Description".to_string(),

            system_prompt: prompts::DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl PluginSettings {
    /// API key stored in settings for the given provider, may be empty
    pub fn api_key_for(&self, provider: AiProvider) -> &str {
        match provider {
            AiProvider::OpenAi => &self.openai_api_key,
            AiProvider::Gemini => &self.gemini_api_key,
            AiProvider::Claude => &self.claude_api_key,
        }
    }

    /// Model identifier configured for the given provider
    pub fn model_for(&self, provider: AiProvider) -> &str {
        match provider {
            AiProvider::OpenAi => &self.openai_model,
            AiProvider::Gemini => &self.gemini_model,
            AiProvider::Claude => &self.claude_model,
        }
    }

    /// Provider configuration view for the currently selected provider
    pub fn provider_config(&self, api_key: String) -> ProviderConfig {
        ProviderConfig {
            provider: self.ai_provider,
            api_key,
            model: self.model_for(self.ai_provider).to_string(),
            system_prompt: self.system_prompt.clone(),
        }
    }

    /// Forwarding configuration view
    pub fn forwarding_config(&self, api_key: String) -> ForwardingConfig {
        ForwardingConfig {
            api_key,
            base_id: self.airtable_base_id.clone(),
            table_name: self.airtable_table_name.clone(),
            message_field: self.airtable_message_field.clone(),
            description_field: self.airtable_description_field.clone(),
        }
    }
}
