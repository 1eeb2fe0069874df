/// LLM service port trait
///
/// Defines the interface for insight-generating model providers.
/// Implementations: OpenAI, Gemini, Claude.
use crate::domain::models::Insight;
use crate::error::Result;
use async_trait::async_trait;

/// Configuration for a single generation request
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model name (e.g. "gpt-4o-mini", "claude-3-5-sonnet-20241022")
    pub model: String,

    /// System prompt describing the insight-extraction task
    pub system_prompt: String,
}

/// Port trait for LLM services
#[async_trait]
pub trait LlmServicePort: Send + Sync {
    /// Generate up to three insights from the note content
    async fn generate_insights(&self, content: &str, config: &LlmConfig) -> Result<Vec<Insight>>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is configured (has API key)
    fn is_configured(&self) -> bool;
}
