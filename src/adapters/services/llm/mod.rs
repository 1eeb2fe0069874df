//! LLM service adapters
//!
//! Implementations of the LlmServicePort trait, one per provider:
//! - OpenAI (chat completions)
//! - Google (Gemini generateContent)
//! - Anthropic (Claude messages)

pub mod anthropic;
pub mod google;
pub mod openai;

pub use anthropic::AnthropicService;
pub use google::GoogleService;
pub use openai::OpenAiService;

use crate::domain::models::AiProvider;
use crate::ports::llm::LlmServicePort;

/// Build the adapter for the selected provider
///
/// The provider set is closed; dispatch happens here so callers only deal
/// with the port trait.
pub fn service_for(provider: AiProvider, api_key: String) -> Box<dyn LlmServicePort> {
    match provider {
        AiProvider::OpenAi => Box::new(OpenAiService::new(api_key)),
        AiProvider::Gemini => Box::new(GoogleService::new(api_key)),
        AiProvider::Claude => Box::new(AnthropicService::new(api_key)),
    }
}
