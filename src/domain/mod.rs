/// Domain layer - core business logic
///
/// These modules are host-agnostic: models, prompt templates, response
/// parsing, and note text manipulation.
pub mod models;
pub mod note;
pub mod parser;
pub mod prompts;

pub use models::{
    AiProvider, ForwardingConfig, Insight, ModelInfo, PluginSettings, PricingTier, ProviderConfig,
};
pub use note::MESSAGES_HEADER;
pub use parser::parse_insight_response;
