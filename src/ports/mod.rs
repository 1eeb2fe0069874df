/// Port trait definitions (interfaces)
///
/// These traits define the contracts for adapters to implement.
/// Following the ports-and-adapters (hexagonal) architecture pattern.
pub mod forwarding;
pub mod llm;
pub mod notify;
pub mod settings;

#[cfg(test)]
pub mod mocks;

pub use forwarding::ForwardingPort;
pub use llm::{LlmConfig, LlmServicePort};
pub use notify::NotifierPort;
pub use settings::SettingsStorePort;
