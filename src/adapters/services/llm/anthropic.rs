//! Anthropic LLM service adapter
//!
//! Implements the LlmServicePort for Anthropic's messages API. The system
//! prompt rides in the top-level `system` field and the note content is the
//! sole user message.

use crate::adapters::services::remote_error_message;
use crate::domain::models::Insight;
use crate::domain::parser::parse_insight_response;
use crate::domain::prompts;
use crate::error::{AppError, Result};
use crate::ports::llm::{LlmConfig, LlmServicePort};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Output ceiling for insight generation; three bullet insights fit well
/// within this
const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Anthropic service implementation
pub struct AnthropicService {
    client: Client,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

impl AnthropicService {
    /// Create a new Anthropic service with the given API key
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, api_key }
    }

    fn build_request(config: &LlmConfig, content: &str) -> MessagesRequest {
        MessagesRequest {
            model: config.model.clone(),
            max_tokens: MAX_OUTPUT_TOKENS,
            system: config.system_prompt.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompts::note_user_message(content),
            }],
        }
    }

    async fn request_message(&self, request_body: &MessagesRequest) -> Result<String> {
        log::info!(
            "Calling Anthropic messages API with model: {}",
            request_body.model
        );

        let response = self
            .client
            .post(format!("{}/messages", ANTHROPIC_API_BASE))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(request_body)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Messages request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::Auth(
                "Claude API key is invalid. Please check your API key in settings.".to_string(),
            ));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Claude API error: {}",
                remote_error_message(status, &error_text)
            )));
        }

        let messages_response: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to parse messages response: {}", e)))?;

        let Some(block) = messages_response.content.into_iter().next() else {
            return Err(AppError::Provider(
                "No content blocks returned".to_string(),
            ));
        };

        Ok(block.text)
    }
}

#[async_trait]
impl LlmServicePort for AnthropicService {
    async fn generate_insights(&self, content: &str, config: &LlmConfig) -> Result<Vec<Insight>> {
        if self.api_key.is_empty() {
            return Err(AppError::Config(
                "Claude API key is not configured. Please add your API key in settings."
                    .to_string(),
            ));
        }

        let request_body = Self::build_request(config, content);
        let raw = self.request_message(&request_body).await?;

        log::info!(
            "Anthropic completion successful, generated {} characters",
            raw.len()
        );

        parse_insight_response(&raw)
    }

    fn provider_name(&self) -> &str {
        "claude"
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LlmConfig {
        LlmConfig {
            model: "claude-3-5-sonnet-20241022".to_string(),
            system_prompt: "extract insights".to_string(),
        }
    }

    #[test]
    fn test_anthropic_service_creation() {
        let service = AnthropicService::new("test_api_key".to_string());
        assert_eq!(service.provider_name(), "claude");
        assert!(service.is_configured());
    }

    #[test]
    fn test_anthropic_service_not_configured() {
        let service = AnthropicService::new("".to_string());
        assert!(!service.is_configured());
    }

    #[test]
    fn test_request_shape() {
        let request = AnthropicService::build_request(&config(), "walked today");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "claude-3-5-sonnet-20241022");
        assert_eq!(value["max_tokens"], 2048);
        assert_eq!(value["system"], "extract insights");
        let messages = value["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(
            messages[0]["content"],
            "Daily Note Content:\nwalked today"
        );
    }

    #[test]
    fn test_missing_key_fails_before_any_request() {
        let service = AnthropicService::new("".to_string());
        let result = tokio_test::block_on(service.generate_insights("note", &config()));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_response_text_extraction() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"id":"msg_1","type":"message","role":"assistant",
                "content":[{"type":"text","text":"{\"insights\":[]}"}],
                "model":"claude-3-5-sonnet-20241022","stop_reason":"end_turn",
                "usage":{"input_tokens":10,"output_tokens":5}}"#,
        )
        .unwrap();
        assert_eq!(response.content[0].text, r#"{"insights":[]}"#);
    }
}
