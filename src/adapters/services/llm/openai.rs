//! OpenAI LLM service adapter
//!
//! Implements the LlmServicePort for OpenAI's chat completion API.
//! Reasoning models (o1/o3/o4 prefixes) do not accept a system message or a
//! free temperature: the prompt is merged into the user message and the
//! temperature is pinned to 1.

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

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Model id prefixes that select the reasoning request shape
const REASONING_MODEL_PREFIXES: &[&str] = &["o1", "o3", "o4"];

/// OpenAI service implementation
pub struct OpenAiService {
    client: Client,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAiService {
    /// Create a new OpenAI service with the given API key
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, api_key }
    }

    fn is_reasoning_model(model: &str) -> bool {
        REASONING_MODEL_PREFIXES
            .iter()
            .any(|prefix| model.starts_with(prefix))
    }

    fn build_request(config: &LlmConfig, content: &str) -> ChatCompletionRequest {
        if Self::is_reasoning_model(&config.model) {
            ChatCompletionRequest {
                model: config.model.clone(),
                messages: vec![ChatMessage {
                    role: "user".to_string(),
                    content: prompts::merged_prompt(&config.system_prompt, content),
                }],
                temperature: 1.0,
            }
        } else {
            ChatCompletionRequest {
                model: config.model.clone(),
                messages: vec![
                    ChatMessage {
                        role: "system".to_string(),
                        content: config.system_prompt.clone(),
                    },
                    ChatMessage {
                        role: "user".to_string(),
                        content: prompts::note_user_message(content),
                    },
                ],
                temperature: 0.7,
            }
        }
    }

    async fn request_completion(&self, request_body: &ChatCompletionRequest) -> Result<String> {
        log::info!(
            "Calling OpenAI chat completion with model: {}",
            request_body.model
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", OPENAI_API_BASE))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request_body)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Chat completion request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::Auth(
                "OpenAI API key is invalid. Please check your API key in settings.".to_string(),
            ));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "OpenAI API error: {}",
                remote_error_message(status, &error_text)
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::Provider(format!("Failed to parse completion response: {}", e))
        })?;

        let Some(choice) = completion.choices.into_iter().next() else {
            return Err(AppError::Provider(
                "No completion choices returned".to_string(),
            ));
        };

        Ok(choice.message.content)
    }
}

#[async_trait]
impl LlmServicePort for OpenAiService {
    async fn generate_insights(&self, content: &str, config: &LlmConfig) -> Result<Vec<Insight>> {
        if self.api_key.is_empty() {
            return Err(AppError::Config(
                "OpenAI API key is not configured. Please add your API key in settings."
                    .to_string(),
            ));
        }

        let request_body = Self::build_request(config, content);
        let raw = self.request_completion(&request_body).await?;

        log::info!(
            "OpenAI completion successful, generated {} characters",
            raw.len()
        );

        parse_insight_response(&raw)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
