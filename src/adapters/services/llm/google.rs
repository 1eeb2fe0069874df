//! Google Gemini LLM service adapter
//!
//! Implements the LlmServicePort for Google's generateContent API. The
//! system prompt and note content travel as a single text part; Gemini has
//! no separate system-message slot in this API version.

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

const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini service implementation
pub struct GoogleService {
    client: Client,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

impl GoogleService {
    /// Create a new Google Gemini service with the given API key
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, api_key }
    }

    fn build_request(config: &LlmConfig, content: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompts::merged_prompt(&config.system_prompt, content),
                }],
            }],
            generation_config: GenerationConfig { temperature: 0.7 },
        }
    }

    /// Model path as the API expects it (e.g. "models/gemini-2.0-flash")
    fn model_path(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        }
    }

    async fn request_content(
        &self,
        model: &str,
        request_body: &GenerateContentRequest,
    ) -> Result<String> {
        let model_path = Self::model_path(model);
        log::info!("Calling Google generateContent with model: {}", model_path);

        let response = self
            .client
            .post(format!(
                "{}/{}:generateContent",
                GOOGLE_API_BASE, model_path
            ))
            .query(&[("key", &self.api_key)])
            .header("Content-Type", "application/json")
            .json(request_body)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("GenerateContent request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::Auth(
                "Gemini API key is invalid. Please check your API key in settings.".to_string(),
            ));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Gemini API error: {}",
                remote_error_message(status, &error_text)
            )));
        }

        let content_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to parse content response: {}", e)))?;

        let text = content_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text);

        text.ok_or_else(|| AppError::Provider("No content parts in response".to_string()))
    }
}

#[async_trait]
impl LlmServicePort for GoogleService {
    async fn generate_insights(&self, content: &str, config: &LlmConfig) -> Result<Vec<Insight>> {
        if self.api_key.is_empty() {
            return Err(AppError::Config(
                "Gemini API key is not configured. Please add your API key in settings."
                    .to_string(),
            ));
        }

        let request_body = Self::build_request(config, content);
        let raw = self.request_content(&config.model, &request_body).await?;

        log::info!(
            "Google completion successful, generated {} characters",
            raw.len()
        );

        parse_insight_response(&raw)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
