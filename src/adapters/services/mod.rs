//! External service adapters
//!
//! This module contains adapters for external APIs:
//! - LLM (Large Language Model) providers
//! - Airtable row insertion

pub mod airtable;
pub mod llm;

use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RemoteError {
    error: RemoteErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemoteErrorBody {
    Structured { message: String },
    Plain(String),
}

/// Pull the human-readable message out of a JSON error payload
///
/// Falls back to the raw body, or the HTTP status when the body is empty.
pub(crate) fn remote_error_message(status: StatusCode, body: &str) -> String {
    let message = match serde_json::from_str::<RemoteError>(body) {
        Ok(RemoteError {
            error: RemoteErrorBody::Structured { message },
        }) => message,
        Ok(RemoteError {
            error: RemoteErrorBody::Plain(message),
        }) => message,
        Err(_) => body.trim().to_string(),
    };

    if message.is_empty() {
        format!("HTTP {}", status)
    } else {
        message
    }
}
