//! Airtable forwarding adapter
//!
//! Implements the ForwardingPort by inserting one row per insight into a
//! configured Airtable base and table. Column names for the message and
//! description come from settings so users can match an existing table.

use crate::adapters::services::remote_error_message;
use crate::domain::models::{ForwardingConfig, Insight};
use crate::error::{AppError, Result};
use crate::ports::forwarding::ForwardingPort;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;

const AIRTABLE_API_BASE: &str = "https://api.airtable.com/v0";

/// Column used for the message when none is configured
const DEFAULT_MESSAGE_FIELD: &str = "Message";

/// Airtable service implementation
pub struct AirtableService {
    client: Client,
    config: ForwardingConfig,
}

#[derive(Debug, Serialize)]
struct CreateRecordsRequest {
    records: Vec<Record>,
}

#[derive(Debug, Serialize)]
struct Record {
    fields: Map<String, Value>,
}

impl AirtableService {
    /// Create a new Airtable service for the given destination
    pub fn new(config: ForwardingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn check_configured(&self) -> Result<()> {
        if self.config.api_key.is_empty() {
            return Err(AppError::Config(
                "Airtable API key is not configured".to_string(),
            ));
        }
        if self.config.base_id.is_empty() {
            return Err(AppError::Config(
                "Airtable Base ID is not configured".to_string(),
            ));
        }
        if self.config.table_name.is_empty() {
            return Err(AppError::Config(
                "Airtable Table name is not configured".to_string(),
            ));
        }
        Ok(())
    }

    /// Record-creation endpoint; the table name is percent-encoded
    fn record_url(&self) -> Url {
        let mut url = Url::parse(AIRTABLE_API_BASE).expect("valid Airtable base URL");
        url.path_segments_mut()
            .expect("base URL has a path")
            .push(&self.config.base_id)
            .push(&self.config.table_name);
        url
    }

    /// Map an insight onto the configured columns
    ///
    /// The description column is filled only when a column name is
    /// configured and the description is non-empty; an empty value is
    /// omitted rather than sent.
    fn build_fields(config: &ForwardingConfig, insight: &Insight) -> Map<String, Value> {
        let mut fields = Map::new();

        let message_field = if config.message_field.is_empty() {
            DEFAULT_MESSAGE_FIELD
        } else {
            &config.message_field
        };
        fields.insert(
            message_field.to_string(),
            Value::String(insight.message.clone()),
        );

        if !config.description_field.is_empty() && !insight.description.is_empty() {
            fields.insert(
                config.description_field.clone(),
                Value::String(insight.description.clone()),
            );
        }

        fields
    }
}

#[async_trait]
impl ForwardingPort for AirtableService {
    async fn send_insight(&self, insight: &Insight) -> Result<()> {
        self.check_configured()?;

        let fields = Self::build_fields(&self.config, insight);
        let attempted_fields = fields
            .keys()
            .map(|name| format!("'{}'", name))
            .collect::<Vec<_>>()
            .join(", ");

        let request_body = CreateRecordsRequest {
            records: vec![Record { fields }],
        };

        log::info!(
            "Sending insight to Airtable table '{}'",
            self.config.table_name
        );

        let response = self
            .client
            .post(self.record_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Forwarding(format!("Airtable request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::Auth(
                "Airtable API key is invalid. Please check your API key in settings.".to_string(),
            ));
        }
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Forwarding(format!(
                "Airtable rejected the record; check that the fields {} exist in table '{}': {}",
                attempted_fields,
                self.config.table_name,
                remote_error_message(status, &error_text)
            )));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Forwarding(format!(
                "Airtable API error: {}",
                remote_error_message(status, &error_text)
            )));
        }

        log::info!("Insight forwarded to Airtable");
        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.check_configured().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> ForwardingConfig {
        ForwardingConfig {
            api_key: "key".to_string(),
            base_id: "appBase123".to_string(),
            table_name: "Messages".to_string(),
            message_field: "Message".to_string(),
            description_field: "Description".to_string(),
        }
    }

    fn insight() -> Insight {
        Insight::new("M1", "D1")
    }

    #[test]
    fn test_missing_api_key_fails_before_any_request() {
        let mut config = full_config();
        config.api_key.clear();
        let service = AirtableService::new(config);

        let result = tokio_test::block_on(service.send_insight(&insight()));
        assert!(matches!(result, Err(AppError::Config(_))));
        assert!(!service.is_configured());
    }

    #[test]
    fn test_missing_base_id_fails_before_any_request() {
        let mut config = full_config();
        config.base_id.clear();
        let service = AirtableService::new(config);

        let result = tokio_test::block_on(service.send_insight(&insight()));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_missing_table_name_fails_before_any_request() {
        let mut config = full_config();
        config.table_name.clear();
        let service = AirtableService::new(config);

        let result = tokio_test::block_on(service.send_insight(&insight()));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_fields_include_message_and_description() {
        let fields = AirtableService::build_fields(&full_config(), &insight());
        assert_eq!(fields.get("Message"), Some(&Value::String("M1".into())));
        assert_eq!(fields.get("Description"), Some(&Value::String("D1".into())));
    }

    #[test]
    fn test_description_omitted_when_field_unconfigured() {
        let mut config = full_config();
        config.description_field.clear();

        let fields = AirtableService::build_fields(&config, &insight());
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("Message"));
    }

    #[test]
    fn test_description_omitted_when_empty() {
        let fields = AirtableService::build_fields(&full_config(), &Insight::new("M1", ""));
        assert_eq!(fields.len(), 1);
        assert!(!fields.contains_key("Description"));
    }

    #[test]
    fn test_blank_message_field_falls_back_to_default() {
        let mut config = full_config();
        config.message_field.clear();

        let fields = AirtableService::build_fields(&config, &insight());
        assert_eq!(fields.get("Message"), Some(&Value::String("M1".into())));
    }

    #[test]
    fn test_record_url_encodes_table_name() {
        let mut config = full_config();
        config.table_name = "My Table".to_string();
        let service = AirtableService::new(config);

        assert_eq!(
            service.record_url().as_str(),
            "https://api.airtable.com/v0/appBase123/My%20Table"
        );
    }
}
