//! Insight generation command
//!
//! Orchestrates a full generation run: load settings, build the selected
//! provider adapter, generate insights, and insert them into the note text
//! under the messages heading.

use crate::adapters::services::llm;
use crate::domain::models::Insight;
use crate::domain::note;
use crate::error::{AppError, Result};
use crate::ports::llm::{LlmConfig, LlmServicePort};
use crate::ports::notify::NotifierPort;
use crate::ports::settings::SettingsStorePort;
use crate::AppState;
use serde::Serialize;

/// Result of a generation run: the rewritten note plus the new insights
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutcome {
    pub note_text: String,
    pub insights: Vec<Insight>,
}

/// Generate insights for the current note
///
/// A fresh provider adapter is built from freshly loaded settings on every
/// call, so settings edits take effect on the next invocation. Progress and
/// errors surface through the notifier; errors are also returned so the
/// host can react.
pub async fn generate_insights(state: &AppState, note_text: &str) -> Result<GenerateOutcome> {
    if note_text.trim().is_empty() {
        state.notifier.notify("The current note is empty");
        return Err(AppError::InvalidInput(
            "The current note is empty".to_string(),
        ));
    }

    state.notifier.notify("Generating insights...");

    match generate_and_insert(state, note_text).await {
        Ok(outcome) => {
            if outcome.insights.is_empty() {
                state.notifier.notify("No insights generated");
            } else {
                state
                    .notifier
                    .notify(&format!("Generated {} insight(s)", outcome.insights.len()));
            }
            Ok(outcome)
        }
        Err(error) => {
            log::error!("Failed to generate insights: {}", error);
            state.notifier.notify(&format!("Error: {}", error));
            Err(error)
        }
    }
}

async fn generate_and_insert(state: &AppState, note_text: &str) -> Result<GenerateOutcome> {
    let settings = state.settings_store.load()?;
    let provider = settings.ai_provider;

    let api_key = super::resolve_api_key(
        settings.api_key_for(provider),
        state.keychain.as_ref(),
        &provider.to_string(),
    );
    let provider_config = settings.provider_config(api_key);

    let service = llm::service_for(provider_config.provider, provider_config.api_key);
    let config = LlmConfig {
        model: provider_config.model,
        system_prompt: provider_config.system_prompt,
    };

    run_generation(service.as_ref(), &config, note_text).await
}

/// Generation pipeline against any LLM service; split out so tests can
/// drive it with a mock
pub(crate) async fn run_generation(
    service: &dyn LlmServicePort,
    config: &LlmConfig,
    note_text: &str,
) -> Result<GenerateOutcome> {
    log::info!(
        "Generating insights with provider: {}, model: {}",
        service.provider_name(),
        config.model
    );

    let insights = service.generate_insights(note_text, config).await?;

    if insights.is_empty() {
        return Ok(GenerateOutcome {
            note_text: note_text.to_string(),
            insights,
        });
    }

    log::info!("Successfully generated {} insights", insights.len());

    let updated = note::insert_insights(note_text, &insights);
    Ok(GenerateOutcome {
        note_text: updated,
        insights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{AiProvider, PluginSettings};
    use crate::ports::mocks::{MockLlmService, MockNotifier, MockSettingsStore};
    use crate::utils::keychain::MockKeychain;
    use std::sync::Arc;

    fn state_with(settings: PluginSettings, notifier: MockNotifier) -> AppState {
        AppState::new(
            Arc::new(MockSettingsStore::new(settings)),
            Arc::new(MockKeychain::new()),
            Arc::new(notifier),
        )
    }

    fn test_config() -> LlmConfig {
        LlmConfig {
            model: "mock-model".to_string(),
            system_prompt: "extract insights".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_note_is_rejected_with_notice() {
        let notifier = MockNotifier::new();
        let state = state_with(PluginSettings::default(), notifier.clone());

        let result = generate_insights(&state, "   \n").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert_eq!(notifier.messages(), vec!["The current note is empty"]);
    }

    #[tokio::test]
    async fn test_missing_credential_surfaces_config_error() {
        let notifier = MockNotifier::new();
        // Default settings select OpenAI with no key anywhere
        let state = state_with(PluginSettings::default(), notifier.clone());

        let result = generate_insights(&state, "Had a great walk today.").await;
        assert!(matches!(result, Err(AppError::Config(_))));

        let messages = notifier.messages();
        assert_eq!(messages[0], "Generating insights...");
        assert!(messages[1].starts_with("Error: Configuration error:"));
    }

    #[tokio::test]
    async fn test_generation_inserts_under_heading() {
        let service = MockLlmService::returning(vec![Insight::new(
            "Walking clears the mind",
            "Noted after today's walk",
        )]);

        let outcome = run_generation(&service, &test_config(), "Had a great walk today.")
            .await
            .unwrap();

        assert_eq!(outcome.insights.len(), 1);
        assert_eq!(
            outcome.note_text,
            "Had a great walk today.\n\n### Messages from Today\n- Walking clears the mind\n\t- Noted after today's walk"
        );
    }

    #[tokio::test]
    async fn test_empty_generation_leaves_note_untouched() {
        let service = MockLlmService::returning(Vec::new());

        let outcome = run_generation(&service, &test_config(), "quiet day")
            .await
            .unwrap();

        assert_eq!(outcome.note_text, "quiet day");
        assert!(outcome.insights.is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let service = MockLlmService::failing("rate limited");

        let result = run_generation(&service, &test_config(), "note").await;
        assert!(matches!(result, Err(AppError::Provider(_))));
    }

    #[tokio::test]
    async fn test_generated_insights_parse_back_from_note() {
        let _ = env_logger::builder().is_test(true).try_init();

        let service = MockLlmService::returning(vec![
            Insight::new("M1", "D1"),
            Insight::new("M2", "D2"),
        ]);

        let outcome = run_generation(&service, &test_config(), "today's note")
            .await
            .unwrap();

        let parsed = crate::domain::note::parse_insights(&outcome.note_text);
        assert_eq!(parsed, outcome.insights);
    }
}
