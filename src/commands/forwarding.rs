//! Airtable forwarding commands
//!
//! Sends a single selected insight or a batch of insights to Airtable.
//! Batch sends are sequential and per-item failures do not cancel the rest;
//! the tally is reported once at the end.

use crate::adapters::services::airtable::AirtableService;
use crate::domain::models::Insight;
use crate::domain::note;
use crate::error::{AppError, Result};
use crate::ports::forwarding::ForwardingPort;
use crate::ports::notify::NotifierPort;
use crate::ports::settings::SettingsStorePort;
use crate::AppState;
use serde::Serialize;

/// Tally of a batch forwarding run
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ForwardReport {
    pub sent: usize,
    pub failed: usize,
}

/// Forward the insight selected in the editor
pub async fn send_selection(state: &AppState, selection: &str) -> Result<()> {
    if selection.trim().is_empty() {
        state
            .notifier
            .notify("Please select a message and its description");
        return Err(AppError::InvalidInput("Selection is empty".to_string()));
    }

    let Some(insight) = note::parse_selection(selection) else {
        state.notifier.notify(
            "Could not parse the selected message. Please select a message line and its description.",
        );
        return Err(AppError::InvalidInput(
            "Selection does not contain a message".to_string(),
        ));
    };

    state.notifier.notify("Sending to Airtable...");

    let forwarder = match build_forwarder(state) {
        Ok(forwarder) => forwarder,
        Err(error) => {
            state.notifier.notify(&format!("Error: {}", error));
            return Err(error);
        }
    };

    match forwarder.send_insight(&insight).await {
        Ok(()) => {
            state.notifier.notify("Message sent to Airtable successfully!");
            Ok(())
        }
        Err(error) => {
            log::error!("Failed to send to Airtable: {}", error);
            state.notifier.notify(&format!("Error: {}", error));
            Err(error)
        }
    }
}

/// Forward a batch of insights sequentially
///
/// Each insight is an independent send; failures are tallied, not
/// propagated, and the remaining items still go out.
pub async fn send_insights(state: &AppState, insights: &[Insight]) -> Result<ForwardReport> {
    let forwarder = match build_forwarder(state) {
        Ok(forwarder) => forwarder,
        Err(error) => {
            state.notifier.notify(&format!("Error: {}", error));
            return Err(error);
        }
    };

    let report = forward_batch(&forwarder, insights).await;

    if report.failed == 0 {
        state
            .notifier
            .notify(&format!("Sent {} message(s) to Airtable", report.sent));
    } else {
        state.notifier.notify(&format!(
            "Sent {} message(s) to Airtable, {} failed",
            report.sent, report.failed
        ));
    }

    Ok(report)
}

/// Sequential batch send against any forwarder; split out so tests can
/// drive it with a mock
pub(crate) async fn forward_batch(
    forwarder: &dyn ForwardingPort,
    insights: &[Insight],
) -> ForwardReport {
    let mut report = ForwardReport::default();

    for insight in insights {
        match forwarder.send_insight(insight).await {
            Ok(()) => report.sent += 1,
            Err(error) => {
                log::error!("Failed to forward '{}': {}", insight.message, error);
                report.failed += 1;
            }
        }
    }

    report
}

fn build_forwarder(state: &AppState) -> Result<AirtableService> {
    let settings = state.settings_store.load()?;
    let api_key = super::resolve_api_key(
        &settings.airtable_api_key,
        state.keychain.as_ref(),
        "airtable",
    );

    Ok(AirtableService::new(settings.forwarding_config(api_key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::PluginSettings;
    use crate::ports::mocks::{MockForwarder, MockNotifier, MockSettingsStore};
    use crate::utils::keychain::MockKeychain;
    use std::sync::Arc;

    fn state_with(notifier: MockNotifier) -> AppState {
        AppState::new(
            Arc::new(MockSettingsStore::new(PluginSettings::default())),
            Arc::new(MockKeychain::new()),
            Arc::new(notifier),
        )
    }

    #[tokio::test]
    async fn test_empty_selection_is_rejected_with_notice() {
        let notifier = MockNotifier::new();
        let state = state_with(notifier.clone());

        let result = send_selection(&state, "  \n ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert_eq!(
            notifier.messages(),
            vec!["Please select a message and its description"]
        );
    }

    #[tokio::test]
    async fn test_unconfigured_destination_surfaces_config_error() {
        let notifier = MockNotifier::new();
        let state = state_with(notifier.clone());

        // Default settings have no Airtable credentials
        let result = send_selection(&state, "- M1\n\t- D1").await;
        assert!(matches!(result, Err(AppError::Config(_))));

        let messages = notifier.messages();
        assert!(messages
            .last()
            .unwrap()
            .starts_with("Error: Configuration error:"));
    }

    #[tokio::test]
    async fn test_batch_continues_past_failures() {
        let forwarder = MockForwarder::failing_for(&["M2"]);
        let insights = vec![
            Insight::new("M1", "D1"),
            Insight::new("M2", "D2"),
            Insight::new("M3", "D3"),
        ];

        let report = forward_batch(&forwarder, &insights).await;

        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 1);
        // The failure in the middle did not cancel the final send
        assert_eq!(
            forwarder.sent(),
            vec![Insight::new("M1", "D1"), Insight::new("M3", "D3")]
        );
    }

    #[tokio::test]
    async fn test_batch_of_unconfigured_sends_tallies_all_failures() {
        let notifier = MockNotifier::new();
        let state = state_with(notifier.clone());
        let insights = vec![Insight::new("M1", "D1"), Insight::new("M2", "D2")];

        // Destination is unconfigured: every item fails, none abort the run
        let report = send_insights(&state, &insights).await.unwrap();

        assert_eq!(report.sent, 0);
        assert_eq!(report.failed, 2);
        assert_eq!(
            notifier.messages(),
            vec!["Sent 0 message(s) to Airtable, 2 failed"]
        );
    }
}
