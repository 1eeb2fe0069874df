//! Mock implementations for testing

use crate::domain::models::{Insight, PluginSettings};
use crate::error::{AppError, Result};
use crate::ports::forwarding::ForwardingPort;
use crate::ports::llm::{LlmConfig, LlmServicePort};
use crate::ports::notify::NotifierPort;
use crate::ports::settings::SettingsStorePort;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Mock settings store backed by memory
#[derive(Clone, Default)]
pub struct MockSettingsStore {
    settings: Arc<Mutex<PluginSettings>>,
}

impl MockSettingsStore {
    pub fn new(settings: PluginSettings) -> Self {
        Self {
            settings: Arc::new(Mutex::new(settings)),
        }
    }
}

impl SettingsStorePort for MockSettingsStore {
    fn load(&self) -> Result<PluginSettings> {
        Ok(self.settings.lock().unwrap().clone())
    }

    fn save(&self, settings: &PluginSettings) -> Result<()> {
        *self.settings.lock().unwrap() = settings.clone();
        Ok(())
    }
}

/// Mock notifier recording every notice
#[derive(Clone, Default)]
pub struct MockNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl NotifierPort for MockNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Mock LLM service returning a canned insight list (or a canned failure)
#[derive(Clone, Default)]
pub struct MockLlmService {
    pub insights: Vec<Insight>,
    pub fail_with: Option<String>,
}

impl MockLlmService {
    pub fn returning(insights: Vec<Insight>) -> Self {
        Self {
            insights,
            fail_with: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            insights: Vec::new(),
            fail_with: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl LlmServicePort for MockLlmService {
    async fn generate_insights(&self, _content: &str, _config: &LlmConfig) -> Result<Vec<Insight>> {
        match &self.fail_with {
            Some(message) => Err(AppError::Provider(message.clone())),
            None => Ok(self.insights.clone()),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        true
    }
}

/// Mock forwarder recording sends and failing for selected messages
#[derive(Clone, Default)]
pub struct MockForwarder {
    sent: Arc<Mutex<Vec<Insight>>>,
    pub fail_messages: Vec<String>,
}

impl MockForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(fail_messages: &[&str]) -> Self {
        Self {
            sent: Arc::default(),
            fail_messages: fail_messages.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn sent(&self) -> Vec<Insight> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ForwardingPort for MockForwarder {
    async fn send_insight(&self, insight: &Insight) -> Result<()> {
        if self.fail_messages.contains(&insight.message) {
            return Err(AppError::Forwarding(format!(
                "mock failure for '{}'",
                insight.message
            )));
        }
        self.sent.lock().unwrap().push(insight.clone());
        Ok(())
    }

    fn is_configured(&self) -> bool {
        true
    }
}
