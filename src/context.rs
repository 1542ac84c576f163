//! Shared application clients.

use std::sync::Arc;

use anyhow::Context as _;

use crate::analytics::AzureTextAnalytics;
use crate::config::Settings;
use crate::extract::Extractor;
use crate::flow::{QaFlow, SummarizeFlow};
use crate::llm::OpenAiChat;
use crate::qa::QaClient;
use crate::summarize::SummarizationClient;

/// Clients built once at startup and shared by every flow.
#[derive(Clone)]
pub struct AppContext {
    pub extractor: Arc<Extractor>,
    pub summarizer: Arc<SummarizationClient>,
    pub qa: Arc<QaClient>,
}

impl AppContext {
    pub fn new(extractor: Extractor, summarizer: SummarizationClient, qa: QaClient) -> Self {
        Self {
            extractor: Arc::new(extractor),
            summarizer: Arc::new(summarizer),
            qa: Arc::new(qa),
        }
    }

    /// Build the real clients. Fails if any required secret is missing.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        settings.require_secrets()?;

        let extractor =
            Extractor::from_config(&settings.fetch).context("Failed to create page fetcher")?;
        let analytics = AzureTextAnalytics::new(settings.analytics.clone())
            .context("Failed to create summarization client")?;
        let chat = OpenAiChat::new(&settings.llm).context("Failed to create chat client")?;

        Ok(Self::new(
            extractor,
            SummarizationClient::new(Arc::new(analytics)),
            QaClient::new(Arc::new(chat), &settings.llm),
        ))
    }

    pub fn summarize_flow(&self) -> SummarizeFlow {
        SummarizeFlow::new(self.extractor.clone(), self.summarizer.clone())
    }

    pub fn qa_flow(&self) -> QaFlow {
        QaFlow::new(self.extractor.clone(), self.qa.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_requires_secrets() {
        let err = AppContext::from_settings(&Settings::default())
            .err()
            .expect("missing secrets must fail");
        assert!(err.to_string().contains("AZURE_ENDPOINT"));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_from_settings_with_secrets() {
        let settings = Settings::default().with_overrides_from(|key| match key {
            "AZURE_ENDPOINT" => Some("https://res.cognitiveservices.azure.com".to_string()),
            "AZURE_LANGUAGE_KEY" => Some("azure-key".to_string()),
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            _ => None,
        });
        assert!(AppContext::from_settings(&settings).is_ok());
    }
}
