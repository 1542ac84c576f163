//! Text analytics client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// API version of the analyze-text jobs endpoint.
pub const DEFAULT_API_VERSION: &str = "2023-04-01";

/// Configuration for the extractive summarization client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Language resource endpoint, e.g. https://my-resource.cognitiveservices.azure.com
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Language resource key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// REST API version
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Sentences requested per chunk
    #[serde(default = "default_sentence_count")]
    pub sentence_count: u32,
    /// Delay between job status polls in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_sentence_count() -> u32 {
    3
}

fn default_poll_interval_ms() -> u64 {
    1000
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            key: None,
            api_version: default_api_version(),
            sentence_count: default_sentence_count(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl AnalyticsConfig {
    /// Apply overrides from a variable lookup.
    ///
    /// Supported variables:
    /// - `AZURE_ENDPOINT`: Language resource endpoint
    /// - `AZURE_LANGUAGE_KEY`: Language resource key
    /// - `AZURE_API_VERSION`: REST API version
    /// - `AZURE_SENTENCE_COUNT`: sentences per chunk
    /// - `AZURE_POLL_INTERVAL_MS`: delay between status polls
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup("AZURE_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }
        if let Some(key) = lookup("AZURE_LANGUAGE_KEY") {
            self.key = Some(key);
        }
        if let Some(version) = lookup("AZURE_API_VERSION") {
            self.api_version = version;
        }
        if let Some(n) = lookup("AZURE_SENTENCE_COUNT").and_then(|v| v.parse().ok()) {
            self.sentence_count = n;
        }
        if let Some(ms) = lookup("AZURE_POLL_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            self.poll_interval_ms = ms;
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// URL that new analysis jobs are posted to.
    pub fn jobs_url(&self) -> Option<String> {
        self.endpoint.as_ref().map(|endpoint| {
            format!(
                "{}/language/analyze-text/jobs?api-version={}",
                endpoint.trim_end_matches('/'),
                self.api_version
            )
        })
    }
}
