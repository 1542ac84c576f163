//! LLM client configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// LLM provider type. All of them speak the OpenAI chat completions API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    OpenAI,
    Groq,
    Together,
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "groq" => Ok(Self::Groq),
            "together" => Ok(Self::Together),
            other => Err(format!("unknown LLM provider: {}", other)),
        }
    }
}

impl LlmProvider {

    /// Base URL used when no endpoint is configured.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::OpenAI => "https://api.openai.com",
            Self::Groq => "https://api.groq.com/openai",
            Self::Together => "https://api.together.xyz",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn key_var(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Groq => "GROQ_API_KEY",
            Self::Together => "TOGETHER_API_KEY",
        }
    }
}

/// Configuration for the chat-completion client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider (openai, groq or together)
    #[serde(default)]
    pub provider: LlmProvider,
    /// API endpoint; the provider's default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model used for answers
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for generation
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            endpoint: None,
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl LlmConfig {
    /// Apply overrides from a variable lookup.
    ///
    /// Supported variables:
    /// - `LLM_PROVIDER`: "openai" (default), "groq" or "together"
    /// - `LLM_ENDPOINT`: API endpoint (defaults based on provider)
    /// - `LLM_API_KEY`: API key, wins over the provider-specific variable
    /// - `OPENAI_API_KEY` / `GROQ_API_KEY` / `TOGETHER_API_KEY`: provider key
    /// - `LLM_MODEL`: model name
    /// - `LLM_MAX_TOKENS`: maximum tokens in response
    /// - `LLM_TEMPERATURE`: generation temperature
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(provider) = lookup("LLM_PROVIDER").and_then(|v| v.parse::<LlmProvider>().ok()) {
            self.provider = provider;
        }
        if let Some(endpoint) = lookup("LLM_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }

        // Explicit API key always wins
        if let Some(key) = lookup("LLM_API_KEY").or_else(|| lookup(self.provider.key_var())) {
            self.api_key = Some(key);
        }

        if let Some(model) = lookup("LLM_MODEL") {
            self.model = model;
        }
        if let Some(n) = lookup("LLM_MAX_TOKENS").and_then(|v| v.parse::<u32>().ok()) {
            self.max_tokens = n;
        }
        if let Some(t) = lookup("LLM_TEMPERATURE").and_then(|v| v.parse::<f32>().ok()) {
            self.temperature = t;
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Configured endpoint, or the provider default.
    pub fn base_url(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.provider.default_endpoint())
            .trim_end_matches('/')
    }

    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url())
    }
}
