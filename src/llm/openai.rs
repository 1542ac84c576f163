//! OpenAI-compatible chat completions client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::LlmConfig;
use super::{ChatMessage, ChatRequest, ChatService};
use crate::error::ServiceError;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

/// Chat completions over HTTP. No request timeout is applied.
pub struct OpenAiChat {
    client: Client,
    url: String,
    api_key: String,
}

impl OpenAiChat {
    pub fn new(config: &LlmConfig) -> Result<Self, ServiceError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(ServiceError::NotConfigured(config.provider.key_var()))?;
        let client = Client::builder()
            .build()
            .map_err(|e| ServiceError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.completions_url(),
            api_key,
        })
    }
}

#[async_trait]
impl ChatService for OpenAiChat {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ServiceError> {
        let body = CompletionRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(
            "Requesting completion from {} ({} messages)",
            request.model,
            request.messages.len()
        );
        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(ServiceError::Api { status, message });
        }

        let completion: CompletionResponse = resp.json().await?;
        if let Some(error) = completion.error {
            return Err(ServiceError::Api {
                status: 200,
                message: error.message,
            });
        }

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| ServiceError::Parse("response has no choices".to_string()))
    }
}
