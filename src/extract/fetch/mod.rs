//! HTTP page fetching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ExtractError;
use crate::error::error_chain;

/// User agent sent with every page request.
pub const USER_AGENT: &str = concat!("textlens/", env!("CARGO_PKG_VERSION"));

/// Timeout applied to page fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for page fetching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_secs()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FetchConfig {
    /// Apply the `FETCH_TIMEOUT_SECS` override from a variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(secs) = lookup("FETCH_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.timeout_secs = secs;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Body and status of a fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Something that can GET a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ExtractError>;
}

/// reqwest-backed page fetcher.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, ExtractError> {
        Self::with_timeout(config.timeout())
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| ExtractError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ExtractError> {
        debug!("GET {}", url);

        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                ExtractError::Timeout {
                    url: url.to_string(),
                    secs: self.timeout.as_secs(),
                }
            } else {
                ExtractError::Http(error_chain(&e))
            }
        };

        let response = self.client.get(url).send().await.map_err(map_err)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_err)?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(FetchedPage { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bind_local, serve};
    use axum::{routing::get, Router};

    #[test]
    fn test_default_timeout_is_ten_seconds() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = FetchConfig::default().with_overrides_from(|key| match key {
            "FETCH_TIMEOUT_SECS" => Some("3".to_string()),
            _ => None,
        });
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_invalid_timeout_override_ignored() {
        let config = FetchConfig::default().with_overrides_from(|key| {
            (key == "FETCH_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.timeout_secs, 10);
    }

    #[tokio::test]
    async fn test_fetch_returns_status_and_body() {
        let (listener, base) = bind_local().await;
        serve(
            listener,
            Router::new().route("/page", get(|| async { "<p>hello</p>" })),
        );

        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let page = fetcher.fetch(&format!("{}/page", base)).await.unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(page.body, "<p>hello</p>");
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let (listener, base) = bind_local().await;
        serve(
            listener,
            Router::new().route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            ),
        );

        let fetcher = HttpFetcher::with_timeout(Duration::from_millis(200)).unwrap();
        let err = fetcher.fetch(&format!("{}/slow", base)).await.unwrap_err();
        assert!(matches!(err, ExtractError::Timeout { .. }), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_sends_textlens_user_agent() {
        let (listener, base) = bind_local().await;
        serve(
            listener,
            Router::new().route(
                "/ua",
                get(|headers: axum::http::HeaderMap| async move {
                    headers
                        .get(axum::http::header::USER_AGENT)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string()
                }),
            ),
        );

        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let page = fetcher.fetch(&format!("{}/ua", base)).await.unwrap();
        assert_eq!(page.body, USER_AGENT);
        assert!(page.body.starts_with("textlens/"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_http_error() {
        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let err = fetcher.fetch("").await.unwrap_err();
        assert!(matches!(err, ExtractError::Http(_)), "got {:?}", err);
    }
}
