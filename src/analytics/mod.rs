//! Extractive summarization service.
//!
//! Backed by the Azure AI Language "analyze-text" jobs API, which selects
//! sentences verbatim from the submitted text.

mod azure;
mod config;
mod types;

pub use azure::AzureTextAnalytics;
pub use config::{AnalyticsConfig, DEFAULT_API_VERSION};

use async_trait::async_trait;

use crate::error::ServiceError;

/// A service that picks representative sentences out of a text.
#[async_trait]
pub trait SummarizationService: Send + Sync {
    /// Extract summary sentences from `text`, in the service's order.
    async fn extract_summary(&self, text: &str, language: &str)
        -> Result<Vec<String>, ServiceError>;
}
