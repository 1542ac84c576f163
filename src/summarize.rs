//! Chunked extractive summarization.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analytics::SummarizationService;
use crate::chunk::{chunk_text, CHUNK_SIZE};
use crate::error::ServiceError;

/// Language requested from the summarization service.
pub const SUMMARY_LANGUAGE: &str = "en";

/// Prefix of the single sentence returned when summarization fails.
pub const FAILURE_PREFIX: &str = "Summarization failed: ";

/// A chunk could not be summarized.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct SummarizeError {
    /// Zero-based index of the failing chunk.
    pub chunk: usize,
    pub source: ServiceError,
}

/// Summarizes arbitrarily long text one chunk at a time.
pub struct SummarizationClient {
    service: Arc<dyn SummarizationService>,
    chunk_size: usize,
    language: String,
}

impl SummarizationClient {
    pub fn new(service: Arc<dyn SummarizationService>) -> Self {
        Self {
            service,
            chunk_size: CHUNK_SIZE,
            language: SUMMARY_LANGUAGE.to_string(),
        }
    }

    /// Summary sentences of every chunk, in chunk order.
    ///
    /// Chunks are sent strictly one after another and the first failure
    /// aborts the whole summary.
    pub async fn try_summarize(&self, text: &str) -> Result<Vec<String>, SummarizeError> {
        let chunks = chunk_text(text, self.chunk_size);
        info!("Summarizing {} chunks", chunks.len());

        let mut sentences = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            debug!(
                "Summarizing chunk {}/{} ({} chars)",
                index + 1,
                chunks.len(),
                chunk.chars().count()
            );
            let found = self
                .service
                .extract_summary(chunk, &self.language)
                .await
                .map_err(|source| SummarizeError {
                    chunk: index,
                    source,
                })?;
            sentences.extend(found);
        }

        Ok(sentences)
    }

    /// Like [`Self::try_summarize`], but a failure becomes a one-line summary
    /// describing it. Sentences from chunks before the failure are dropped.
    pub async fn summarize(&self, text: &str) -> Vec<String> {
        match self.try_summarize(text).await {
            Ok(sentences) => sentences,
            Err(e) => {
                warn!("Summarization failed on chunk {}: {}", e.chunk + 1, e);
                vec![format!("{}{}", FAILURE_PREFIX, e)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSummarizer;

    #[tokio::test]
    async fn test_twelve_thousand_chars_make_three_calls() {
        let service = Arc::new(RecordingSummarizer::new());
        let client = SummarizationClient::new(service.clone());

        let sentences = client.summarize(&"y".repeat(12_000)).await;

        assert_eq!(service.chunk_lengths(), vec![5000, 5000, 2000]);
        assert_eq!(
            sentences,
            vec![
                "chunk 1 sentence 1",
                "chunk 1 sentence 2",
                "chunk 2 sentence 1",
                "chunk 2 sentence 2",
                "chunk 3 sentence 1",
                "chunk 3 sentence 2",
            ]
        );
        assert!(service.languages().iter().all(|l| l == "en"));
    }

    #[tokio::test]
    async fn test_failure_on_second_chunk_drops_partial_results() {
        let service = Arc::new(RecordingSummarizer::failing_on(2));
        let client = SummarizationClient::new(service.clone());

        let sentences = client.summarize(&"z".repeat(12_000)).await;

        assert_eq!(sentences.len(), 1);
        assert!(sentences[0].starts_with("Summarization failed: "));
        assert!(sentences[0].contains("quota exceeded"));
        // Aborted before the third chunk.
        assert_eq!(service.chunk_lengths(), vec![5000, 5000]);
    }

    #[tokio::test]
    async fn test_try_summarize_reports_failing_chunk() {
        let service = Arc::new(RecordingSummarizer::failing_on(2));
        let client = SummarizationClient::new(service);

        let err = client.try_summarize(&"z".repeat(12_000)).await.unwrap_err();
        assert_eq!(err.chunk, 1);
        assert!(matches!(err.source, ServiceError::Api { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_chunks_sent_in_order() {
        let service = Arc::new(RecordingSummarizer::new());
        let client = SummarizationClient::new(service.clone());
        let text = format!("{}{}", "a".repeat(5000), "b".repeat(10));

        client.summarize(&text).await;

        let chunks = service.chunks();
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].chars().all(|c| c == 'a'));
        assert_eq!(chunks[1], "b".repeat(10));
    }

    #[tokio::test]
    async fn test_empty_text_makes_no_calls() {
        let service = Arc::new(RecordingSummarizer::new());
        let client = SummarizationClient::new(service.clone());

        assert!(client.summarize("").await.is_empty());
        assert!(service.chunks().is_empty());
    }
}
