//! Azure AI Language extractive summarization client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, warn};

use super::config::AnalyticsConfig;
use super::types::{
    AnalysisInput, ErrorResponse, InputDocument, JobRequest, JobState, JobTask, TaskParameters,
};
use super::SummarizationService;
use crate::error::ServiceError;

const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const DOCUMENT_ID: &str = "1";
const TASK_KIND: &str = "ExtractiveSummarization";
const TASK_NAME: &str = "extractive-summary";

/// Client for the analyze-text jobs API.
///
/// Each call submits a single-document job and polls it until it reaches a
/// terminal state. There is no overall deadline.
pub struct AzureTextAnalytics {
    config: AnalyticsConfig,
    client: Client,
    jobs_url: String,
    key: String,
}

impl AzureTextAnalytics {
    pub fn new(config: AnalyticsConfig) -> Result<Self, ServiceError> {
        let jobs_url = config
            .jobs_url()
            .ok_or(ServiceError::NotConfigured("AZURE_ENDPOINT"))?;
        let key = config
            .key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(ServiceError::NotConfigured("AZURE_LANGUAGE_KEY"))?;
        let client = Client::builder()
            .build()
            .map_err(|e| ServiceError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            jobs_url,
            key,
        })
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Submit a job and return its operation URL.
    async fn submit(&self, text: &str, language: &str) -> Result<String, ServiceError> {
        let request = JobRequest {
            display_name: "textlens",
            analysis_input: AnalysisInput {
                documents: vec![InputDocument {
                    id: DOCUMENT_ID,
                    language,
                    text,
                }],
            },
            tasks: vec![JobTask {
                kind: TASK_KIND,
                task_name: TASK_NAME,
                parameters: TaskParameters {
                    sentence_count: self.config.sentence_count,
                },
            }],
        };

        debug!("Submitting summarization job ({} chars)", text.chars().count());
        let resp = self
            .client
            .post(&self.jobs_url)
            .header(KEY_HEADER, &self.key)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        resp.headers()
            .get("operation-location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                ServiceError::Parse("response is missing the operation-location header".to_string())
            })
    }

    /// Poll a job until it stops running.
    async fn wait_for_job(&self, operation_url: &str) -> Result<JobState, ServiceError> {
        loop {
            let resp = self
                .client
                .get(operation_url)
                .header(KEY_HEADER, &self.key)
                .send()
                .await?;

            if !resp.status().is_success() {
                return Err(api_error(resp).await);
            }

            let state: JobState = resp.json().await?;
            if state.is_terminal() {
                return Ok(state);
            }

            debug!("Summarization job is {}, polling again", state.status);
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }
}

#[async_trait]
impl SummarizationService for AzureTextAnalytics {
    async fn extract_summary(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Vec<String>, ServiceError> {
        let operation = self.submit(text, language).await?;
        let state = self.wait_for_job(&operation).await?;

        if !state.is_success() {
            let message = state
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ServiceError::JobFailed {
                status: state.status,
                message,
            });
        }

        let results = state
            .tasks
            .and_then(|t| t.items.into_iter().next())
            .and_then(|item| item.results)
            .ok_or_else(|| ServiceError::Parse("job finished without task results".to_string()))?;

        // A rejected document has no sentences; it is skipped, not fatal.
        if let Some(rejected) = results.errors.iter().find(|e| e.id == DOCUMENT_ID) {
            warn!("Document {} was rejected: {}", rejected.id, rejected.error);
            return Ok(Vec::new());
        }

        Ok(results
            .documents
            .into_iter()
            .find(|d| d.id == DOCUMENT_ID)
            .map(|d| d.sentences.into_iter().map(|s| s.text).collect())
            .unwrap_or_default())
    }
}

async fn api_error(resp: Response) -> ServiceError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error.to_string())
        .unwrap_or(body);
    ServiceError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bind_local, serve};
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response as AxumResponse};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy)]
    enum Outcome {
        Sentences,
        DocumentRejected,
        JobFailed,
    }

    struct MockState {
        base: String,
        outcome: Outcome,
        polls: AtomicUsize,
        submitted: Mutex<Vec<Value>>,
    }

    async fn submit_job(
        State(state): State<Arc<MockState>>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> AxumResponse {
        if headers.get(KEY_HEADER).and_then(|v| v.to_str().ok()) != Some("test-key") {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"code": "401", "message": "Access denied due to invalid subscription key."}})),
            )
                .into_response();
        }
        state.submitted.lock().unwrap().push(body);
        let location = format!(
            "{}/language/analyze-text/jobs/job-1?api-version=2023-04-01",
            state.base
        );
        (StatusCode::ACCEPTED, [("operation-location", location)]).into_response()
    }

    async fn job_status(State(state): State<Arc<MockState>>) -> Json<Value> {
        // First poll reports the job as still running.
        if state.polls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Json(json!({"jobId": "job-1", "status": "running"}));
        }
        let body = match state.outcome {
            Outcome::Sentences => json!({
                "jobId": "job-1",
                "status": "succeeded",
                "errors": [],
                "tasks": {"items": [{"results": {
                    "documents": [{"id": "1", "sentences": [
                        {"text": "The most important sentence."},
                        {"text": "The runner-up."}
                    ]}],
                    "errors": []
                }}]}
            }),
            Outcome::DocumentRejected => json!({
                "jobId": "job-1",
                "status": "succeeded",
                "tasks": {"items": [{"results": {
                    "documents": [],
                    "errors": [{"id": "1", "error": {"code": "InvalidDocument", "message": "Document text is empty."}}]
                }}]}
            }),
            Outcome::JobFailed => json!({
                "jobId": "job-1",
                "status": "failed",
                "errors": [{"code": "InternalServerError", "message": "Something broke."}]
            }),
        };
        Json(body)
    }

    async fn mock_service(outcome: Outcome) -> (Arc<MockState>, String) {
        let (listener, base) = bind_local().await;
        let state = Arc::new(MockState {
            base: base.clone(),
            outcome,
            polls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .route("/language/analyze-text/jobs", post(submit_job))
            .route("/language/analyze-text/jobs/:id", get(job_status))
            .with_state(state.clone());
        serve(listener, app);
        (state, base)
    }

    fn client(base: &str, key: &str) -> AzureTextAnalytics {
        let mut config = AnalyticsConfig::default().with_endpoint(base).with_key(key);
        config.poll_interval_ms = 10;
        AzureTextAnalytics::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_sentences_in_service_order() {
        let (state, base) = mock_service(Outcome::Sentences).await;
        let sentences = client(&base, "test-key")
            .extract_summary("Some long text.", "en")
            .await
            .unwrap();

        assert_eq!(
            sentences,
            vec!["The most important sentence.", "The runner-up."]
        );
        assert_eq!(state.polls.load(Ordering::SeqCst), 2);

        let submitted = state.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        let doc = &submitted[0]["analysisInput"]["documents"][0];
        assert_eq!(doc["language"], "en");
        assert_eq!(doc["text"], "Some long text.");
        assert_eq!(submitted[0]["tasks"][0]["kind"], "ExtractiveSummarization");
    }

    #[tokio::test]
    async fn test_bad_key_is_api_error() {
        let (_state, base) = mock_service(Outcome::Sentences).await;
        let err = client(&base, "wrong")
            .extract_summary("text", "en")
            .await
            .unwrap_err();

        match err {
            ServiceError::Api { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("invalid subscription key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_document_yields_no_sentences() {
        let (_state, base) = mock_service(Outcome::DocumentRejected).await;
        let sentences = client(&base, "test-key")
            .extract_summary("text", "en")
            .await
            .unwrap();
        assert!(sentences.is_empty());
    }

    #[tokio::test]
    async fn test_failed_job_is_error() {
        let (_state, base) = mock_service(Outcome::JobFailed).await;
        let err = client(&base, "test-key")
            .extract_summary("text", "en")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::JobFailed { .. }));
        assert!(err.to_string().contains("Something broke."));
    }

    #[test]
    fn test_missing_settings() {
        let err = AzureTextAnalytics::new(AnalyticsConfig::default()).err().unwrap();
        assert!(matches!(err, ServiceError::NotConfigured("AZURE_ENDPOINT")));

        let config = AnalyticsConfig::default().with_endpoint("https://x.example");
        let err = AzureTextAnalytics::new(config).err().unwrap();
        assert!(matches!(err, ServiceError::NotConfigured("AZURE_LANGUAGE_KEY")));
    }
}
