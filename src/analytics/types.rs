//! Wire format of the analyze-text jobs API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JobRequest<'a> {
    pub display_name: &'a str,
    pub analysis_input: AnalysisInput<'a>,
    pub tasks: Vec<JobTask<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalysisInput<'a> {
    pub documents: Vec<InputDocument<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct InputDocument<'a> {
    pub id: &'a str,
    pub language: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct JobTask<'a> {
    pub kind: &'a str,
    pub task_name: &'a str,
    pub parameters: TaskParameters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TaskParameters {
    pub sentence_count: u32,
}

/// Status document returned when polling a job.
#[derive(Debug, Deserialize)]
pub(super) struct JobState {
    pub status: String,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
    #[serde(default)]
    pub tasks: Option<JobTasks>,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status.as_str(),
            "succeeded" | "failed" | "cancelled" | "partiallyCompleted" | "partiallySucceeded"
        )
    }

    pub fn is_success(&self) -> bool {
        self.status == "succeeded"
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct JobTasks {
    #[serde(default)]
    pub items: Vec<TaskItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskItem {
    #[serde(default)]
    pub results: Option<TaskResults>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskResults {
    #[serde(default)]
    pub documents: Vec<DocumentResult>,
    #[serde(default)]
    pub errors: Vec<DocumentError>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DocumentResult {
    pub id: String,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Sentence {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct DocumentError {
    pub id: String,
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Error envelope of non-2xx responses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponse {
    pub error: ApiErrorDetail,
}

impl std::fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "({}) {}", self.code, self.message)
        }
    }
}
