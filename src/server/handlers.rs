//! Request handlers for the web interface.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use tracing::{debug, warn};

use super::pages::{qa_page, summarize_page, InputMode, QaView, SummarizeView};
use super::AppState;
use crate::extract::InputSource;
use crate::flow::{NoProgress, QaState, SummarizeState};

#[derive(Debug, Default, Deserialize)]
pub struct ModeQuery {
    #[serde(default)]
    mode: Option<String>,
}

impl ModeQuery {
    fn mode(&self) -> InputMode {
        self.mode.as_deref().map(InputMode::parse).unwrap_or_default()
    }
}

/// Fields posted by either tab.
#[derive(Debug, Default)]
struct SubmittedForm {
    mode: InputMode,
    url: String,
    pdf: Option<Vec<u8>>,
    pdf_name: Option<String>,
    pdf_b64: Option<String>,
    question: String,
}

impl SubmittedForm {
    async fn read(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = SubmittedForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "mode" => form.mode = InputMode::parse(&field.text().await?),
                "url" => form.url = field.text().await?,
                "question" => form.question = field.text().await?,
                "pdf_b64" => form.pdf_b64 = non_empty(field.text().await?),
                "pdf_name" => {
                    if form.pdf_name.is_none() {
                        form.pdf_name = non_empty(field.text().await?);
                    }
                }
                "pdf" => {
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await?;
                    // Browsers post an empty part when no file was chosen.
                    if !bytes.is_empty() {
                        debug!("Received PDF upload of {} bytes", bytes.len());
                        form.pdf = Some(bytes.to_vec());
                        form.pdf_name = file_name;
                    }
                }
                other => debug!("Ignoring form field {}", other),
            }
        }

        Ok(form)
    }

    /// Freshly uploaded PDF, else the one carried over from a previous page.
    fn pdf_bytes(&self) -> Option<Vec<u8>> {
        if let Some(bytes) = &self.pdf {
            return Some(bytes.clone());
        }
        let encoded = self.pdf_b64.as_deref()?;
        match STANDARD.decode(encoded) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Discarding carried-over PDF: {}", e);
                None
            }
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Redirect the root to the first tab.
pub async fn index() -> Redirect {
    Redirect::to("/summarize")
}

/// Health check.
pub async fn health() -> &'static str {
    "OK"
}

/// Empty summarization tab.
pub async fn summarize_form(Query(query): Query<ModeQuery>) -> Html<String> {
    Html(summarize_page(&SummarizeView {
        mode: query.mode(),
        url: "",
        state: &SummarizeState::Idle,
    }))
}

/// Run the summarize flow for a submitted URL or PDF.
///
/// A URL is always extracted, even when empty; PDF mode without a file
/// does nothing.
pub async fn summarize_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, MultipartError> {
    let form = SubmittedForm::read(multipart).await?;

    let source = match form.mode {
        InputMode::Url => Some(InputSource::Url(form.url.clone())),
        InputMode::Pdf => form.pdf.clone().map(InputSource::Pdf),
    };

    let mut flow = state.ctx.summarize_flow();
    if let Some(source) = &source {
        flow.run(source, &NoProgress).await;
    }

    Ok(Html(summarize_page(&SummarizeView {
        mode: form.mode,
        url: &form.url,
        state: flow.state(),
    })))
}

/// Empty Q&A tab.
pub async fn qa_form(Query(query): Query<ModeQuery>) -> Html<String> {
    Html(qa_page(&QaView {
        mode: query.mode(),
        url: "",
        pdf_b64: None,
        pdf_name: None,
        question: "",
        state: &QaState::Idle,
    }))
}

/// Load the submitted source and answer the question, if any.
///
/// Nothing is extracted for an empty URL or a missing PDF.
pub async fn qa_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, MultipartError> {
    let form = SubmittedForm::read(multipart).await?;

    let pdf = match form.mode {
        InputMode::Pdf => form.pdf_bytes(),
        InputMode::Url => None,
    };
    let source = match form.mode {
        InputMode::Url if !form.url.is_empty() => Some(InputSource::Url(form.url.clone())),
        InputMode::Url => None,
        InputMode::Pdf => pdf.clone().map(InputSource::Pdf),
    };

    let mut flow = state.ctx.qa_flow();
    if let Some(source) = &source {
        flow.load(source, &NoProgress).await;
        flow.ask(&form.question, &NoProgress).await;
    }

    let pdf_b64 = pdf.as_deref().map(|bytes| STANDARD.encode(bytes));
    Ok(Html(qa_page(&QaView {
        mode: form.mode,
        url: &form.url,
        pdf_b64: pdf_b64.as_deref(),
        pdf_name: form.pdf_name.as_deref(),
        question: &form.question,
        state: flow.state(),
    })))
}
