//! Stub collaborators and local HTTP servers shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;

use crate::analytics::SummarizationService;
use crate::error::ServiceError;
use crate::extract::{ExtractError, FetchedPage, PageFetcher, PdfParser};
use crate::llm::{ChatRequest, ChatService};

/// Bind an ephemeral local port and return the listener with its base URL.
pub async fn bind_local() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

/// Serve `app` on `listener` in the background.
pub fn serve(listener: TcpListener, app: Router) {
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}

/// Fetcher returning a canned page or error.
pub struct StubFetcher {
    result: Result<FetchedPage, ExtractError>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn ok(body: &str) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            result: Ok(FetchedPage {
                status,
                body: body.to_string(),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn err(error: ExtractError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedPage, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// PDF parser returning canned pages or an error.
pub struct StubPdf {
    result: Result<Vec<String>, ExtractError>,
}

impl StubPdf {
    pub fn pages(pages: &[&str]) -> Self {
        Self {
            result: Ok(pages.iter().map(|p| p.to_string()).collect()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            result: Err(ExtractError::Pdf(reason.to_string())),
        }
    }
}

impl PdfParser for StubPdf {
    fn page_texts(&self, _bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        self.result.clone()
    }
}

/// Summarizer that records every chunk and returns two sentences per call.
pub struct RecordingSummarizer {
    fail_on_call: Option<usize>,
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingSummarizer {
    pub fn new() -> Self {
        Self {
            fail_on_call: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail on the given 1-based call.
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn chunks(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn chunk_lengths(&self) -> Vec<usize> {
        self.chunks().iter().map(|c| c.chars().count()).collect()
    }

    pub fn languages(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, l)| l.clone()).collect()
    }
}

#[async_trait]
impl SummarizationService for RecordingSummarizer {
    async fn extract_summary(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Vec<String>, ServiceError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((text.to_string(), language.to_string()));
            calls.len()
        };
        if self.fail_on_call == Some(call) {
            return Err(ServiceError::Api {
                status: 403,
                message: "quota exceeded".to_string(),
            });
        }
        Ok(vec![
            format!("chunk {} sentence 1", call),
            format!("chunk {} sentence 2", call),
        ])
    }
}

/// Chat service returning a canned reply or error, recording requests.
pub struct StubChat {
    result: Result<String, ServiceError>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubChat {
    pub fn replying(content: &str) -> Self {
        Self {
            result: Ok(content.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ServiceError) -> Self {
        Self {
            result: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatService for StubChat {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}
