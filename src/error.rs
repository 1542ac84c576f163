//! Errors shared by the remote service clients.

use thiserror::Error;

/// Errors from the summarization and chat-completion services.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Client is missing a required setting.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// Failed to reach the service.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Service answered with an error status or error payload.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Long-running job ended without success.
    #[error("Job {status}: {message}")]
    JobFailed { status: String, message: String },
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::Parse(error_chain(&e))
        } else {
            ServiceError::Connection(error_chain(&e))
        }
    }
}

/// Render an error and all of its sources as one line.
///
/// reqwest keeps the interesting part ("operation timed out", "dns error")
/// in the source chain, so the top-level message alone is not very useful.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
