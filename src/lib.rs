//! textlens - summarize or question web pages and PDF documents.
//!
//! Text is pulled out of a URL or a PDF, then either split into chunks for an
//! extractive summarization service or handed whole to a chat-completion
//! model as the context for a question.

pub mod analytics;
pub mod chunk;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod flow;
pub mod llm;
pub mod qa;
pub mod server;
pub mod summarize;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::AppContext;
