//! Text extraction from web pages and PDF documents.
//!
//! Both sources produce a [`Document`]. The `try_*` methods return typed
//! errors; the plain methods fold any failure into the document text as a
//! readable message, which is what the interactive flows display.

mod fetch;
mod html;
mod pdf;

pub use fetch::{
    FetchConfig, FetchedPage, HttpFetcher, PageFetcher, DEFAULT_FETCH_TIMEOUT, USER_AGENT,
};
pub use html::{paragraph_text, MIN_PARAGRAPH_CHARS};
pub use pdf::{LopdfParser, PdfParser};

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Documents at or below this many characters are not sent to any service.
pub const MIN_CONTENT_CHARS: usize = 100;

/// Prefix of the text returned when a URL cannot be extracted.
pub const URL_ERROR_PREFIX: &str = "Error extracting text: ";

/// Prefix of the text returned when a PDF cannot be read.
pub const PDF_ERROR_PREFIX: &str = "Error reading PDF: ";

/// Errors that can occur during text extraction.
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    #[error("request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("{0}")]
    Http(String),

    #[error("{0}")]
    Pdf(String),
}

/// Raw text extracted from a single source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the text is long enough to be worth a service call.
    ///
    /// Inline error messages are documents too, so a long enough error
    /// string passes this check.
    pub fn has_enough_content(&self) -> bool {
        self.char_count() > MIN_CONTENT_CHARS
    }
}

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Url(String),
    Pdf(Vec<u8>),
}

impl InputSource {
    /// Busy message shown while this source is extracted.
    pub fn extracting_message(&self) -> &'static str {
        match self {
            InputSource::Url(_) => "Extracting...",
            InputSource::Pdf(_) => "Extracting text...",
        }
    }
}

/// Turns URLs and PDF bytes into documents.
pub struct Extractor {
    fetcher: Arc<dyn PageFetcher>,
    pdf: Arc<dyn PdfParser>,
}

impl Extractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, pdf: Arc<dyn PdfParser>) -> Self {
        Self { fetcher, pdf }
    }

    /// Create an extractor backed by reqwest and lopdf.
    pub fn from_config(config: &FetchConfig) -> Result<Self, ExtractError> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(Arc::new(fetcher), Arc::new(LopdfParser)))
    }

    /// Fetch a page and keep the text of its substantial paragraphs.
    pub async fn try_extract_from_url(&self, url: &str) -> Result<Document, ExtractError> {
        let page = self.fetcher.fetch(url).await?;
        if !(200..300).contains(&page.status) {
            warn!("{} returned HTTP {}, parsing body anyway", url, page.status);
        }

        let text = paragraph_text(&page.body);
        info!(
            "Extracted {} characters from {}",
            text.chars().count(),
            url
        );
        Ok(Document::new(text))
    }

    /// Like [`Self::try_extract_from_url`], with failures returned as text.
    pub async fn extract_from_url(&self, url: &str) -> Document {
        match self.try_extract_from_url(url).await {
            Ok(doc) => doc,
            Err(e) => {
                warn!("URL extraction failed for {}: {}", url, e);
                Document::new(format!("{}{}", URL_ERROR_PREFIX, e))
            }
        }
    }

    /// Concatenate the text layer of every page, in page order.
    pub fn try_extract_from_pdf(&self, bytes: &[u8]) -> Result<Document, ExtractError> {
        let pages = self.pdf.page_texts(bytes)?;
        debug!("PDF has {} pages", pages.len());

        let text = pages.concat();
        info!(
            "Extracted {} characters from {} PDF pages",
            text.chars().count(),
            pages.len()
        );
        Ok(Document::new(text))
    }

    /// Like [`Self::try_extract_from_pdf`], with failures returned as text.
    pub fn extract_from_pdf(&self, bytes: &[u8]) -> Document {
        match self.try_extract_from_pdf(bytes) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("PDF extraction failed: {}", e);
                Document::new(format!("{}{}", PDF_ERROR_PREFIX, e))
            }
        }
    }

    pub async fn extract(&self, source: &InputSource) -> Document {
        match source {
            InputSource::Url(url) => self.extract_from_url(url).await,
            InputSource::Pdf(bytes) => self.extract_from_pdf(bytes),
        }
    }
}
