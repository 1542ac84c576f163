//! PDF text layer extraction.

use tracing::debug;

use super::ExtractError;

/// Reads the text layer of a PDF, one string per page.
pub trait PdfParser: Send + Sync {
    /// Text of every page in document order.
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError>;
}

/// Pure Rust parser backed by lopdf. No OCR: pages without a text layer
/// come back empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfParser;

impl PdfParser for LopdfParser {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| ExtractError::Pdf(format!("Failed to open PDF: {}", e)))?;

        // get_pages is keyed by page number, so iteration is in page order
        let pages = doc.get_pages();
        let mut texts = Vec::with_capacity(pages.len());
        for page_number in pages.keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) => texts.push(strip_text_object_break(text)),
                Err(e) => {
                    debug!("No text layer on page {}: {}", page_number, e);
                    texts.push(String::new());
                }
            }
        }

        Ok(texts)
    }
}

/// lopdf ends every text object with a line break; drop the trailing ones
/// so page text matches the text layer exactly.
fn strip_text_object_break(mut text: String) -> String {
    let len = text.trim_end_matches(['\n', '\r']).len();
    text.truncate(len);
    text
}
