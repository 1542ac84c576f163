//! Fixed-size text chunking for size-limited services.

/// Maximum characters per chunk sent to the summarization service.
pub const CHUNK_SIZE: usize = 5000;

/// Split `text` into consecutive windows of at most `size` characters.
///
/// Windows are counted in characters, not bytes, and never split a UTF-8
/// sequence. Concatenating the result reproduces `text` exactly. Empty input
/// yields no chunks.
pub fn chunk_text(text: &str, size: usize) -> Vec<&str> {
    let size = size.max(1);
    let mut chunks = Vec::with_capacity(text.len() / size + 1);
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == size {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}
