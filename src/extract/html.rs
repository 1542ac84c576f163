//! Paragraph text extraction from HTML pages.

use scraper::{ElementRef, Html, Node, Selector};

/// Paragraphs whose trimmed text is this many characters or fewer are dropped.
pub const MIN_PARAGRAPH_CHARS: usize = 30;

/// Elements whose text never counts as page content.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript"];

fn is_skipped(node: &Node) -> bool {
    matches!(node, Node::Element(e) if SKIPPED_ELEMENTS.contains(&e.name()))
}

/// Text of one paragraph: each text fragment trimmed, empty ones dropped,
/// the rest concatenated as-is.
fn paragraph_fragments(paragraph: ElementRef<'_>) -> String {
    let mut text = String::new();

    for node in paragraph.descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .take_while(|a| a.id() != paragraph.id())
            .any(|a| is_skipped(a.value()));
        if hidden {
            continue;
        }
        let trimmed = fragment.trim();
        if !trimmed.is_empty() {
            text.push_str(trimmed);
        }
    }

    text
}

/// Extract the readable body text of an HTML page.
///
/// Keeps every `<p>` outside `script`/`style`/`noscript` whose text is
/// longer than [`MIN_PARAGRAPH_CHARS`] characters, one paragraph per line.
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("p") {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    document
        .select(&selector)
        .filter(|p| !p.ancestors().any(|a| is_skipped(a.value())))
        .map(paragraph_fragments)
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect::<Vec<_>>()
        .join("\n")
}
