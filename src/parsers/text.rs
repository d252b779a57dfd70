//! Plain-text extraction from parsed HTML.

use scraper::{ElementRef, Node};

/// Elements whose text never counts as page content
const NON_CONTENT: [&str; 4] = ["script", "style", "noscript", "template"];

/// Collapses runs of whitespace within a single line or fragment
pub fn normalize_whitespace_in_segment(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of an inline element (titles, headings, `<time>`) on one line
pub fn inline_text(element: ElementRef<'_>) -> String {
    let joined = content_fragments(element).collect::<Vec<_>>().join(" ");
    normalize_whitespace_in_segment(&joined)
}

/// Text of a block container: one line per text node.
///
/// Every text node is trimmed and empty ones are dropped.
pub fn block_text(element: ElementRef<'_>) -> String {
    content_fragments(element)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Raw text nodes below `element` in document order, skipping scripts and styles
fn content_fragments<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    element.descendants().filter_map(|node| match node.value() {
        Node::Text(text) => {
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| NON_CONTENT.contains(&e.name()))
            });
            (!hidden).then_some(&**text)
        }
        _ => None,
    })
}
