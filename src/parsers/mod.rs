pub mod price;
pub mod rating;

pub use price::*;
pub use rating::*;

/// Collapse runs of whitespace. Entities are already decoded by the HTML
/// parser, so literal text such as `&lt;3` is left alone.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `clean_text`, with empty results mapped to `None`.
pub fn non_empty(text: &str) -> Option<String> {
    let cleaned = clean_text(text);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
