//! Shared helpers for layout rules.

use text_size::TextRange;

/// The source text strictly between two ranges; empty if they touch or overlap.
pub fn gap_between(source: &str, left: TextRange, right: TextRange) -> &str {
    if left.end() >= right.start() {
        return "";
    }
    source
        .get(usize::from(left.end())..usize::from(right.start()))
        .unwrap_or("")
}

/// Check whether any whitespace, including line breaks, separates two tokens.
pub fn space_between(source: &str, left: TextRange, right: TextRange) -> bool {
    gap_between(source, left, right)
        .chars()
        .any(char::is_whitespace)
}
