//! A single text replacement.

use text_size::{TextRange, TextSize};

/// Replace `range` of the source with `content`; `None` content deletes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edit {
    range: TextRange,
    content: Option<Box<str>>,
}

impl Edit {
    /// Delete the text in `range`.
    pub fn range_deletion(range: TextRange) -> Self {
        Self {
            range,
            content: None,
        }
    }

    /// Replace the text in `range` with `content`.
    pub fn range_replacement(content: String, range: TextRange) -> Self {
        if content.is_empty() {
            return Self::range_deletion(range);
        }
        Self {
            range,
            content: Some(content.into_boxed_str()),
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn start(&self) -> TextSize {
        self.range.start()
    }

    pub fn end(&self) -> TextSize {
        self.range.end()
    }

    pub fn is_deletion(&self) -> bool {
        self.content.is_none()
    }
}
