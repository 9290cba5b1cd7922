//! Line/column lookup for source text.

use std::num::NonZeroUsize;

use text_size::TextSize;

/// A 1-based index (line or column number).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OneIndexed(NonZeroUsize);

impl OneIndexed {
    /// Create from a 0-based value.
    pub const fn from_zero_indexed(value: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(value))
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }

    pub const fn to_zero_indexed(self) -> usize {
        self.0.get() - 1
    }
}

/// A line and column position, both 1-based. Columns count characters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineColumn {
    pub line: OneIndexed,
    pub column: OneIndexed,
}

/// Byte offsets of every line start in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    /// Build the index by scanning for `\n`.
    pub fn from_source_text(text: &str) -> Self {
        let mut line_starts = Vec::with_capacity(text.len() / 32 + 1);
        line_starts.push(TextSize::new(0));
        line_starts.extend(
            memchr::memchr_iter(b'\n', text.as_bytes()).map(|i| TextSize::new(i as u32 + 1)),
        );

        Self {
            line_starts,
            len: TextSize::new(text.len() as u32),
        }
    }

    /// The line containing `offset`.
    pub fn line_index(&self, offset: TextSize) -> OneIndexed {
        let line = self.line_starts.partition_point(|start| *start <= offset);
        OneIndexed::from_zero_indexed(line.saturating_sub(1))
    }

    /// Byte offset where `line` starts; end of text past the last line.
    pub fn line_start(&self, line: OneIndexed) -> TextSize {
        self.line_starts
            .get(line.to_zero_indexed())
            .copied()
            .unwrap_or(self.len)
    }

    /// Byte offset where `line` ends, including its newline.
    pub fn line_end(&self, line: OneIndexed) -> TextSize {
        self.line_starts
            .get(line.get())
            .copied()
            .unwrap_or(self.len)
    }
}

/// Source text paired with its line index.
#[derive(Debug, Clone, Copy)]
pub struct SourceCode<'src, 'index> {
    text: &'src str,
    index: &'index LineIndex,
}

impl<'src, 'index> SourceCode<'src, 'index> {
    pub fn new(text: &'src str, index: &'index LineIndex) -> Self {
        Self { text, index }
    }

    /// Line and character column of `offset`.
    pub fn line_column(&self, offset: TextSize) -> LineColumn {
        let line = self.index.line_index(offset);
        let start = usize::from(self.index.line_start(line));
        let end = usize::from(offset).min(self.text.len());
        let column = self
            .text
            .get(start..end)
            .map_or(0, |prefix| prefix.chars().count());

        LineColumn {
            line,
            column: OneIndexed::from_zero_indexed(column),
        }
    }
}
