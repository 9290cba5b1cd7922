//! Flat, source-ordered token stream derived from a syntax tree.
//!
//! Tokens are the leaves of the tree. Comments, heredoc bodies and other
//! `extra` subtrees are left out, as are zero-width leaves that tree-sitter
//! inserts during error recovery, so that tokens adjacent in the stream are
//! adjacent in the code.

use text_size::TextSize;
use tree_sitter::Node;

use crate::{Token, TreeWalker};

/// Source-ordered sequence of semantic tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenStream<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> TokenStream<'a> {
    /// Collect the semantic leaves below `root`.
    pub fn from_root(root: Node<'a>, source: &'a str) -> Self {
        let mut tokens = Vec::new();
        let mut walker = TreeWalker::new(root, source);
        let mut next = walker.next();

        while let Some(node) = next {
            let inner = node.inner();
            if inner.is_extra() {
                next = walker.skip_children();
                continue;
            }
            if inner.child_count() == 0 && !node.range().is_empty() {
                tokens.push(Token::new(inner, source));
            }
            next = walker.next();
        }

        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token<'a>> {
        self.tokens.iter()
    }

    /// Index of the first token starting at or after `offset`.
    pub fn index_of_first_token(&self, offset: TextSize) -> Option<usize> {
        let index = self
            .tokens
            .partition_point(|token| token.range().start() < offset);
        (index < self.tokens.len()).then_some(index)
    }

    /// `len` consecutive tokens starting at `index`, if that many remain.
    pub fn window(&self, index: usize, len: usize) -> Option<&[Token<'a>]> {
        self.tokens.get(index..index.checked_add(len)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rblint_ruby_parser::RubyParser;

    fn texts(source: &str) -> Vec<String> {
        let mut parser = RubyParser::new().unwrap();
        let result = parser.parse(source).unwrap();
        TokenStream::from_root(result.tree.root_node(), source)
            .iter()
            .map(|t| t.text().to_string())
            .collect()
    }

    #[test]
    fn test_leaves_in_source_order() {
        let tokens = texts("def f(a = 1); end");
        assert_eq!(tokens[..7], ["def", "f", "(", "a", "=", "1", ")"]);
        assert_eq!(tokens.last().map(String::as_str), Some("end"));
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = texts("def f(a, # note\n  b = 2)\nend");
        assert!(!tokens.iter().any(|t| t.starts_with('#')));
        assert!(tokens.contains(&"b".to_string()));
    }

    #[test]
    fn test_index_of_first_token() {
        let source = "def f(a = 1); end";
        let mut parser = RubyParser::new().unwrap();
        let result = parser.parse(source).unwrap();
        let stream = TokenStream::from_root(result.tree.root_node(), source);

        let index = stream.index_of_first_token(TextSize::new(6)).unwrap();
        let window = stream.window(index, 3).unwrap();
        let window: Vec<_> = window.iter().map(|t| t.text()).collect();
        assert_eq!(window, vec!["a", "=", "1"]);

        assert!(stream.index_of_first_token(TextSize::new(100)).is_none());
        assert!(stream.window(stream.len() - 1, 3).is_none());
    }
}
