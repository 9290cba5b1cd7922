//! Ruby parser for rblint, built on tree-sitter-ruby.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to load Ruby grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("Parser produced no syntax tree")]
    NoTree,
}

/// Result of parsing a Ruby source file.
pub struct ParseResult {
    pub tree: tree_sitter::Tree,
}

impl ParseResult {
    /// Whether tree-sitter had to recover from syntax errors.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

/// Ruby parser wrapping tree-sitter.
pub struct RubyParser {
    parser: tree_sitter::Parser,
}

/// Return the tree-sitter Ruby language.
pub fn ruby_language() -> tree_sitter::Language {
    tree_sitter_ruby::LANGUAGE.into()
}

impl RubyParser {
    /// Create a new Ruby parser.
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&ruby_language())?;
        Ok(Self { parser })
    }

    /// Parse Ruby source code into a syntax tree.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;
        Ok(ParseResult { tree })
    }
}
