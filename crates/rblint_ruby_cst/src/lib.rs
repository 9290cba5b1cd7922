//! Ruby syntax tree access for rblint.
//!
//! [`CstNode`] pairs a tree-sitter node with the source it was parsed from,
//! [`TreeWalker`] visits a subtree in pre-order and [`TokenStream`] flattens a
//! tree into the leaves that rules compare positions against. Node kinds the
//! rules inspect get a typed view, such as [`OptionalParameter`].

mod optional_parameter;
mod token_stream;
mod walker;

pub use optional_parameter::OptionalParameter;
pub use token_stream::TokenStream;
pub use walker::TreeWalker;

use text_size::{TextRange, TextSize};
use tree_sitter::Node;

fn text_range(node: &Node) -> TextRange {
    TextRange::new(
        TextSize::new(node.start_byte() as u32),
        TextSize::new(node.end_byte() as u32),
    )
}

fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

/// A leaf of the syntax tree: identifier, literal, keyword or operator.
#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> Token<'a> {
    pub(crate) fn new(node: Node<'a>, source: &'a str) -> Self {
        Self { node, source }
    }

    pub fn text(&self) -> &'a str {
        node_text(&self.node, self.source)
    }

    pub fn range(&self) -> TextRange {
        text_range(&self.node)
    }

    /// Whether this is the anonymous token spelled `kind`, e.g. `=` or `def`.
    pub fn is(&self, kind: &str) -> bool {
        !self.node.is_named() && self.node.kind() == kind
    }
}

/// A node of a Ruby syntax tree.
#[derive(Debug, Clone, Copy)]
pub struct CstNode<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> CstNode<'a> {
    pub fn new(node: Node<'a>, source: &'a str) -> Self {
        Self { node, source }
    }

    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    pub fn range(&self) -> TextRange {
        text_range(&self.node)
    }

    pub fn text(&self) -> &'a str {
        node_text(&self.node, self.source)
    }

    /// The child stored under a grammar field such as `name` or `value`.
    pub fn field(&self, name: &str) -> Option<CstNode<'a>> {
        self.node
            .child_by_field_name(name)
            .map(|n| CstNode::new(n, self.source))
    }

    /// `# ...` line comments and `=begin`/`=end` blocks.
    pub fn is_comment(&self) -> bool {
        self.node.kind() == "comment"
    }

    pub fn inner(&self) -> Node<'a> {
        self.node
    }
}
