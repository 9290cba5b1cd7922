//! Pre-order traversal over a syntax subtree.

use tree_sitter::{Node, TreeCursor};

use crate::CstNode;

/// Visits the root and every descendant in source order.
///
/// [`TreeWalker::skip_children`] advances past the subtree of the node last
/// returned, which lets callers prune comments or other regions.
pub struct TreeWalker<'a> {
    cursor: TreeCursor<'a>,
    source: &'a str,
    started: bool,
    finished: bool,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: Node<'a>, source: &'a str) -> Self {
        Self {
            cursor: root.walk(),
            source,
            started: false,
            finished: false,
        }
    }

    /// The next node after the current one's subtree.
    pub fn skip_children(&mut self) -> Option<CstNode<'a>> {
        self.step(false)
    }

    fn current(&self) -> CstNode<'a> {
        CstNode::new(self.cursor.node(), self.source)
    }

    fn step(&mut self, descend: bool) -> Option<CstNode<'a>> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current());
        }
        if descend && self.cursor.goto_first_child() {
            return Some(self.current());
        }
        // The cursor never climbs above the root it was created on
        loop {
            if self.cursor.goto_next_sibling() {
                return Some(self.current());
            }
            if !self.cursor.goto_parent() {
                self.finished = true;
                return None;
            }
        }
    }
}

impl<'a> Iterator for TreeWalker<'a> {
    type Item = CstNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step(true)
    }
}
