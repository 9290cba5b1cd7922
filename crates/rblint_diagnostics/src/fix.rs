//! Fixes: edits plus how safe they are to apply.

use crate::Edit;

/// How safe a fix is to apply automatically.
///
/// Ordered from least to most safe; a fix applies when its applicability
/// is at least the requested one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, is_macro::Is)]
pub enum Applicability {
    /// May change behaviour; applied only on request.
    Unsafe,
    /// Preserves behaviour.
    Safe,
}

/// A set of edits resolving one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fix {
    edits: Vec<Edit>,
    applicability: Applicability,
}

impl Fix {
    pub fn safe_edit(edit: Edit) -> Self {
        Self::with_applicability(vec![edit], Applicability::Safe)
    }

    pub fn unsafe_edit(edit: Edit) -> Self {
        Self::with_applicability(vec![edit], Applicability::Unsafe)
    }

    fn with_applicability(edits: Vec<Edit>, applicability: Applicability) -> Self {
        Self {
            edits,
            applicability,
        }
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn applicability(&self) -> Applicability {
        self.applicability
    }

    /// Whether this fix may be applied when `requested` is the minimum accepted level.
    pub fn applies(&self, requested: Applicability) -> bool {
        self.applicability >= requested
    }
}
