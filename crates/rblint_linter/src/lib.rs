//! Ruby linter with auto-fix support.

pub mod enforced_style;
pub mod fix;
pub mod registry;
pub mod rules;
pub mod suppression;

pub use enforced_style::{
    DetectedStyles, EnforcedStyle, FixedStyle, SpaceStyle, StyleDetector, StyleState,
};
pub use fix::{FixOutcome, apply_fixes};
pub use registry::{FromConfig, Properties, RuleRegistry};
pub use suppression::SuppressionContext;

use rblint_diagnostics::Diagnostic;
use rblint_ruby_cst::{CstNode, TokenStream, TreeWalker};
use text_size::TextRange;

/// Context provided to rules during checking.
pub struct CheckContext<'a> {
    source: &'a str,
    tokens: TokenStream<'a>,
}

impl<'a> CheckContext<'a> {
    pub fn new(source: &'a str, root: &CstNode<'a>) -> Self {
        Self {
            source,
            tokens: TokenStream::from_root(root.inner(), source),
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Get the semantic token stream of the file.
    pub fn tokens(&self) -> &TokenStream<'a> {
        &self.tokens
    }

    /// Get text at a given range.
    pub fn text_at(&self, range: TextRange) -> &'a str {
        &self.source[range]
    }
}

/// Trait for lint rules.
pub trait Rule: Send + Sync {
    /// The rule's full name, e.g. `Layout/SpaceAroundEqualsInParameterDefault`.
    fn name(&self) -> &'static str;

    /// Node kinds this rule cares about. Empty means run on all nodes.
    fn relevant_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    /// Check a CST node for violations.
    fn check(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic>;
}

/// A diagnostic together with the rule that produced it.
#[derive(Debug, Clone)]
pub struct Finding {
    pub rule: &'static str,
    pub diagnostic: Diagnostic,
}

/// Result of linting a file.
#[derive(Debug, Default)]
pub struct LintResult {
    pub findings: Vec<Finding>,
}

impl LintResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Run `rules` over every node below `root`, dropping suppressed diagnostics.
///
/// Nodes are visited in pre-order, so findings come out in source order.
pub fn lint(
    ctx: &CheckContext,
    root: &CstNode,
    rules: &[Box<dyn Rule>],
    suppressions: &SuppressionContext,
) -> LintResult {
    let mut result = LintResult::new();

    for node in TreeWalker::new(root.inner(), ctx.source()) {
        for rule in rules {
            let kinds = rule.relevant_kinds();
            if !kinds.is_empty() && !kinds.contains(&node.kind()) {
                continue;
            }
            for diagnostic in rule.check(ctx, &node) {
                if suppressions.is_suppressed(rule.name(), diagnostic.start()) {
                    continue;
                }
                result.findings.push(Finding {
                    rule: rule.name(),
                    diagnostic,
                });
            }
        }
    }

    result
}
