//! Helpers shared by the integration tests.
//!
//! Provides in-process lint/fix runs and a structured comparison of expected
//! vs actual violation lines, reporting missing items (false negatives) and
//! false positives.

#![allow(dead_code)]

use std::collections::HashSet;

use rblint_diagnostics::Applicability;
use rblint_linter::{
    CheckContext, Finding, FixOutcome, Rule, SuppressionContext, apply_fixes, lint,
};
use rblint_ruby_cst::CstNode;
use rblint_ruby_parser::RubyParser;
use rblint_source_file::{LineIndex, SourceCode};

/// A violation at a specific location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub replacement: Option<String>,
}

/// Run `rules` over `source` and collect findings.
pub fn lint_source(source: &str, rules: &[Box<dyn Rule>]) -> Vec<Finding> {
    let mut parser = RubyParser::new().expect("Ruby grammar");
    let result = parser.parse(source).expect("Failed to parse source");
    let root = CstNode::new(result.tree.root_node(), source);
    let ctx = CheckContext::new(source, &root);
    let suppressions = SuppressionContext::from_tree(source, &root);

    lint(&ctx, &root, rules, &suppressions).findings
}

/// Run `rules` over `source` and report violations with 1-based positions.
pub fn violations(source: &str, rules: &[Box<dyn Rule>]) -> Vec<Violation> {
    let line_index = LineIndex::from_source_text(source);
    let source_code = SourceCode::new(source, &line_index);

    lint_source(source, rules)
        .into_iter()
        .map(|finding| {
            let diagnostic = finding.diagnostic;
            let loc = source_code.line_column(diagnostic.start());
            Violation {
                line: loc.line.get(),
                column: loc.column.get(),
                message: diagnostic.kind.body.clone(),
                replacement: diagnostic
                    .fix
                    .as_ref()
                    .and_then(|fix| fix.edits().first())
                    .map(|edit| edit.content().unwrap_or("").to_string()),
            }
        })
        .collect()
}

/// Whether `source` parses without syntax errors.
pub fn parses_cleanly(source: &str) -> bool {
    let mut parser = RubyParser::new().expect("Ruby grammar");
    parser
        .parse(source)
        .map(|result| !result.has_errors())
        .unwrap_or(false)
}

/// Lint `source` once and apply all safe fixes.
pub fn fix_source(source: &str, rules: &[Box<dyn Rule>]) -> FixOutcome {
    let findings = lint_source(source, rules);
    apply_fixes(
        source,
        findings.iter().map(|f| &f.diagnostic),
        Applicability::Safe,
    )
}

/// Result of comparing expected vs actual violation lines.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Lines where violations are expected
    pub expected: Vec<usize>,
    /// Lines where we found violations
    pub actual: Vec<usize>,
    /// False negatives: expected, not found
    pub missing: Vec<usize>,
    /// False positives: found, not expected
    pub false_positives: Vec<usize>,
}

impl TestResult {
    /// Compare expected and actual violation lines.
    pub fn compare(expected: Vec<usize>, actual: Vec<usize>) -> Self {
        let expected_set: HashSet<usize> = expected.iter().copied().collect();
        let actual_set: HashSet<usize> = actual.iter().copied().collect();

        let mut missing: Vec<usize> = expected_set.difference(&actual_set).copied().collect();
        let mut false_positives: Vec<usize> =
            actual_set.difference(&expected_set).copied().collect();

        // Sort for consistent output
        missing.sort_unstable();
        false_positives.sort_unstable();

        Self {
            expected,
            actual,
            missing,
            false_positives,
        }
    }

    /// Check if result is perfect (no misses, no false positives).
    pub fn is_perfect(&self) -> bool {
        self.missing.is_empty() && self.false_positives.is_empty()
    }

    /// Assert the result is perfect, printing a report otherwise.
    pub fn assert_perfect(&self, test_name: &str) {
        assert!(
            self.is_perfect(),
            "{}: expected lines {:?}, found {:?}; missing {:?}, false positives {:?}",
            test_name,
            self.expected,
            self.actual,
            self.missing,
            self.false_positives
        );
    }
}
