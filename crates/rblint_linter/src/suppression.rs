//! Suppression support for rblint.
//!
//! Comments disable rules for a region or a single line:
//! - `# rblint:disable Layout/SpaceAroundEqualsInParameterDefault` on its own
//!   line starts a region, `# rblint:enable ...` ends it
//! - the same comment after code on a line only covers that line
//! - names may be a full rule name, a department (`Layout`) or `all`,
//!   several separated by commas

use lazy_static::lazy_static;
use rblint_ruby_cst::{CstNode, TreeWalker};
use rblint_source_file::LineIndex;
use regex::Regex;
use std::collections::HashMap;
use text_size::TextSize;

lazy_static! {
    static ref DIRECTIVE: Regex = Regex::new(
        r"#\s*rblint\s*:\s*(disable|enable)\s+([A-Za-z0-9_/]+(?:\s*,\s*[A-Za-z0-9_/]+)*)"
    )
    .unwrap();
}

/// Wildcard name matching every rule.
const ALL: &str = "all";

/// A suppression region where a specific rule is disabled.
#[derive(Debug, Clone)]
pub struct SuppressionRegion {
    /// The rule, department or `all` being suppressed.
    pub rule: String,
    /// Start offset in the source.
    pub start: TextSize,
    /// End offset in the source (None means until end of file).
    pub end: Option<TextSize>,
}

impl SuppressionRegion {
    fn contains(&self, pos: TextSize) -> bool {
        pos >= self.start && self.end.is_none_or(|end| pos < end)
    }
}

/// Manages suppressions for a source file.
#[derive(Debug, Default)]
pub struct SuppressionContext {
    /// Suppression regions indexed by the name used in the directive.
    regions: HashMap<String, Vec<SuppressionRegion>>,
}

impl SuppressionContext {
    /// Create a new empty suppression context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect directives from the comments below `root`.
    pub fn from_tree(source: &str, root: &CstNode) -> Self {
        let mut ctx = Self::new();
        let line_index = LineIndex::from_source_text(source);
        let mut open: HashMap<String, TextSize> = HashMap::new();

        for node in TreeWalker::new(root.inner(), source) {
            if node.is_comment() {
                ctx.process_comment(source, &line_index, &node, &mut open);
            }
        }

        for (rule, start) in open {
            ctx.add_region(SuppressionRegion {
                rule,
                start,
                end: None,
            });
        }

        ctx
    }

    /// Process a single comment for suppression directives.
    fn process_comment(
        &mut self,
        source: &str,
        line_index: &LineIndex,
        comment: &CstNode,
        open: &mut HashMap<String, TextSize>,
    ) {
        let Some(captures) = DIRECTIVE.captures(comment.text()) else {
            return;
        };
        let (Some(action), Some(names)) = (captures.get(1), captures.get(2)) else {
            return;
        };

        let comment_start = comment.range().start();
        let line = line_index.line_index(comment_start);
        let line_start = line_index.line_start(line);
        let trailing = source
            .get(usize::from(line_start)..usize::from(comment_start))
            .is_some_and(|before| !before.trim().is_empty());

        for name in names.as_str().split(',').map(str::trim) {
            match action.as_str() {
                "disable" if trailing => self.add_region(SuppressionRegion {
                    rule: name.to_string(),
                    start: line_start,
                    end: Some(line_index.line_end(line)),
                }),
                "disable" => {
                    open.entry(name.to_string()).or_insert(comment_start);
                }
                _ => {
                    if let Some(start) = open.remove(name) {
                        self.add_region(SuppressionRegion {
                            rule: name.to_string(),
                            start,
                            end: Some(comment_start),
                        });
                    }
                }
            }
        }
    }

    /// Add a suppression region.
    fn add_region(&mut self, region: SuppressionRegion) {
        self.regions
            .entry(region.rule.clone())
            .or_default()
            .push(region);
    }

    /// Check if a diagnostic at the given position for the given rule is suppressed.
    pub fn is_suppressed(&self, rule_name: &str, pos: TextSize) -> bool {
        let department = rule_name.split_once('/').map(|(department, _)| department);

        [Some(rule_name), department, Some(ALL)]
            .into_iter()
            .flatten()
            .filter_map(|key| self.regions.get(key))
            .flatten()
            .any(|region| region.contains(pos))
    }

    /// Check if there are any suppressions.
    pub fn has_suppressions(&self) -> bool {
        !self.regions.is_empty()
    }
}
