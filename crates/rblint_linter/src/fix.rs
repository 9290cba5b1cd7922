//! Applying diagnostic fixes to source text.

use rblint_diagnostics::{Applicability, Diagnostic, Edit};

/// Result of applying fixes to one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// The rewritten source.
    pub source: String,
    /// Diagnostics whose fix was applied.
    pub fixed: usize,
    /// Diagnostics without an applicable fix, or whose fix overlapped another.
    pub unfixable: usize,
}

impl FixOutcome {
    pub fn changed(&self) -> bool {
        self.fixed > 0
    }
}

/// Apply every fix that meets `applicability`.
///
/// When fixes overlap the one starting later wins; the others are left for
/// a subsequent pass.
pub fn apply_fixes<'d>(
    source: &str,
    diagnostics: impl IntoIterator<Item = &'d Diagnostic>,
    applicability: Applicability,
) -> FixOutcome {
    let mut fixes: Vec<&[Edit]> = Vec::new();
    let mut unfixable = 0;

    for diagnostic in diagnostics {
        match &diagnostic.fix {
            Some(fix) if fix.applies(applicability) && !fix.edits().is_empty() => {
                fixes.push(fix.edits());
            }
            _ => unfixable += 1,
        }
    }

    // Sort fixes by position (descending) to apply from end to start
    fixes.sort_by_key(|edits| std::cmp::Reverse(edits[0].start()));

    let mut accepted: Vec<&Edit> = Vec::new();
    let mut fixed = 0;
    for edits in fixes {
        if overlaps_accepted(edits, &accepted) {
            unfixable += 1;
            continue;
        }
        accepted.extend(edits);
        fixed += 1;
    }

    accepted.sort_by_key(|edit| std::cmp::Reverse(edit.start()));

    FixOutcome {
        source: apply_edits(source, &accepted),
        fixed,
        unfixable,
    }
}

/// Whether any of `edits` touches a range already claimed by an accepted edit.
fn overlaps_accepted(edits: &[Edit], accepted: &[&Edit]) -> bool {
    edits.iter().any(|edit| {
        accepted
            .iter()
            .any(|existing| edit.start() < existing.end() && existing.start() < edit.end())
    })
}

/// Apply edits to source text.
///
/// Edits must be sorted descending by start position.
fn apply_edits(source: &str, edits: &[&Edit]) -> String {
    let mut result = source.to_string();

    for edit in edits {
        let start = usize::from(edit.start());
        let end = usize::from(edit.end());
        let content = edit.content().unwrap_or("");

        result.replace_range(start..end, content);
    }

    result
}
