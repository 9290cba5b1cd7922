//! Offences reported by rules.

use text_size::{TextRange, TextSize};

use crate::Fix;

/// Whether a violation's rule can produce a fix.
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq)]
pub enum FixAvailability {
    Always,
    /// Only some occurrences can be corrected without changing meaning.
    Sometimes,
    #[default]
    None,
}

/// An offence type a rule reports, such as a spacing mismatch.
pub trait Violation: std::fmt::Debug + Clone + Send + Sync {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::None;

    /// The offence message printed next to the location.
    fn message(&self) -> String;

    /// What the correction does, for violations that can be fixed.
    fn fix_title(&self) -> Option<String> {
        None
    }
}

/// The code, message and suggested correction of a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticKind {
    /// The violation type name, e.g. `DefaultValueSpacing`.
    pub code: String,
    pub body: String,
    pub suggestion: Option<String>,
}

impl DiagnosticKind {
    pub fn from_violation<V: Violation>(violation: &V) -> Self {
        let code = std::any::type_name::<V>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown")
            .to_string();
        let suggestion = match V::FIX_AVAILABILITY {
            FixAvailability::None => None,
            FixAvailability::Always | FixAvailability::Sometimes => violation.fix_title(),
        };
        Self {
            code,
            body: violation.message(),
            suggestion,
        }
    }
}

/// One offence at a source range, with its correction when one is safe to build.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub range: TextRange,
    pub fix: Option<Fix>,
}

impl Diagnostic {
    #[allow(clippy::needless_pass_by_value)]
    pub fn new<V: Violation>(violation: V, range: TextRange) -> Self {
        Self {
            kind: DiagnosticKind::from_violation(&violation),
            range,
            fix: None,
        }
    }

    #[must_use]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Offset the diagnostic is located and sorted at.
    pub fn start(&self) -> TextSize {
        self.range.start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Edit;

    #[derive(Debug, Clone)]
    struct TrailingSpace;

    impl Violation for TrailingSpace {
        const FIX_AVAILABILITY: FixAvailability = FixAvailability::Always;

        fn message(&self) -> String {
            "Trailing whitespace detected.".to_string()
        }

        fn fix_title(&self) -> Option<String> {
            Some("Remove trailing whitespace".to_string())
        }
    }

    #[derive(Debug, Clone)]
    struct LineTooLong;

    impl Violation for LineTooLong {
        fn message(&self) -> String {
            "Line is too long.".to_string()
        }

        fn fix_title(&self) -> Option<String> {
            Some("Shorten the line".to_string())
        }
    }

    #[test]
    fn test_kind_from_violation() {
        let range = TextRange::new(3.into(), 5.into());
        let diagnostic = Diagnostic::new(TrailingSpace, range);

        assert_eq!(diagnostic.kind.code, "TrailingSpace");
        assert_eq!(diagnostic.kind.body, "Trailing whitespace detected.");
        assert_eq!(
            diagnostic.kind.suggestion.as_deref(),
            Some("Remove trailing whitespace")
        );
        assert_eq!(diagnostic.start(), TextSize::new(3));
        assert!(diagnostic.fix.is_none());

        let diagnostic = diagnostic.with_fix(Fix::safe_edit(Edit::range_deletion(range)));
        assert!(diagnostic.fix.is_some());
    }

    #[test]
    fn test_unfixable_violation_has_no_suggestion() {
        let diagnostic = Diagnostic::new(LineTooLong, TextRange::empty(0.into()));
        assert_eq!(diagnostic.kind.code, "LineTooLong");
        assert!(diagnostic.kind.suggestion.is_none());
    }
}
