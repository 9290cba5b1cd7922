//! SpaceAroundEqualsInParameterDefault rule implementation.
//!
//! Checks that the `=` of an optional parameter's default value has, or does
//! not have, surrounding space depending on `EnforcedStyle`:
//!
//! ```ruby
//! # EnforcedStyle: space (default)
//! def some_method(arg1=:default, arg2=nil, arg3=[])   # bad
//! def some_method(arg1 = :default, arg2 = nil, arg3 = []) # good
//!
//! # EnforcedStyle: no_space
//! def some_method(arg1 = :default, arg2 = nil, arg3 = []) # bad
//! def some_method(arg1=:default, arg2=nil, arg3=[])   # good
//! ```
//!
//! Method, block and lambda parameters are all checked.

use std::sync::Arc;

use lazy_static::lazy_static;
use rblint_diagnostics::{Diagnostic, Edit, Fix, FixAvailability, Violation};
use rblint_ruby_cst::{CstNode, OptionalParameter, Token};
use regex::Regex;
use text_size::TextRange;

use crate::enforced_style::{EnforcedStyle, FixedStyle, SpaceStyle, StyleDetector, StyleState};
use crate::rules::layout::common::space_between;
use crate::{CheckContext, FromConfig, Properties, Rule};

lazy_static! {
    static ref PLAIN_EQUALS: Regex = Regex::new(r"^\s*=\s*$").unwrap();
}

const RELEVANT_KINDS: &[&str] = &[OptionalParameter::KIND];

/// Spacing around the `=` of one default value assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingState {
    /// Whitespace on both sides: `a = 1`.
    BothSpaced,
    /// No whitespace on either side: `a=1`.
    NoneSpaced,
    /// Whitespace on exactly one side: `a =1`, `a= 1`.
    Mixed,
}

impl SpacingState {
    pub fn from_sides(space_before: bool, space_after: bool) -> Self {
        match (space_before, space_after) {
            (true, true) => Self::BothSpaced,
            (false, false) => Self::NoneSpaced,
            _ => Self::Mixed,
        }
    }

    /// Classify the spacing of `name`, `=`, `value`.
    pub fn classify(source: &str, name: TextRange, equals: TextRange, value: TextRange) -> Self {
        Self::from_sides(
            space_between(source, name, equals),
            space_between(source, equals, value),
        )
    }
}

/// How one occurrence relates to the enforced style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleVerdict {
    /// Matches the enforced style.
    Correct,
    /// Consistently uses the other style.
    Opposite,
    /// Matches neither style.
    Unrecognized,
}

impl StyleVerdict {
    pub fn evaluate(style: SpaceStyle, state: SpacingState) -> Self {
        match (style, state) {
            (SpaceStyle::Space, SpacingState::BothSpaced)
            | (SpaceStyle::NoSpace, SpacingState::NoneSpaced) => Self::Correct,
            (SpaceStyle::Space, SpacingState::NoneSpaced)
            | (SpaceStyle::NoSpace, SpacingState::BothSpaced) => Self::Opposite,
            (_, SpacingState::Mixed) => Self::Unrecognized,
        }
    }

    /// Forward this verdict to the style state.
    fn report(self, state: &dyn StyleState) {
        match self {
            Self::Correct => state.correct_style_detected(),
            Self::Opposite => state.opposite_style_detected(),
            Self::Unrecognized => state.unrecognized_style_detected(),
        }
    }
}

/// Violation: spacing around a default value `=` does not match the style.
#[derive(Debug, Clone)]
pub struct DefaultValueSpacing {
    pub style: SpaceStyle,
}

impl Violation for DefaultValueSpacing {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

    fn message(&self) -> String {
        let kind = match self.style {
            SpaceStyle::Space => "missing",
            SpaceStyle::NoSpace => "detected",
        };
        format!("Surrounding space {kind} in default value assignment.")
    }

    fn fix_title(&self) -> Option<String> {
        Some(match self.style {
            SpaceStyle::Space => "Surround `=` with single spaces".to_string(),
            SpaceStyle::NoSpace => "Remove spaces around `=`".to_string(),
        })
    }
}

/// Replacement text for the gap between a parameter name and its default value.
///
/// Only a lone `=` padded with plain whitespace is rewritten. Gaps holding a
/// comment or a line continuation return None.
pub fn corrected_gap(style: SpaceStyle, gap: &str) -> Option<String> {
    if !PLAIN_EQUALS.is_match(gap) {
        return None;
    }
    let equals = match style {
        SpaceStyle::Space => " = ",
        SpaceStyle::NoSpace => "=",
    };
    Some(equals.to_string())
}

/// Configuration for SpaceAroundEqualsInParameterDefault rule.
#[derive(Debug, Clone)]
pub struct SpaceAroundEqualsInParameterDefault {
    style_state: Arc<dyn StyleState>,
}

impl Default for SpaceAroundEqualsInParameterDefault {
    fn default() -> Self {
        Self::new(SpaceStyle::Space)
    }
}

impl SpaceAroundEqualsInParameterDefault {
    /// Enforce a fixed style.
    pub fn new(style: SpaceStyle) -> Self {
        Self::with_style_state(Arc::new(FixedStyle(style)))
    }

    /// Enforce whatever `state` reports and send it the style signals.
    pub fn with_style_state(style_state: Arc<dyn StyleState>) -> Self {
        Self { style_state }
    }

    pub fn style(&self) -> SpaceStyle {
        self.style_state.current_style()
    }

    /// Locate the last token of the name, the `=` and the first token of the value.
    fn optional_param_tokens<'a>(
        ctx: &'a CheckContext,
        param: &OptionalParameter,
    ) -> Option<[Token<'a>; 3]> {
        let tokens = ctx
            .tokens()
            .index_of_first_token(param.range().start())
            .and_then(|index| ctx.tokens().window(index, 3));

        let Some(&[arg, equals, first]) = tokens else {
            tracing::warn!(
                offset = u32::from(param.range().start()),
                "fewer than three tokens after optional parameter, skipping"
            );
            return None;
        };

        if arg.range().end() != param.name().range().end()
            || !equals.is("=")
            || first.range().start() != param.value().range().start()
        {
            tracing::warn!(
                offset = u32::from(param.range().start()),
                name = arg.text(),
                operator = equals.text(),
                "optional parameter tokens are misaligned, skipping"
            );
            return None;
        }

        Some([arg, equals, first])
    }

    fn diagnostic(&self, ctx: &CheckContext, range: TextRange, style: SpaceStyle) -> Diagnostic {
        let diagnostic = Diagnostic::new(DefaultValueSpacing { style }, range);
        match corrected_gap(style, ctx.text_at(range)) {
            Some(replacement) => {
                diagnostic.with_fix(Fix::safe_edit(Edit::range_replacement(replacement, range)))
            }
            None => diagnostic,
        }
    }
}

impl FromConfig for SpaceAroundEqualsInParameterDefault {
    const MODULE_NAME: &'static str = "Layout/SpaceAroundEqualsInParameterDefault";

    fn from_config(properties: &Properties) -> Self {
        let enforced = properties
            .get("EnforcedStyle")
            .map_or(Ok(EnforcedStyle::default()), |s| s.parse::<EnforcedStyle>())
            .unwrap_or_else(|err| {
                tracing::warn!(rule = Self::MODULE_NAME, "{err}, using space");
                EnforcedStyle::default()
            });

        match enforced {
            EnforcedStyle::Fixed(style) => Self::new(style),
            EnforcedStyle::Detect => {
                Self::with_style_state(Arc::new(StyleDetector::new(SpaceStyle::default())))
            }
        }
    }
}

impl Rule for SpaceAroundEqualsInParameterDefault {
    fn name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn relevant_kinds(&self) -> &'static [&'static str] {
        RELEVANT_KINDS
    }

    fn check(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let Some(param) = OptionalParameter::cast(*node) else {
            return vec![];
        };

        let Some([arg, equals, value]) = Self::optional_param_tokens(ctx, &param) else {
            return vec![];
        };

        let state = SpacingState::classify(ctx.source(), arg.range(), equals.range(), value.range());
        let style = self.style();
        let verdict = StyleVerdict::evaluate(style, state);
        verdict.report(self.style_state.as_ref());

        if verdict == StyleVerdict::Correct {
            return vec![];
        }

        let range = TextRange::new(arg.range().end(), value.range().start());
        vec![self.diagnostic(ctx, range, style)]
    }
}
