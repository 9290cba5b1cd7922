//! Configurable enforced style shared by rules with a `space`/`no_space` option.
//!
//! A rule asks a [`StyleState`] which style to enforce and reports back what
//! it saw at each occurrence. A fixed configuration ignores the reports; a
//! [`StyleDetector`] counts them so that `EnforcedStyle = "detect"` can be
//! resolved to whichever style the code base already uses most.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A concrete spacing style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpaceStyle {
    /// Require surrounding spaces.
    #[default]
    Space,
    /// Require no surrounding spaces.
    NoSpace,
}

impl SpaceStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Space => "space",
            Self::NoSpace => "no_space",
        }
    }
}

impl fmt::Display for SpaceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `EnforcedStyle` option as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnforcedStyle {
    Fixed(SpaceStyle),
    Detect,
}

impl Default for EnforcedStyle {
    fn default() -> Self {
        Self::Fixed(SpaceStyle::default())
    }
}

/// Error for an `EnforcedStyle` value that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown EnforcedStyle '{0}', expected space, no_space or detect")]
pub struct UnknownStyle(pub String);

impl FromStr for EnforcedStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "space" => Ok(Self::Fixed(SpaceStyle::Space)),
            "no_space" => Ok(Self::Fixed(SpaceStyle::NoSpace)),
            "detect" => Ok(Self::Detect),
            other => Err(UnknownStyle(other.to_string())),
        }
    }
}

/// Style configuration as seen by a rule.
pub trait StyleState: fmt::Debug + Send + Sync {
    /// The style to enforce for the current occurrence.
    fn current_style(&self) -> SpaceStyle;

    /// The occurrence matches the current style.
    fn correct_style_detected(&self);

    /// The occurrence matches the opposite style.
    fn opposite_style_detected(&self);

    /// The occurrence matches neither style.
    fn unrecognized_style_detected(&self);
}

/// A style fixed by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedStyle(pub SpaceStyle);

impl StyleState for FixedStyle {
    fn current_style(&self) -> SpaceStyle {
        self.0
    }

    fn correct_style_detected(&self) {}

    fn opposite_style_detected(&self) {}

    fn unrecognized_style_detected(&self) {}
}

/// Counts style signals so the dominant style can be inferred.
///
/// While counting, the rule enforces `provisional`; the signals are relative
/// to it. Safe to share across threads linting different files.
#[derive(Debug, Default)]
pub struct StyleDetector {
    provisional: SpaceStyle,
    correct: AtomicUsize,
    opposite: AtomicUsize,
    unrecognized: AtomicUsize,
}

impl StyleDetector {
    pub fn new(provisional: SpaceStyle) -> Self {
        Self {
            provisional,
            ..Self::default()
        }
    }

    /// Snapshot of everything counted so far.
    pub fn summary(&self) -> DetectedStyles {
        let correct = self.correct.load(Ordering::Relaxed);
        let opposite = self.opposite.load(Ordering::Relaxed);
        let (space, no_space) = match self.provisional {
            SpaceStyle::Space => (correct, opposite),
            SpaceStyle::NoSpace => (opposite, correct),
        };

        DetectedStyles {
            provisional: self.provisional,
            space,
            no_space,
            unrecognized: self.unrecognized.load(Ordering::Relaxed),
        }
    }
}

impl StyleState for StyleDetector {
    fn current_style(&self) -> SpaceStyle {
        self.provisional
    }

    fn correct_style_detected(&self) {
        self.correct.fetch_add(1, Ordering::Relaxed);
    }

    fn opposite_style_detected(&self) {
        self.opposite.fetch_add(1, Ordering::Relaxed);
    }

    fn unrecognized_style_detected(&self) {
        self.unrecognized.fetch_add(1, Ordering::Relaxed);
    }
}

/// Occurrence counts per style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedStyles {
    pub provisional: SpaceStyle,
    pub space: usize,
    pub no_space: usize,
    pub unrecognized: usize,
}

impl DetectedStyles {
    pub fn total(&self) -> usize {
        self.space + self.no_space + self.unrecognized
    }

    /// The style with the most occurrences; ties keep the provisional style.
    pub fn dominant(&self) -> SpaceStyle {
        match self.space.cmp(&self.no_space) {
            std::cmp::Ordering::Greater => SpaceStyle::Space,
            std::cmp::Ordering::Less => SpaceStyle::NoSpace,
            std::cmp::Ordering::Equal => self.provisional,
        }
    }

    /// Whether every occurrence follows one and the same style.
    pub fn is_consistent(&self) -> bool {
        self.unrecognized == 0 && (self.space == 0 || self.no_space == 0)
    }
}
