//! Parser for rblint.toml configuration files.
//!
//! Each rule gets a table keyed by its full name. `mode` controls how
//! violations are handled; every other key is passed to the rule as a
//! string property. Example:
//!
//! ```toml
//! [fix]
//! unsafe_fixes = false
//!
//! [rules."Layout/SpaceAroundEqualsInParameterDefault"]
//! mode = "fix"
//! EnforcedStyle = "no_space"
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::ConfiguredRule;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// How a rule should handle violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleMode {
    /// Auto-fix violations (default for fixable rules).
    #[default]
    Fix,
    /// Only check/report violations, don't fix.
    Check,
    /// Show fix suggestion, require confirmation.
    Suggest,
    /// Skip the rule entirely.
    Disabled,
}

impl<'de> Deserialize<'de> for RuleMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "fix" => Ok(RuleMode::Fix),
            "check" => Ok(RuleMode::Check),
            "suggest" => Ok(RuleMode::Suggest),
            "disabled" | "disable" | "off" => Ok(RuleMode::Disabled),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid rule mode: {}. Expected fix, check, suggest, or disabled",
                s
            ))),
        }
    }
}

/// Fix-related configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FixConfig {
    /// Whether to apply unsafe fixes without --unsafe flag.
    #[serde(default)]
    pub unsafe_fixes: bool,
}

/// A `[rules."Name"]` table.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RuleTable {
    #[serde(default)]
    pub mode: RuleMode,

    /// Rule-specific options such as `EnforcedStyle`.
    #[serde(flatten)]
    pub options: BTreeMap<String, toml::Value>,
}

impl RuleTable {
    /// Options as strings; non-string TOML values use their TOML spelling.
    pub fn properties(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.options.iter().map(|(key, value)| {
            let value = match value {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
    }
}

/// Root rblint.toml configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RblintConfig {
    /// Fix behavior configuration.
    #[serde(default)]
    pub fix: FixConfig,

    /// Per-rule tables.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleTable>,
}

impl RblintConfig {
    /// Parse a rblint.toml file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse rblint.toml content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Get the mode for a specific rule.
    /// Unlisted rules and `Enabled = false` tables resolve as expected.
    pub fn rule_mode(&self, rule_name: &str) -> RuleMode {
        let Some(table) = self.rules.get(rule_name) else {
            return RuleMode::Fix;
        };
        match table.options.get("Enabled") {
            Some(toml::Value::Boolean(false)) => RuleMode::Disabled,
            _ => table.mode,
        }
    }

    /// Check if a rule is enabled.
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rule_mode(rule_name) != RuleMode::Disabled
    }

    /// Check if a rule should be auto-fixed.
    pub fn should_fix(&self, rule_name: &str) -> bool {
        self.rule_mode(rule_name) == RuleMode::Fix
    }

    /// Every configured rule with its properties and mode.
    pub fn configured_rules(&self) -> Vec<ConfiguredRule> {
        self.rules
            .iter()
            .map(|(name, table)| ConfiguredRule {
                name: name.clone(),
                properties: table.properties().collect(),
                mode: self.rule_mode(name),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = RblintConfig::parse("").unwrap();
        assert!(!config.fix.unsafe_fixes);
        assert!(config.rules.is_empty());
        assert_eq!(
            config.rule_mode("Layout/SpaceAroundEqualsInParameterDefault"),
            RuleMode::Fix
        );
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[fix]
unsafe_fixes = true

[rules."Layout/SpaceAroundEqualsInParameterDefault"]
mode = "check"
EnforcedStyle = "no_space"

[rules."Layout/Other"]
mode = "disabled"
"#;

        let config = RblintConfig::parse(toml).unwrap();

        assert!(config.fix.unsafe_fixes);
        assert_eq!(
            config.rule_mode("Layout/SpaceAroundEqualsInParameterDefault"),
            RuleMode::Check
        );
        assert_eq!(config.rule_mode("Layout/Other"), RuleMode::Disabled);
        assert_eq!(config.rule_mode("UnknownRule"), RuleMode::Fix);

        assert!(!config.should_fix("Layout/SpaceAroundEqualsInParameterDefault"));
        assert!(!config.is_rule_enabled("Layout/Other"));

        let rules = config.configured_rules();
        let rule = rules
            .iter()
            .find(|r| r.name == "Layout/SpaceAroundEqualsInParameterDefault")
            .unwrap();
        assert_eq!(rule.property("EnforcedStyle"), Some("no_space"));
        assert_eq!(rule.property("mode"), None);
    }

    #[test]
    fn test_enabled_false_disables_rule() {
        let toml = r#"
[rules."Layout/SpaceAroundEqualsInParameterDefault"]
Enabled = false
"#;
        let config = RblintConfig::parse(toml).unwrap();
        assert!(!config.is_rule_enabled("Layout/SpaceAroundEqualsInParameterDefault"));

        let rules = config.configured_rules();
        assert_eq!(rules[0].property("Enabled"), Some("false"));
    }

    #[test]
    fn test_rule_mode_case_insensitive() {
        let toml = r#"
[rules.Rule1]
mode = "FIX"
[rules.Rule2]
mode = "CHECK"
[rules.Rule3]
mode = "off"
"#;

        let config = RblintConfig::parse(toml).unwrap();
        assert_eq!(config.rule_mode("Rule1"), RuleMode::Fix);
        assert_eq!(config.rule_mode("Rule2"), RuleMode::Check);
        assert_eq!(config.rule_mode("Rule3"), RuleMode::Disabled);
    }

    #[test]
    fn test_invalid_mode_is_an_error() {
        let toml = r#"
[rules.Rule1]
mode = "sometimes"
"#;
        assert!(matches!(
            RblintConfig::parse(toml),
            Err(ConfigError::Toml(_))
        ));
    }
}
