//! rblint.toml configuration: which rules run, with what options, and how
//! their violations are handled.

mod configured_rule;
mod rblint_config;

pub use configured_rule::{CONFIG_CANDIDATES, ConfigLoader, ConfiguredRule};
pub use rblint_config::{ConfigError, FixConfig, RblintConfig, RuleMode, RuleTable};
