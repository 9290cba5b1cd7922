//! Resolved rule configuration and config file discovery.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{ConfigError, RblintConfig, RuleMode};

/// File names searched, in order, when no config path is given.
pub const CONFIG_CANDIDATES: &[&str] = &["rblint.toml", ".rblint.toml", "config/rblint.toml"];

/// A configured rule with its properties and mode.
#[derive(Debug, Clone)]
pub struct ConfiguredRule {
    /// The full rule name, e.g. `Layout/SpaceAroundEqualsInParameterDefault`.
    pub name: String,
    /// Options from the rule's table.
    pub properties: HashMap<String, String>,
    /// How to handle violations.
    pub mode: RuleMode,
}

impl ConfiguredRule {
    /// Get a property value by name.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Get properties as a reference map (for FromConfig).
    pub fn properties_ref(&self) -> HashMap<&str, &str> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    /// Check if this rule is enabled.
    pub fn is_enabled(&self) -> bool {
        self.mode != RuleMode::Disabled
    }

    /// Check if this rule should auto-fix.
    pub fn should_fix(&self) -> bool {
        self.mode == RuleMode::Fix
    }
}

/// Builder for locating and loading rblint.toml.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit config path.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Try to find a config file under `root` if no path was given.
    pub fn find_in(mut self, root: impl AsRef<Path>) -> Self {
        if self.path.is_none() {
            self.path = CONFIG_CANDIDATES
                .iter()
                .map(|candidate| root.as_ref().join(candidate))
                .find(|path| path.is_file());
        }
        self
    }

    /// The path that `load` will read, if any.
    pub fn resolved_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load the configuration; `Ok(None)` when no file was found.
    pub fn load(&self) -> Result<Option<RblintConfig>, ConfigError> {
        match &self.path {
            Some(path) => RblintConfig::from_file(path).map(Some),
            None => Ok(None),
        }
    }
}
