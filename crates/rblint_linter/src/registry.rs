//! Rule registry for mapping configured rule names to rule implementations.

use std::collections::HashMap;

use crate::Rule;

/// Properties from a rule's configuration table.
pub type Properties<'a> = HashMap<&'a str, &'a str>;

/// Trait for rules that can be constructed from config properties.
pub trait FromConfig: Rule + Sized {
    /// The full rule name used as the configuration key.
    const MODULE_NAME: &'static str;

    /// Create a rule instance from config properties.
    fn from_config(properties: &Properties) -> Self;
}

/// A factory function that creates a boxed rule from properties.
type RuleFactory = fn(&Properties) -> Box<dyn Rule>;

/// Registry mapping rule names to rule factories.
pub struct RuleRegistry {
    factories: HashMap<&'static str, RuleFactory>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry with all built-in rules registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Register a rule type that implements FromConfig.
    pub fn register<R: FromConfig + 'static>(&mut self) {
        self.factories
            .insert(R::MODULE_NAME, |props| Box::new(R::from_config(props)));
    }

    /// Register all built-in rules.
    fn register_builtins(&mut self) {
        use crate::rules::SpaceAroundEqualsInParameterDefault;
        // Layout rules
        self.register::<SpaceAroundEqualsInParameterDefault>();
    }

    /// Create a rule from a rule name and properties.
    /// Returns None if the name is not recognized.
    pub fn create_rule(&self, module_name: &str, properties: &Properties) -> Option<Box<dyn Rule>> {
        self.factories
            .get(module_name)
            .map(|factory| factory(properties))
    }

    /// Build every registered rule with default properties.
    pub fn default_rules(&self) -> Vec<Box<dyn Rule>> {
        let props = Properties::new();
        let mut names: Vec<_> = self.module_names().collect();
        names.sort_unstable();
        names
            .into_iter()
            .filter_map(|name| self.create_rule(name, &props))
            .collect()
    }

    /// Check if a rule name is registered.
    pub fn has_rule(&self, module_name: &str) -> bool {
        self.factories.contains_key(module_name)
    }

    /// Get all registered rule names.
    pub fn module_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
