//! Rule system for Markdown tree to LaTeX conversion.
//!
//! Built-in rendering is an exhaustive match in [`latex`]; user rules added
//! through [`Rules::add`] are checked first and win over it.

pub(crate) mod latex;
mod rule;

pub use rule::{Filter, Rule};

use indexmap::IndexMap;

use crate::node::Element;
use crate::service::LatexOptions;

/// Collection of rules for conversion
pub struct Rules {
    /// Custom rules added by the user (checked in insertion order)
    custom_rules: IndexMap<String, Rule>,
    /// Remove rules (drop the element and its subtree)
    remove_rules: Vec<Filter>,
}

impl Rules {
    /// Create a new Rules instance with no custom rules
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            remove_rules: Vec::new(),
        }
    }

    /// Add a custom rule, replacing any rule registered under the same key
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Add a remove filter
    pub fn remove(&mut self, filter: Filter) {
        self.remove_rules.push(filter);
    }

    /// Number of custom rules
    pub fn len(&self) -> usize {
        self.custom_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.custom_rules.is_empty()
    }

    /// Find the custom rule for an element, if any
    pub fn for_element<'a>(&'a self, element: &Element, options: &LatexOptions) -> Option<&'a Rule> {
        self.custom_rules
            .values()
            .find(|rule| rule.filter.matches(element, options))
    }

    /// Check if an element should be removed
    pub fn should_remove(&self, element: &Element, options: &LatexOptions) -> bool {
        // A matching custom rule takes precedence over removal
        if self.for_element(element, options).is_some() {
            return false;
        }

        self.remove_rules
            .iter()
            .any(|filter| filter.matches(element, options))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
