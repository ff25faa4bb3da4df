//! Responsive rule registry
//!
//! Renderers register class-scoped CSS declarations that only apply below the mobile
//! breakpoint. Many call sites can ask for the same rule, so the registry deduplicates
//! by class name and emits everything once, as a single media query, at the end of the
//! render.
//!
//! Registration paths
//!
//!     Ad-hoc rules are active as soon as they are registered. Preset rules start inactive
//!     and only become active once a renderer puts their class on a concrete element
//!     ([MediaQuery::activate]). Inactive rules never reach the output.
//!
//! Dedup and conflicts
//!
//!     Re-registering a class with the same declaration text is a no-op that hands back the
//!     existing rule. Different declaration text under a used class name is a
//!     [RuleConflict] and leaves the original untouched. Declarations are compared
//!     verbatim, so reordered but equivalent declarations still conflict.

pub mod naming;
pub mod presets;

use std::collections::HashMap;
use std::fmt::Write;
use thiserror::Error;

pub use naming::{ClassNamer, MOBILE_BUCKET};

/// Default mobile breakpoint, in pixels
pub const DEFAULT_BREAKPOINT: u32 = 480;

/// A single class-scoped CSS rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub tag: String,
    pub class_name: String,
    pub declarations: String,
    pub active: bool,
}

impl Rule {
    /// An ad-hoc rule, active immediately.
    pub fn new(
        tag: impl Into<String>,
        class_name: impl Into<String>,
        declarations: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            class_name: class_name.into(),
            declarations: declarations.into(),
            active: true,
        }
    }

    /// A named preset, inactive until referenced.
    pub fn preset(
        tag: impl Into<String>,
        class_name: impl Into<String>,
        declarations: impl Into<String>,
    ) -> Self {
        Self {
            active: false,
            ..Self::new(tag, class_name, declarations)
        }
    }

    pub fn selector(&self) -> String {
        format!("{}[class~=\"{}\"]", self.tag, self.class_name)
    }

    pub fn to_css(&self) -> String {
        format!("{} {{ {} }}", self.selector(), self.declarations)
    }
}

/// A class name already carries different declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("class \"{class_name}\" is already defined as \"{existing}\", cannot redefine it as \"{attempted}\"")]
pub struct RuleConflict {
    pub class_name: String,
    pub existing: String,
    pub attempted: String,
}

/// The rules collected for one render, below one breakpoint.
#[derive(Debug, Clone)]
pub struct MediaQuery {
    breakpoint: u32,
    rules: Vec<Rule>,
    by_class: HashMap<String, usize>,
}

impl MediaQuery {
    pub fn new(breakpoint: u32) -> Self {
        Self {
            breakpoint,
            rules: Vec::new(),
            by_class: HashMap::new(),
        }
    }

    /// Register a rule; see the module docs for dedup and conflict behavior.
    pub fn register(&mut self, rule: Rule) -> Result<&Rule, RuleConflict> {
        if let Some(&index) = self.by_class.get(&rule.class_name) {
            let existing = &self.rules[index];
            if existing.declarations != rule.declarations {
                return Err(RuleConflict {
                    class_name: rule.class_name,
                    existing: existing.declarations.clone(),
                    attempted: rule.declarations,
                });
            }
            return Ok(existing);
        }

        let index = self.rules.len();
        self.by_class.insert(rule.class_name.clone(), index);
        self.rules.push(rule);
        Ok(&self.rules[index])
    }

    pub fn find(&self, class_name: &str) -> Option<&Rule> {
        self.by_class.get(class_name).map(|&index| &self.rules[index])
    }

    /// The first rule for `tag` whose declarations match verbatim.
    pub fn find_by_declarations(&self, tag: &str, declarations: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|rule| rule.tag == tag && rule.declarations == declarations)
    }

    /// Mark the rule for `class_name` active. Returns false when no such rule exists.
    pub fn activate(&mut self, class_name: &str) -> bool {
        match self.by_class.get(class_name) {
            Some(&index) => {
                self.rules[index].active = true;
                true
            }
            None => false,
        }
    }

    /// All registered rules in registration order, active or not.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// One media query block holding the active rules in registration order.
    /// Empty when no rule is active.
    pub fn to_css(&self) -> String {
        let mut active = self.rules.iter().filter(|rule| rule.active).peekable();
        if active.peek().is_none() {
            return String::new();
        }

        let mut css = format!("@media (max-width: {}px) {{\n", self.breakpoint);
        for rule in active {
            let _ = writeln!(css, "  {}", rule.to_css());
        }
        css.push('}');
        css
    }
}

impl Default for MediaQuery {
    fn default() -> Self {
        Self::new(DEFAULT_BREAKPOINT)
    }
}
