//! Options for a single view.
//!
//! Every field has a default, so callers only spell out what differs. Options are read
//! from a single YAML document (`ViewOptions::from_yaml_str`) or built in code.

use crate::error::ContextError;
use crate::properties::{Format, Selector};
use crate::responsive::DEFAULT_BREAKPOINT;
use crate::scanner::DEFAULT_MAX_SUBSTITUTIONS;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration consumed by [View](crate::view::View).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewOptions {
    pub environment: String,
    pub format: Format,
    pub version: Option<String>,
    /// Use short generated class names (`m1`) instead of readable ones
    pub obfuscate_classes: bool,
    /// Mobile breakpoint in pixels
    pub breakpoint: u32,
    /// Substitution bound for scanning a single line
    pub max_substitutions: usize,
    /// Root directory for resource existence checks; `None` disables them
    pub assets_root: Option<PathBuf>,
}

impl ViewOptions {
    pub fn from_yaml_str(source: &str) -> Result<Self, ContextError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The property scopes this view resolves against.
    pub fn selector(&self) -> Selector {
        Selector {
            environment: self.environment.clone(),
            format: self.format,
            version: self.version.clone(),
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            format: Format::Email,
            version: None,
            obfuscate_classes: false,
            breakpoint: DEFAULT_BREAKPOINT,
            max_substitutions: DEFAULT_MAX_SUBSTITUTIONS,
            assets_root: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ViewOptions::default();
        assert_eq!(options.environment, "development");
        assert_eq!(options.format, Format::Email);
        assert_eq!(options.breakpoint, 480);
        assert_eq!(options.max_substitutions, 1000);
        assert!(!options.obfuscate_classes);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let options =
            ViewOptions::from_yaml_str("environment: production\nformat: browser\nbreakpoint: 600\n")
                .unwrap();
        assert_eq!(options.environment, "production");
        assert_eq!(options.format, Format::Browser);
        assert_eq!(options.breakpoint, 600);
        assert_eq!(options.max_substitutions, 1000);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(ViewOptions::from_yaml_str("colour: blue\n").is_err());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ViewOptions::from_yaml_str("").unwrap(), ViewOptions::default());
    }

    #[test]
    fn test_selector() {
        let options = ViewOptions::default()
            .with_environment("preview")
            .with_format(Format::Text)
            .with_version("b");
        let selector = options.selector();
        assert_eq!(selector.environment, "preview");
        assert_eq!(selector.format, Format::Text);
        assert_eq!(selector.version.as_deref(), Some("b"));
    }
}
