//! Layered property resolution
//!
//! Properties are named values looked up through a stack of scopes. The property source
//! is one nested mapping: plain keys at the top level are global defaults, and nested
//! mappings keyed by an environment, format or version name hold overrides.
//!
//!     title: Newsletter               # global default
//!     footer: true
//!     production:                     # environment
//!         title: Our Newsletter
//!         email:                      # format within environment
//!             footer: false
//!         spring:                     # version within environment
//!             title: Spring Newsletter
//!     spring:                         # version, any environment
//!         hero: spring.png
//!
//! Scopes, most specific first:
//!
//!     1. version within the current environment
//!     2. version at the top level
//!     3. format within the current environment
//!     4. environment
//!     5. global default
//!
//! The first scope where the key is present wins. Null counts as absent; an explicit
//! `false` is present and never falls through to a less specific scope.

use crate::error::ContextError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// A property value as read from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Table(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_table(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Text used when the value is substituted into output. Null, lists and tables have none.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null | Value::List(_) | Value::Table(_) => None,
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Integer(number) => Some(number.to_string()),
            Value::Float(number) => Some(number.to_string()),
            Value::Text(text) => Some(text.clone()),
        }
    }

    /// `true`, `"true"` and `1` are enabled; everything else is not.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Value::Bool(true) | Value::Integer(1))
            || matches!(self, Value::Text(text) if text == "true")
    }

    /// Only an explicit `false` or `"false"` is disabled.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Value::Bool(false)) || matches!(self, Value::Text(text) if text == "false")
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Integer(number)
    }
}

/// Output format of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Email,
    Browser,
    Text,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Email => "email",
            Format::Browser => "browser",
            Format::Text => "text",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The caller-supplied nested key/value structure. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySource {
    root: BTreeMap<String, Value>,
}

impl PropertySource {
    pub fn new(root: BTreeMap<String, Value>) -> Self {
        Self { root }
    }

    /// Build from a value, which must be a mapping.
    pub fn from_value(value: Value) -> Result<Self, ContextError> {
        match value {
            Value::Table(root) => Ok(Self { root }),
            Value::Null => Ok(Self::default()),
            _ => Err(ContextError::NotAMapping {
                layer: "property source".to_string(),
            }),
        }
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ContextError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_yaml::from_str(source)?;
        Self::from_value(value)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ContextError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    /// Read a source file; `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ContextError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ContextError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    pub fn root(&self) -> &BTreeMap<String, Value> {
        &self.root
    }
}

/// Which environment, format and version a context resolves for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    pub environment: String,
    pub format: Format,
    pub version: Option<String>,
}

/// Resolves keys against the scopes of one environment × format × version view.
#[derive(Debug, Clone)]
pub struct PropertyContext {
    source: PropertySource,
    selector: Selector,
}

impl PropertyContext {
    /// Build a context, checking that every selected override layer is a mapping.
    pub fn new(source: PropertySource, selector: Selector) -> Result<Self, ContextError> {
        let context = Self { source, selector };
        for (layer, value) in context.layers() {
            if !matches!(value, Value::Table(_) | Value::Null) {
                return Err(ContextError::NotAMapping { layer });
            }
        }
        Ok(context)
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Nested override layers selected by this context, most specific first.
    fn layers(&self) -> Vec<(String, &Value)> {
        let root = self.source.root();
        let environment_name = &self.selector.environment;
        let environment = root.get(environment_name);
        let mut layers = Vec::new();

        if let Some(version) = &self.selector.version {
            if let Some(value) = environment
                .and_then(Value::as_table)
                .and_then(|table| table.get(version))
            {
                layers.push((format!("{}.{}", environment_name, version), value));
            }
            if let Some(value) = root.get(version) {
                layers.push((version.clone(), value));
            }
        }

        let format = self.selector.format.as_str();
        if let Some(value) = environment
            .and_then(Value::as_table)
            .and_then(|table| table.get(format))
        {
            layers.push((format!("{}.{}", environment_name, format), value));
        }

        if let Some(value) = environment {
            layers.push((environment_name.clone(), value));
        }

        layers
    }

    /// Resolve `key`, returning the value from the most specific scope that defines it.
    pub fn resolve(&self, key: &str) -> Option<&Value> {
        self.layers()
            .into_iter()
            .filter_map(|(_, layer)| layer.as_table())
            .chain(std::iter::once(self.source.root()))
            .filter_map(|table| table.get(key))
            .find(|value| !value.is_null())
    }

    pub fn resolve_text(&self, key: &str) -> Option<String> {
        self.resolve(key).and_then(Value::to_text)
    }

    pub fn is_enabled(&self, key: &str) -> bool {
        self.resolve(key).is_some_and(Value::is_enabled)
    }

    pub fn is_disabled(&self, key: &str) -> bool {
        self.resolve(key).is_some_and(Value::is_disabled)
    }
}
