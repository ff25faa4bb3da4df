//! Fatal error types.
//!
//! Only two things abort a render: an expansion that does not converge, and a
//! context that cannot be built. Everything else is reported through
//! [Diagnostics](crate::diagnostics::Diagnostics) and rendering carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Structural failure while expanding source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The scanner hit its substitution bound before running out of expressions.
    #[error("expansion did not converge after {limit} substitutions{}: {excerpt}", line_suffix(.line))]
    NonConvergent {
        line: Option<usize>,
        limit: usize,
        excerpt: String,
    },
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" on line {line}"),
        None => String::new(),
    }
}

/// Failure while building the property source or view options.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{layer} must be a mapping of keys to values")]
    NotAMapping { layer: String },
}
