//! Expression scanner
//!
//! Finds bracket expressions in source text and rewrites them to a fixed point.
//!
//! Matching
//!
//!     The matcher only finds *non-nested* groups: a `{` followed by an interior with no
//!     further bracket characters and a closing `}`. Nested composition therefore resolves
//!     innermost-first without any recursive descent:
//!
//!         {a {b}}    pass 1 matches {b}, pass 2 matches the rewritten {a ...}
//!
//! Substitution
//!
//!     Each iteration replaces the leftmost match with whatever the resolver returns (or
//!     nothing) and rescans the mutated text from the start. Text returned by a resolver may
//!     carry new expressions; being leftmost, they are expanded before anything to their
//!     right, which keeps open and close tags in source order. Every substitution counts
//!     against a bound, and exceeding it is a [RenderError::NonConvergent].

use crate::error::RenderError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default matcher for `{...}` groups whose interior holds no brackets
static BRACKET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());

/// Default bound on substitutions for one scan
pub const DEFAULT_MAX_SUBSTITUTIONS: usize = 1000;

const EXCERPT_LEN: usize = 80;

/// The head token and raw parameter string of a matched expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag name without the closing slash
    pub name: String,
    /// Whether the head token was `/`-prefixed
    pub closing: bool,
    /// Everything after the head token, untokenized
    pub raw_params: String,
}

impl Tag {
    /// Split an expression interior into its head token and parameter string.
    pub fn parse(interior: &str) -> Self {
        let interior = interior.trim();
        let (head, rest) = match interior.find([' ', '\t']) {
            Some(split) => (&interior[..split], interior[split..].trim_start()),
            None => (interior, ""),
        };
        let (name, closing) = match head.strip_prefix('/') {
            Some(name) => (name, true),
            None => (head, false),
        };
        Tag {
            name: name.to_string(),
            closing,
            raw_params: rest.to_string(),
        }
    }

    /// The head token as written, including the closing slash.
    pub fn token(&self) -> String {
        if self.closing {
            format!("/{}", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Result of expanding one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    /// Number of resolver invocations it took to reach the fixed point
    pub substitutions: usize,
}

/// Rewrites bracket expressions until none remain.
#[derive(Debug, Clone)]
pub struct Scanner {
    matcher: Regex,
    max_substitutions: usize,
}

impl Scanner {
    /// Scanner with the default `{...}` matcher and bound.
    pub fn new() -> Self {
        Self {
            matcher: BRACKET_REGEX.clone(),
            max_substitutions: DEFAULT_MAX_SUBSTITUTIONS,
        }
    }

    /// Use a custom matcher. Its first capture group must be the expression interior.
    pub fn with_matcher(mut self, matcher: Regex) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_max_substitutions(mut self, max_substitutions: usize) -> Self {
        self.max_substitutions = max_substitutions;
        self
    }

    pub fn max_substitutions(&self) -> usize {
        self.max_substitutions
    }

    /// Expand `source` to a fixed point.
    ///
    /// `resolve` receives the interior of each match and returns its replacement;
    /// `None` replaces the expression with nothing. `line` is only used to attribute
    /// a non-convergence failure.
    pub fn expand<F>(
        &self,
        source: &str,
        line: Option<usize>,
        mut resolve: F,
    ) -> Result<Expansion, RenderError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut text = source.to_string();
        let mut substitutions = 0;

        loop {
            let (span, interior) = match self.matcher.captures(&text) {
                Some(captures) => {
                    let whole = match captures.get(0) {
                        Some(whole) => whole.range(),
                        None => break,
                    };
                    let interior = captures
                        .get(1)
                        .map(|group| group.as_str().to_string())
                        .unwrap_or_default();
                    (whole, interior)
                }
                None => break,
            };

            if substitutions >= self.max_substitutions {
                log::error!(
                    "expansion did not converge after {} substitutions",
                    substitutions
                );
                return Err(RenderError::NonConvergent {
                    line,
                    limit: self.max_substitutions,
                    excerpt: excerpt(&text[span.start..]),
                });
            }

            let replacement = resolve(&interior).unwrap_or_default();
            log::debug!("{{{}}} -> {:?}", interior, replacement);
            text.replace_range(span, &replacement);
            substitutions += 1;
        }

        Ok(Expansion {
            text,
            substitutions,
        })
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
