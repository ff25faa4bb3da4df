//! Fallback renderer: substitute a property value for the tag.
//!
//! The full head token is the key, closing slash included, so a property source can
//! define paired snippets:
//!
//!     callout: <div class="callout" style="color: $color$">
//!     /callout: </div>
//!
//! `$name$` placeholders in the value are filled from the tag's parameters; placeholders
//! without a matching parameter are left untouched.

use super::Renderer;
use crate::context::RenderContext;
use crate::params::Parameters;
use crate::scanner::Tag;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([A-Za-z0-9_-]+)\$").unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyRenderer;

impl Renderer for PropertyRenderer {
    fn render(&self, tag: &Tag, params: &Parameters, ctx: &mut RenderContext) -> Option<String> {
        let key = tag.token();
        match ctx.resolve(&key).map(|value| value.to_text()) {
            Some(Some(text)) => Some(interpolate(&text, params)),
            Some(None) => {
                ctx.error(format!("Property \"{}\" has no text value", key));
                None
            }
            None => {
                ctx.error(format!("Unknown tag or property \"{}\"", key));
                None
            }
        }
    }
}

/// Replace `$name$` placeholders with parameter values.
pub fn interpolate(text: &str, params: &Parameters) -> String {
    if params.is_empty() || !text.contains('$') {
        return text.to_string();
    }
    PLACEHOLDER_REGEX
        .replace_all(text, |caps: &Captures<'_>| match params.get_str(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
