//! `{mobile-style name=... style=...}`: declare a named mobile behavior in source.
//!
//! The declaration registers an inactive preset and emits nothing. Elements opt in with
//! `mobile=name`, which activates it; a declaration nobody references never reaches the
//! CSS. `tag` narrows the selector and defaults to `*`.
//!
//! Declaring a name twice with the same style is harmless. A different style under a
//! used name is reported and the first declaration stays.

use super::capabilities::responsive::split_declarations;
use super::Renderer;
use crate::context::RenderContext;
use crate::params::Parameters;
use crate::responsive::Rule;
use crate::scanner::Tag;

const ANY_TAG: &str = "*";

#[derive(Debug, Clone, Copy, Default)]
pub struct MobileStyleRenderer;

impl Renderer for MobileStyleRenderer {
    fn render(&self, tag: &Tag, params: &Parameters, ctx: &mut RenderContext) -> Option<String> {
        if tag.closing {
            ctx.error(format!("{{{}}} does not take a closing tag", tag.name));
            return None;
        }

        let name = params.non_empty("name");
        let style = params.non_empty("style");
        let (Some(name), Some(style)) = (name, style) else {
            for missing in ["name", "style"] {
                if params.non_empty(missing).is_none() {
                    ctx.error(format!(
                        "{{{}}} is missing required parameter \"{}\"",
                        tag.name, missing
                    ));
                }
            }
            return None;
        };

        let declarations = split_declarations(style).join(" ");
        let target = params.non_empty("tag").unwrap_or(ANY_TAG);
        if let Err(conflict) = ctx.register_rule(Rule::preset(target, name, declarations)) {
            ctx.error(conflict.to_string());
        }
        None
    }
}
