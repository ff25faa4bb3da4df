//! Mobile behavior for elements.
//!
//! Three parameters are understood:
//!
//!     mobile="hide fill"        preset classes; referencing one activates it
//!     mobile-style="color: red" ad-hoc declarations
//!     mobile-padding=10px       one declaration per `mobile-<property>` parameter
//!
//! Ad-hoc declarations for one element are gathered into a single rule in the `m`
//! bucket. An identical rule for the same tag is reused instead of registered again.

use crate::context::RenderContext;
use crate::params::Parameters;
use crate::renderers::element::Element;
use crate::responsive::{Rule, MOBILE_BUCKET};

const MOBILE: &str = "mobile";
const MOBILE_STYLE: &str = "mobile-style";
const MOBILE_PREFIX: &str = "mobile-";
const ANY_TAG: &str = "*";

/// Shorthand parameter suffixes and the CSS property they stand for
const PROPERTY_ALIASES: &[(&str, &str)] = &[
    ("bgcolor", "background-color"),
    ("align", "text-align"),
    ("valign", "vertical-align"),
];

/// Apply `mobile*` parameters to `element`.
pub fn apply(ctx: &mut RenderContext, params: &Parameters, element: &mut Element) {
    if let Some(presets) = params.non_empty(MOBILE) {
        for name in presets.split_whitespace() {
            let target = ctx.media_query().find(name).map(|rule| rule.tag.clone());
            match target {
                Some(target) if target == ANY_TAG || target == element.tag() => {
                    ctx.activate_rule(name);
                    element.add_class(name);
                }
                Some(target) => ctx.error(format!(
                    "Mobile behavior \"{}\" only applies to {{{}}}, not {{{}}}",
                    name,
                    target,
                    element.tag()
                )),
                None => ctx.error(format!(
                    "Unknown mobile behavior \"{}\" on {{{}}}",
                    name,
                    element.tag()
                )),
            }
        }
    }

    let declarations = declarations(params);
    if declarations.is_empty() {
        return;
    }
    if let Some(class_name) = mobile_class(ctx, element.tag(), &declarations) {
        element.add_class(class_name);
    }
}

/// Collect ad-hoc declarations: `mobile-style` first, then `mobile-<property>` in key order.
pub fn declarations(params: &Parameters) -> String {
    let mut parts = Vec::new();
    if let Some(style) = params.non_empty(MOBILE_STYLE) {
        parts.extend(split_declarations(style));
    }
    for (key, value) in params.iter() {
        if key == MOBILE_STYLE {
            continue;
        }
        let Some(property) = key.strip_prefix(MOBILE_PREFIX) else {
            continue;
        };
        if property.is_empty() || value.as_str().is_empty() {
            continue;
        }
        let property = PROPERTY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == property)
            .map_or(property, |(_, css)| *css);
        parts.push(format!("{}: {} !important;", property, value));
    }
    parts.join(" ")
}

/// Split a `style` string into `;`-terminated declarations, dropping empty ones.
pub fn split_declarations(style: &str) -> Vec<String> {
    style
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| format!("{};", part))
        .collect()
}

/// Class for an ad-hoc rule on `tag`, reusing an identical rule when one exists.
pub fn mobile_class(ctx: &mut RenderContext, tag: &str, declarations: &str) -> Option<String> {
    let existing = ctx
        .media_query()
        .find_by_declarations(tag, declarations)
        .map(|rule| rule.class_name.clone());
    if let Some(class_name) = existing {
        ctx.activate_rule(&class_name);
        return Some(class_name);
    }

    let class_name = ctx.next_class(MOBILE_BUCKET, &format!("{}-mobile", tag));
    match ctx.register_rule(Rule::new(tag, class_name.as_str(), declarations)) {
        Ok(rule) => Some(rule.class_name.clone()),
        Err(conflict) => {
            ctx.error(conflict.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewOptions;
    use crate::params::tokenize;
    use crate::properties::PropertySource;

    fn context(obfuscate: bool) -> RenderContext {
        let options = ViewOptions {
            obfuscate_classes: obfuscate,
            ..ViewOptions::default()
        };
        RenderContext::new(options, PropertySource::default()).unwrap()
    }

    #[test]
    fn test_declarations_from_style_and_properties() {
        let params = tokenize("mobile-style=\"color: red; font-size: 12px\" mobile-bgcolor=#000");
        assert_eq!(
            declarations(&params),
            "color: red; font-size: 12px; background-color: #000 !important;"
        );
    }

    #[test]
    fn test_preset_activation() {
        let mut ctx = context(true);
        let mut element = Element::new("td");
        apply(&mut ctx, &tokenize("mobile=\"hide fill\""), &mut element);

        assert_eq!(element.classes(), ["hide", "fill"]);
        assert!(ctx.media_query().find("hide").unwrap().active);
        assert!(!ctx.media_query().find("show").unwrap().active);
    }

    #[test]
    fn test_unknown_preset_is_reported() {
        let mut ctx = context(true);
        let mut element = Element::new("td");
        apply(&mut ctx, &tokenize("mobile=wobble"), &mut element);

        assert!(element.classes().is_empty());
        assert_eq!(
            ctx.diagnostics().iter().next().unwrap().message,
            "Unknown mobile behavior \"wobble\" on {td}"
        );
    }

    #[test]
    fn test_preset_for_another_tag_is_reported() {
        let mut ctx = context(true);
        let mut element = Element::new("td");
        apply(&mut ctx, &tokenize("mobile=img"), &mut element);

        assert!(element.classes().is_empty());
        assert!(!ctx.media_query().find("img").unwrap().active);
        assert_eq!(
            ctx.diagnostics().iter().next().unwrap().message,
            "Mobile behavior \"img\" only applies to {img}, not {td}"
        );

        let mut image = Element::new("img");
        apply(&mut ctx, &tokenize("mobile=img"), &mut image);
        assert_eq!(image.classes(), ["img"]);
        assert!(ctx.media_query().find("img").unwrap().active);
    }

    #[test]
    fn test_identical_overrides_share_a_rule() {
        let mut ctx = context(true);
        let params = tokenize("mobile-padding=0");

        let mut first = Element::new("td");
        apply(&mut ctx, &params, &mut first);
        let mut second = Element::new("td");
        apply(&mut ctx, &params, &mut second);
        let mut other_tag = Element::new("div");
        apply(&mut ctx, &params, &mut other_tag);

        assert_eq!(first.classes(), ["m1"]);
        assert_eq!(second.classes(), ["m1"]);
        assert_eq!(other_tag.classes(), ["m2"]);
    }

    #[test]
    fn test_readable_names_in_development() {
        let mut ctx = context(false);
        let mut element = Element::new("td");
        apply(&mut ctx, &tokenize("mobile-style=\"display: none\""), &mut element);
        assert_eq!(element.classes(), ["td-mobile-1"]);
    }

    #[test]
    fn test_matching_preset_is_reused_and_activated() {
        let mut ctx = context(true);
        let class = mobile_class(&mut ctx, "img", "width: 100% !important; height: auto !important;");
        assert_eq!(class.as_deref(), Some("img"));
        assert!(ctx.media_query().find("img").unwrap().active);
    }
}
