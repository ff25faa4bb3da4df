//! Tag dispatch
//!
//! A [RendererRegistry] maps a tag name to the [Renderer] that expands it. Close tags
//! strip their leading `/` and land on the same renderer as the matching open tag; the
//! renderer tells them apart through [Tag::closing] and manages its own stack frame.
//!
//! Names without an entry go to the fallback renderer, which by default is
//! [PropertyRenderer]: it resolves the head token straight from the property context.
//! That makes `{title}` (a simple variable) and `{table}` (a control tag) the same syntax.
//!
//! Shared behavior between renderers lives in [capabilities] as small modules that a
//! renderer calls explicitly, rather than in a type hierarchy.

pub mod capabilities;
pub mod element;
pub mod mobile_style;
pub mod property;

use crate::context::RenderContext;
use crate::params::Parameters;
use crate::scanner::Tag;
use std::collections::HashMap;
use std::fmt;

pub use element::{Element, ElementRenderer};
pub use mobile_style::MobileStyleRenderer;
pub use property::PropertyRenderer;

/// Expands one tag invocation.
pub trait Renderer: Send + Sync {
    /// Produce the replacement text for `tag`, or `None` to remove it.
    fn render(&self, tag: &Tag, params: &Parameters, ctx: &mut RenderContext) -> Option<String>;
}

/// Registry of tag renderers with a fallback for unknown names.
pub struct RendererRegistry {
    renderers: HashMap<String, Box<dyn Renderer>>,
    fallback: Box<dyn Renderer>,
}

impl RendererRegistry {
    /// Create a registry with no tags; every name resolves as a property.
    pub fn new() -> Self {
        RendererRegistry {
            renderers: HashMap::new(),
            fallback: Box::new(PropertyRenderer),
        }
    }

    /// Register a renderer for `name`.
    ///
    /// If a renderer with the same name already exists, it will be replaced.
    pub fn register<R: Renderer + 'static>(&mut self, name: impl Into<String>, renderer: R) {
        self.renderers.insert(name.into(), Box::new(renderer));
    }

    /// Replace the renderer used for names without an entry.
    pub fn set_fallback<R: Renderer + 'static>(&mut self, renderer: R) {
        self.fallback = Box::new(renderer);
    }

    /// Get the renderer registered for `name`, ignoring the fallback
    pub fn get(&self, name: &str) -> Option<&dyn Renderer> {
        self.renderers.get(name).map(|r| r.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// List all registered tag names (sorted)
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.renderers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Hand a parsed tag to its renderer, or to the fallback.
    pub fn dispatch(&self, tag: &Tag, params: &Parameters, ctx: &mut RenderContext) -> Option<String> {
        let renderer = self.get(&tag.name).unwrap_or(self.fallback.as_ref());
        renderer.render(tag, params, ctx)
    }

    /// Parse an expression interior and dispatch it. This is the scanner's resolver.
    pub fn resolve(&self, interior: &str, ctx: &mut RenderContext) -> Option<String> {
        let tag = Tag::parse(interior);
        if tag.name.is_empty() {
            ctx.error(format!("Empty tag \"{{{}}}\"", interior));
            return None;
        }
        let params = Parameters::parse(&tag.raw_params);
        self.dispatch(&tag, &params, ctx)
    }

    /// Create a registry with the built-in element renderers and `mobile-style`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(
            "table",
            ElementRenderer::new("table").attributes(&[
                "border",
                "cellpadding",
                "cellspacing",
                "width",
                "align",
                "bgcolor",
                "id",
                "style",
            ]),
        );
        registry.register(
            "td",
            ElementRenderer::new("td")
                .attributes(&[
                    "align", "valign", "bgcolor", "width", "height", "colspan", "rowspan", "id",
                    "style",
                ])
                .inherit_from("table", &["align", "valign", "bgcolor"]),
        );
        registry.register(
            "img",
            ElementRenderer::new("img")
                .void()
                .required(&["src"])
                .attributes(&["src", "alt", "width", "height", "border", "id", "style"]),
        );
        registry.register("mobile-style", MobileStyleRenderer);

        registry
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewOptions;
    use crate::properties::PropertySource;

    // Test renderer
    struct EchoRenderer;
    impl Renderer for EchoRenderer {
        fn render(&self, tag: &Tag, params: &Parameters, _ctx: &mut RenderContext) -> Option<String> {
            let kind = if tag.closing { "close" } else { "open" };
            Some(format!("{}:{}:{}", kind, tag.name, params.len()))
        }
    }

    fn context(yaml: &str) -> RenderContext {
        RenderContext::new(
            ViewOptions::default(),
            PropertySource::from_yaml_str(yaml).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_registry_register() {
        let mut registry = RendererRegistry::new();
        registry.register("echo", EchoRenderer);

        assert!(registry.has("echo"));
        assert_eq!(registry.names(), vec!["echo"]);
    }

    #[test]
    fn test_close_tag_reaches_open_tag_renderer() {
        let mut registry = RendererRegistry::new();
        registry.register("echo", EchoRenderer);
        let mut ctx = context("");

        assert_eq!(registry.resolve("echo a=1 b", &mut ctx), Some("open:echo:2".into()));
        assert_eq!(registry.resolve("/echo", &mut ctx), Some("close:echo:0".into()));
    }

    #[test]
    fn test_unknown_name_falls_back_to_property() {
        let registry = RendererRegistry::new();
        let mut ctx = context("greeting: Hello\n");

        assert_eq!(registry.resolve("greeting", &mut ctx), Some("Hello".into()));
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_custom_fallback() {
        let mut registry = RendererRegistry::new();
        registry.set_fallback(EchoRenderer);
        let mut ctx = context("");

        assert_eq!(registry.resolve("anything", &mut ctx), Some("open:anything:0".into()));
    }

    #[test]
    fn test_empty_tag_is_reported() {
        let registry = RendererRegistry::new();
        let mut ctx = context("");

        assert_eq!(registry.resolve("  ", &mut ctx), None);
        assert_eq!(ctx.diagnostics().len(), 1);
    }

    #[test]
    fn test_defaults() {
        let registry = RendererRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["img", "mobile-style", "table", "td"]);
        assert!(registry.get("button").is_none());
    }
}
