//! Generic scoped element renderer
//!
//! [ElementRenderer] is the reference implementation of a stateful tag: the open tag
//! pushes a frame and emits the start tag, the close tag pops it and emits the end tag.
//! Along the way it composes the shared capabilities:
//!
//!     container    inherit attributes from an enclosing tag's open frame
//!     responsive   mobile preset classes and ad-hoc mobile overrides
//!     assets       existence check for `src` on void elements
//!
//! Visual decisions (what a button or a carousel looks like) are not made here; those
//! belong to dedicated renderers registered by the application.

use super::capabilities::{assets, container, responsive};
use super::Renderer;
use crate::context::RenderContext;
use crate::params::Parameters;
use crate::scanner::Tag;

/// An HTML start tag under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            classes: Vec::new(),
            styles: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Set an attribute, replacing an earlier value for the same name.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    /// Add a class once; repeated classes are ignored.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() && !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self.styles.iter_mut().find(|(p, _)| p == property) {
            Some(slot) => slot.1 = value,
            None => self.styles.push((property.to_string(), value)),
        }
    }

    /// Render the start tag.
    pub fn to_html(&self) -> String {
        let mut html = format!("<{}", self.tag);
        for (name, value) in &self.attributes {
            html.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
        }
        if !self.classes.is_empty() {
            html.push_str(&format!(" class=\"{}\"", self.classes.join(" ")));
        }
        if !self.styles.is_empty() {
            let styles: Vec<_> = self
                .styles
                .iter()
                .map(|(property, value)| format!("{}:{}", property, value))
                .collect();
            html.push_str(&format!(" style=\"{}\"", escape_attribute(&styles.join(";"))));
        }
        html.push('>');
        html
    }
}

fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Renders a tag as a plain HTML element with a scoped frame.
#[derive(Debug, Clone)]
pub struct ElementRenderer {
    tag: String,
    attributes: Vec<String>,
    required: Vec<String>,
    inherit: Option<(String, Vec<String>)>,
    void: bool,
}

impl ElementRenderer {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            required: Vec::new(),
            inherit: None,
            void: false,
        }
    }

    /// Parameters copied through as HTML attributes, in this order.
    pub fn attributes(mut self, names: &[&str]) -> Self {
        self.attributes = names.iter().map(|name| name.to_string()).collect();
        self
    }

    /// Parameters that must be present on the open tag.
    pub fn required(mut self, names: &[&str]) -> Self {
        self.required = names.iter().map(|name| name.to_string()).collect();
        self
    }

    /// Inherit `keys` from the innermost open `ancestor` when this tag omits them.
    pub fn inherit_from(mut self, ancestor: &str, keys: &[&str]) -> Self {
        self.inherit = Some((
            ancestor.to_string(),
            keys.iter().map(|key| key.to_string()).collect(),
        ));
        self
    }

    /// A void element has no close tag and never opens a scope.
    pub fn void(mut self) -> Self {
        self.void = true;
        self
    }

    fn close(&self, ctx: &mut RenderContext) -> Option<String> {
        if self.void {
            ctx.error(format!("{{{}}} does not take a closing tag", self.tag));
            return None;
        }
        ctx.pop(&self.tag);
        Some(format!("</{}>", self.tag))
    }

    fn open(&self, params: &Parameters, ctx: &mut RenderContext) -> Option<String> {
        let mut params = params.clone();
        if let Some((ancestor, keys)) = &self.inherit {
            container::inherit(ctx, ancestor, keys, &mut params);
        }

        for name in &self.required {
            if params.non_empty(name).is_none() {
                ctx.error(format!("{{{}}} is missing required parameter \"{}\"", self.tag, name));
            }
        }

        let mut element = Element::new(self.tag.as_str());
        for name in &self.attributes {
            if let Some(value) = params.get_str(name) {
                element.set_attribute(name, value);
            }
        }
        if let Some(classes) = params.non_empty("class") {
            classes.split_whitespace().for_each(|class| element.add_class(class));
        }

        if self.void {
            if let Some(src) = params.non_empty("src") {
                assets::verify(ctx, src);
            }
        }

        responsive::apply(ctx, &params, &mut element);

        if !self.void {
            ctx.push(&self.tag, params);
        }
        Some(element.to_html())
    }
}

impl Renderer for ElementRenderer {
    fn render(&self, tag: &Tag, params: &Parameters, ctx: &mut RenderContext) -> Option<String> {
        if tag.closing {
            self.close(ctx)
        } else {
            self.open(params, ctx)
        }
    }
}
