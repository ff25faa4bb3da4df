//! Per-render state
//!
//! A [RenderContext] is created at the start of one render and threaded through every
//! renderer call. It owns everything mutable a render touches: the tag stacks, the
//! property context, the responsive media query, the class name counters and the
//! diagnostics. Nothing in it is shared with another render, so independent views can
//! render concurrently as long as each has its own context.

use crate::config::ViewOptions;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::ContextError;
use crate::params::Parameters;
use crate::properties::{PropertyContext, PropertySource, Value};
use crate::responsive::{presets, ClassNamer, MediaQuery, Rule, RuleConflict};
use crate::stack::{TagFrame, TagStacks};

#[derive(Debug)]
pub struct RenderContext {
    options: ViewOptions,
    properties: PropertyContext,
    stacks: TagStacks,
    media_query: MediaQuery,
    classes: ClassNamer,
    diagnostics: Diagnostics,
    line: Option<usize>,
    empty_frame: TagFrame,
}

impl RenderContext {
    /// Build the context for one view. Fails if the property source does not fit the
    /// selected environment, format and version.
    pub fn new(options: ViewOptions, source: PropertySource) -> Result<Self, ContextError> {
        let properties = PropertyContext::new(source, options.selector())?;
        let mut media_query = MediaQuery::new(options.breakpoint);
        presets::install(&mut media_query);

        Ok(Self {
            classes: ClassNamer::new(options.obfuscate_classes),
            options,
            properties,
            stacks: TagStacks::new(),
            media_query,
            diagnostics: Diagnostics::new(),
            line: None,
            empty_frame: TagFrame::default(),
        })
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    // Properties

    pub fn properties(&self) -> &PropertyContext {
        &self.properties
    }

    pub fn resolve(&self, key: &str) -> Option<&Value> {
        self.properties.resolve(key)
    }

    pub fn is_enabled(&self, key: &str) -> bool {
        self.properties.is_enabled(key)
    }

    pub fn is_disabled(&self, key: &str) -> bool {
        self.properties.is_disabled(key)
    }

    // Diagnostics

    /// Line currently being scanned, 1-based.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn set_line(&mut self, line: Option<usize>) {
        self.line = line;
    }

    /// Record a non-fatal problem against the current line.
    pub fn error(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(self.line, message));
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    // Tag stacks

    /// Open a scope for `name`, remembering its parameters until the matching close.
    pub fn push(&mut self, name: &str, params: Parameters) {
        let frame = TagFrame::new(params, self.line);
        self.stacks.push(name, frame);
    }

    /// Close the innermost scope for `name`. Without an open scope this records a
    /// diagnostic and returns an empty frame.
    pub fn pop(&mut self, name: &str) -> TagFrame {
        match self.stacks.pop(name) {
            Some(frame) => frame,
            None => {
                self.error(format!("{{/{}}} has no matching {{{}}}", name, name));
                TagFrame::default()
            }
        }
    }

    /// The innermost open frame for `name`, or an empty frame when none is open.
    pub fn top(&self, name: &str) -> &TagFrame {
        self.stacks.top(name).unwrap_or(&self.empty_frame)
    }

    pub fn stacks(&self) -> &TagStacks {
        &self.stacks
    }

    // Responsive rules

    pub fn media_query(&self) -> &MediaQuery {
        &self.media_query
    }

    pub fn register_rule(&mut self, rule: Rule) -> Result<&Rule, RuleConflict> {
        self.media_query.register(rule)
    }

    /// Activate a preset by class name. Returns false when no such rule exists.
    pub fn activate_rule(&mut self, class_name: &str) -> bool {
        self.media_query.activate(class_name)
    }

    /// Next generated class name in `bucket`.
    pub fn next_class(&mut self, bucket: &str, stem: &str) -> String {
        self.classes.next(bucket, stem)
    }

    /// Report scopes left open and assemble the responsive CSS.
    pub fn finish(mut self) -> (String, Vec<Diagnostic>) {
        let unclosed: Vec<Diagnostic> = self
            .stacks
            .unclosed()
            .into_iter()
            .map(|(name, frame)| {
                let message = match frame.opened_on {
                    Some(line) => format!("{{{}}} opened on line {} was never closed", name, line),
                    None => format!("{{{}}} was never closed", name),
                };
                Diagnostic::new(None, message)
            })
            .collect();
        for diagnostic in unclosed {
            self.diagnostics.push(diagnostic);
        }

        (self.media_query.to_css(), self.diagnostics.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::tokenize;

    fn context() -> RenderContext {
        RenderContext::new(ViewOptions::default(), PropertySource::default()).unwrap()
    }

    #[test]
    fn test_pop_underflow_reports_and_returns_empty_frame() {
        let mut ctx = context();
        ctx.push("table", tokenize("id=a"));
        ctx.push("table", tokenize("id=b"));

        assert_eq!(ctx.pop("table").params.get_str("id"), Some("b"));
        assert_eq!(ctx.pop("table").params.get_str("id"), Some("a"));
        assert!(ctx.diagnostics().is_empty());

        let frame = ctx.pop("table");
        assert!(frame.is_empty());
        assert_eq!(ctx.diagnostics().len(), 1);
        assert_eq!(
            ctx.diagnostics().iter().next().unwrap().message,
            "{/table} has no matching {table}"
        );
    }

    #[test]
    fn test_top_of_empty_stack_is_empty_frame() {
        let ctx = context();
        assert!(ctx.top("table").is_empty());
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_frames_remember_line() {
        let mut ctx = context();
        ctx.set_line(Some(5));
        ctx.push("td", Parameters::new());
        assert_eq!(ctx.top("td").opened_on, Some(5));
    }

    #[test]
    fn test_finish_reports_unclosed_scopes() {
        let mut ctx = context();
        ctx.set_line(Some(2));
        ctx.push("table", Parameters::new());
        ctx.set_line(Some(3));
        ctx.push("td", Parameters::new());

        let (css, diagnostics) = ctx.finish();
        assert_eq!(css, "");
        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "{table} opened on line 2 was never closed",
                "{td} opened on line 3 was never closed"
            ]
        );
    }

    #[test]
    fn test_presets_are_installed() {
        let mut ctx = context();
        assert!(ctx.activate_rule("hide"));
        let (css, _) = ctx.finish();
        assert!(css.contains("*[class~=\"hide\"] { display: none !important; }"));
    }

    #[test]
    fn test_invalid_layer_fails_construction() {
        let source = PropertySource::from_yaml_str("development: [1, 2]\n").unwrap();
        assert!(RenderContext::new(ViewOptions::default(), source).is_err());
    }
}
