//! One render of one view
//!
//! A view is one environment × format × version combination. [View::render] runs the
//! scanner over each source line with the registry as resolver, then assembles the
//! responsive CSS once. The view is consumed: its context is never reused.
//!
//! Outcome
//!
//!     A render either fails with a single [RenderError] (expansion did not converge) or
//!     returns a [Rendered] carrying zero or more diagnostics. Building the view is the
//!     only other point of failure ([ContextError]).

use crate::config::ViewOptions;
use crate::context::RenderContext;
use crate::diagnostics::Diagnostic;
use crate::error::{ContextError, RenderError};
use crate::properties::PropertySource;
use crate::renderers::RendererRegistry;
use crate::scanner::Scanner;

/// Output of a completed render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Expanded text, lines joined with `\n`
    pub text: String,
    /// The consolidated media query block, empty when no responsive rule is active
    pub css: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Rendered {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Debug)]
pub struct View {
    context: RenderContext,
    scanner: Scanner,
}

impl View {
    pub fn new(options: ViewOptions, source: PropertySource) -> Result<Self, ContextError> {
        let scanner = Scanner::new().with_max_substitutions(options.max_substitutions);
        let context = RenderContext::new(options, source)?;
        Ok(Self { context, scanner })
    }

    /// Replace the scanner, e.g. to use a different bracket matcher.
    pub fn with_scanner(mut self, scanner: Scanner) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Expand pre-split source lines.
    pub fn render<S: AsRef<str>>(
        mut self,
        registry: &RendererRegistry,
        lines: &[S],
    ) -> Result<Rendered, RenderError> {
        let mut output = Vec::with_capacity(lines.len());

        for (index, line) in lines.iter().enumerate() {
            let number = Some(index + 1);
            self.context.set_line(number);
            let context = &mut self.context;
            let expansion = self
                .scanner
                .expand(line.as_ref(), number, |interior| registry.resolve(interior, context))?;
            output.push(expansion.text);
        }
        self.context.set_line(None);

        let (css, diagnostics) = self.context.finish();
        Ok(Rendered {
            text: output.join("\n"),
            css,
            diagnostics,
        })
    }

    /// Expand a whole source string, split on `\n`.
    pub fn render_str(self, registry: &RendererRegistry, source: &str) -> Result<Rendered, RenderError> {
        let lines: Vec<&str> = source.split('\n').collect();
        self.render(registry, lines.as_slice())
    }
}
