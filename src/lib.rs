//! # tagweave
//!
//! Bracket-tag macro expansion for text and HTML sources.
//!
//! Source text carries tags such as `{table width=600}`, `{/table}` or `{title}`. A render
//! rewrites them to a fixed point: the [scanner] finds the innermost expressions, the
//! [params] tokenizer parses their parameters, the [renderers] registry dispatches each
//! tag (unknown names resolve as [properties]), and renderers share state between open
//! and close tags through per-name [stack]s. Responsive CSS requested along the way is
//! collected by the [responsive] registry and emitted once per render.
//!
//!     let registry = RendererRegistry::with_defaults();
//!     let view = View::new(ViewOptions::default(), PropertySource::from_yaml_str(props)?)?;
//!     let rendered = view.render_str(&registry, source)?;
//!     // rendered.text, rendered.css, rendered.diagnostics
//!
//! Errors come in two shapes. Structural failures (a non-convergent expansion, a
//! property source that cannot back a context) are returned as errors. Everything else
//! is a [diagnostics::Diagnostic] recorded while rendering continues.

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod params;
pub mod properties;
pub mod renderers;
pub mod responsive;
pub mod scanner;
pub mod stack;
pub mod view;

pub use config::ViewOptions;
pub use context::RenderContext;
pub use diagnostics::Diagnostic;
pub use error::{ContextError, RenderError};
pub use params::{tokenize, Param, Parameters};
pub use properties::{Format, PropertyContext, PropertySource, Value};
pub use renderers::{Renderer, RendererRegistry};
pub use responsive::{MediaQuery, Rule, RuleConflict};
pub use scanner::{Scanner, Tag};
pub use view::{Rendered, View};
