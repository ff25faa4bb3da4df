//! Behavior shared between renderers.
//!
//! Each module is a set of free functions a renderer calls explicitly; most renderers
//! only need one or two of them.

pub mod assets;
pub mod container;
pub mod responsive;
