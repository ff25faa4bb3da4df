//! Existence checks for referenced resources.
//!
//! Checks run inline against `assets_root`. A missing file is a diagnostic, never a
//! failure of the render. Remote and inline references are not checked.

use crate::context::RenderContext;

/// Check that `reference` exists under the configured assets root.
///
/// Returns true when the resource exists or no check applies.
pub fn verify(ctx: &mut RenderContext, reference: &str) -> bool {
    let root = match &ctx.options().assets_root {
        Some(root) => root.clone(),
        None => return true,
    };
    if is_remote(reference) {
        return true;
    }

    let path = root.join(reference.trim_start_matches('/'));
    if path.is_file() {
        return true;
    }
    ctx.error(format!(
        "Missing asset \"{}\" (looked for {})",
        reference,
        path.display()
    ));
    false
}

fn is_remote(reference: &str) -> bool {
    reference.contains("://") || reference.starts_with("//") || reference.starts_with("data:")
}
