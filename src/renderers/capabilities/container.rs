//! Passive inheritance from an enclosing tag.
//!
//! A descendant reads the innermost open frame of its ancestor without popping it. When
//! no ancestor is open the frame is empty and nothing is inherited; no enclosing scope
//! is required.

use crate::context::RenderContext;
use crate::params::Parameters;

/// Copy each of `keys` from the innermost open `ancestor` frame into `params`, unless
/// `params` already sets it.
pub fn inherit(ctx: &RenderContext, ancestor: &str, keys: &[String], params: &mut Parameters) {
    let frame = ctx.top(ancestor);
    for key in keys {
        if params.contains(key) {
            continue;
        }
        if let Some(value) = frame.params.get(key) {
            params.insert(key.as_str(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewOptions;
    use crate::params::tokenize;
    use crate::properties::PropertySource;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_inherits_only_missing_keys() {
        let mut ctx =
            RenderContext::new(ViewOptions::default(), PropertySource::default()).unwrap();
        ctx.push("table", tokenize("bgcolor=#fff align=center border=1"));

        let mut params = tokenize("align=left");
        inherit(&ctx, "table", &keys(&["align", "bgcolor"]), &mut params);

        assert_eq!(params.get_str("align"), Some("left"));
        assert_eq!(params.get_str("bgcolor"), Some("#fff"));
        assert!(!params.contains("border"));
    }

    #[test]
    fn test_innermost_frame_wins() {
        let mut ctx =
            RenderContext::new(ViewOptions::default(), PropertySource::default()).unwrap();
        ctx.push("table", tokenize("bgcolor=outer"));
        ctx.push("table", tokenize("bgcolor=inner"));

        let mut params = Parameters::new();
        inherit(&ctx, "table", &keys(&["bgcolor"]), &mut params);
        assert_eq!(params.get_str("bgcolor"), Some("inner"));
    }

    #[test]
    fn test_no_ancestor_is_not_an_error() {
        let ctx = RenderContext::new(ViewOptions::default(), PropertySource::default()).unwrap();
        let mut params = Parameters::new();
        inherit(&ctx, "table", &keys(&["bgcolor"]), &mut params);

        assert!(params.is_empty());
        assert!(ctx.diagnostics().is_empty());
    }
}
