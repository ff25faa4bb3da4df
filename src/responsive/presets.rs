//! Built-in named rules, registered inactive at the start of every render.

use super::{MediaQuery, Rule};

/// (tag, class name, declarations)
pub const BUILTIN_PRESETS: &[(&str, &str, &str)] = &[
    ("*", "hide", "display: none !important;"),
    ("*", "show", "display: block !important;"),
    ("*", "fill", "width: 100% !important;"),
    ("*", "drop", "display: block !important; width: 100% !important;"),
    ("img", "img", "width: 100% !important; height: auto !important;"),
];

/// Register every built-in preset. Presets start inactive.
pub fn install(media_query: &mut MediaQuery) {
    for (tag, class_name, declarations) in BUILTIN_PRESETS {
        // The media query is fresh, so none of these can conflict.
        let _ = media_query.register(Rule::preset(*tag, *class_name, *declarations));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_start_inactive() {
        let mut media_query = MediaQuery::new(480);
        install(&mut media_query);

        assert_eq!(media_query.len(), BUILTIN_PRESETS.len());
        assert!(media_query.rules().iter().all(|rule| !rule.active));
        assert_eq!(media_query.to_css(), "");
    }

    #[test]
    fn test_install_twice_is_harmless() {
        let mut media_query = MediaQuery::new(480);
        install(&mut media_query);
        install(&mut media_query);
        assert_eq!(media_query.len(), BUILTIN_PRESETS.len());
    }
}
