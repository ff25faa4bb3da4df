//! Property-based tests for parameter tokenization
//!
//! These tests ensure that the tokenizer recovers every well-formed parameter:
//! - `key=value` pairs, with quoted values that may hold spaces
//! - bare keys as flags
//! - recognition stops at an unterminated quote

use proptest::prelude::*;
use std::collections::BTreeMap;
use tagweave::{tokenize, Param};

/// Generate valid parameter keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,10}"
}

/// Generate parameter values: unquoted text, quoted text with spaces, or a flag
fn value_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        "[a-zA-Z0-9#%.:/-]{1,12}".prop_map(Some),
        "[a-zA-Z0-9][a-zA-Z0-9 .:-]{0,19}".prop_map(Some),
        Just(None),
    ]
}

fn render_param(key: &str, value: &Option<String>) -> String {
    match value {
        Some(value) if value.contains(' ') => format!("{}=\"{}\"", key, value),
        Some(value) => format!("{}={}", key, value),
        None => key.to_string(),
    }
}

fn expected(params: &BTreeMap<String, Option<String>>) -> BTreeMap<String, Param> {
    params
        .iter()
        .map(|(key, value)| {
            let param = match value {
                Some(value) => Param::Text(value.clone()),
                None => Param::Flag,
            };
            (key.clone(), param)
        })
        .collect()
}

fn actual(source: &str) -> BTreeMap<String, Param> {
    tokenize(source)
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

proptest! {
    #[test]
    fn test_well_formed_parameters_round_trip(
        params in prop::collection::btree_map(key_strategy(), value_strategy(), 0..6)
    ) {
        let source = params
            .iter()
            .map(|(key, value)| render_param(key, value))
            .collect::<Vec<_>>()
            .join(" ");
        prop_assert_eq!(actual(&source), expected(&params));
    }

    #[test]
    fn test_unterminated_quote_keeps_only_the_prefix(
        params in prop::collection::btree_map(key_strategy(), value_strategy(), 0..4),
        tail in "[a-z =]{0,12}",
    ) {
        let prefix = params
            .iter()
            .map(|(key, value)| render_param(key, value))
            .collect::<Vec<_>>()
            .join(" ");
        let source = format!("{} broken=\"{}", prefix, tail);
        prop_assert_eq!(actual(&source), expected(&params));
    }

    #[test]
    fn test_tokenize_never_panics(source in "\\PC{0,40}") {
        let _ = tokenize(&source);
    }
}
