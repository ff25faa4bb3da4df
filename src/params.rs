//! Parameter tokenizer
//!
//! Turns the flat parameter string of a tag into a [Parameters] map.
//!
//! Grammar
//!
//!     A parameter string is a run of space-separated tokens, each either `key=value` or a
//!     bare `key` (a flag). Values may be double-quoted to embed spaces; `\"` inside a value
//!     is a literal quote.
//!
//!         {img src="hero image.png" width=600 responsive}
//!
//! Algorithm
//!
//!     A single quote-state flag toggles on each unescaped quote. Outside quotes, the first `=`
//!     ends the key segment and starts the value segment, and whitespace commits the pending
//!     pair (a bare key commits as a flag). Later occurrences of a key replace earlier ones.
//!
//!     Input with an unterminated quote is not an error: recognition stops at the malformation,
//!     so the result holds every parameter committed before the opening quote.

pub mod tokens;

use std::collections::BTreeMap;
use std::fmt;

pub use tokens::Token;

/// A single parameter value: text, or `true` for a bare flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Text(String),
    Flag,
}

impl Param {
    pub fn as_str(&self) -> &str {
        match self {
            Param::Text(text) => text,
            Param::Flag => "true",
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Param::Flag)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Param {
    fn from(text: &str) -> Self {
        Param::Text(text.to_string())
    }
}

/// Key to value map parsed from a tag's parameter string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: BTreeMap<String, Param>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a parameter string. See the module docs for the grammar.
    pub fn parse(source: &str) -> Self {
        tokenize(source)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Param) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Param> {
        self.entries.get(key)
    }

    /// Text of a parameter; flags read as `"true"`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(Param::as_str)
    }

    /// Text of a parameter, ignoring empty values.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get_str(key).filter(|value| !value.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Param> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>> FromIterator<(K, Param)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, Param)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Accumulates the key and value segments of the parameter being read.
#[derive(Default)]
struct Pending {
    key: String,
    value: String,
    in_value: bool,
}

impl Pending {
    fn push(&mut self, text: &str) {
        if self.in_value {
            self.value.push_str(text);
        } else {
            self.key.push_str(text);
        }
    }

    fn commit(&mut self, params: &mut Parameters) {
        let pending = std::mem::take(self);
        if pending.key.is_empty() {
            return;
        }
        let value = if pending.in_value {
            Param::Text(pending.value)
        } else {
            Param::Flag
        };
        params.insert(pending.key, value);
    }
}

/// Tokenize a parameter string into a [Parameters] map.
pub fn tokenize(source: &str) -> Parameters {
    let mut params = Parameters::new();
    let mut pending = Pending::default();
    let mut quoted = false;

    for (token, slice) in tokens::tokenize_with_slices(source.trim()) {
        match token {
            Token::Quote => quoted = !quoted,
            Token::EscapedQuote => pending.push("\""),
            Token::Equals if !quoted && !pending.in_value => pending.in_value = true,
            Token::Whitespace if !quoted => pending.commit(&mut params),
            Token::Equals | Token::Whitespace | Token::Backslash | Token::Text => {
                pending.push(slice)
            }
        }
    }

    // An open quote at the end means the last parameter is malformed: drop it.
    if !quoted {
        pending.commit(&mut params);
    }

    params
}
