//! Token definitions for tag parameter strings
//!
//! The tokenizer only needs to know about quotes, the key/value separator and
//! whitespace; everything else is text. Tokens are produced by logos.
use logos::Logos;

/// Tokens that can appear in a tag's parameter string
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    // An escaped quote never toggles quoting
    #[token("\\\"")]
    EscapedQuote,

    #[token("\"")]
    Quote,

    #[token("=")]
    Equals,

    #[regex(r"[ \t]+")]
    Whitespace,

    // A lone backslash that does not escape a quote is plain text
    #[token("\\")]
    Backslash,

    // Text content (catch-all for non-special characters)
    #[regex(r#"[^ \t"=\\]+"#)]
    Text,
}

/// Convenience function to tokenize a string and collect tokens with their source slices
pub fn tokenize_with_slices(source: &str) -> Vec<(Token, &str)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.slice()));
        }
    }

    tokens
}
