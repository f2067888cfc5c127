//! Punctuation filter implementation.
//!
//! Removes every punctuation and symbol character (Unicode general
//! categories `P*` and `S*`) from token text. Tokens left empty are marked
//! as stopped so a later [`RemoveEmptyFilter`](super::RemoveEmptyFilter)
//! drops them.
//!
//! # Examples
//!
//! ```
//! use syntheticity::analysis::token_filter::Filter;
//! use syntheticity::analysis::token_filter::punctuation::PunctuationFilter;
//! use syntheticity::analysis::token::Token;
//!
//! let filter = PunctuationFilter::new();
//! let tokens = vec![Token::new("world!"), Token::new("...")];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result[0].text, "world");
//! assert!(result[1].is_stopped());
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{P}\p{S}]+").expect("punctuation pattern is valid"));

/// A filter that strips punctuation from tokens.
#[derive(Clone, Debug, Default)]
pub struct PunctuationFilter;

impl PunctuationFilter {
    /// Create a new punctuation filter.
    pub fn new() -> Self {
        PunctuationFilter
    }

    /// Strip punctuation and symbols from a single string.
    pub fn strip(text: &str) -> String {
        PUNCTUATION.replace_all(text, "").into_owned()
    }
}

impl Filter for PunctuationFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    return token;
                }
                let stripped = Self::strip(&token.text);
                if stripped.is_empty() {
                    token.stop()
                } else {
                    token.with_text(stripped)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}
