//! Case folding.
//!
//! `Run`, `RUN` and `run` must count as one word, so every token is folded
//! with Unicode lowercasing before it reaches the word set.
//!
//! # Examples
//!
//! ```
//! use syntheticity::analysis::token::Token;
//! use syntheticity::analysis::token_filter::{Filter, LowercaseFilter};
//!
//! let tokens = vec![Token::new("Straße"), Token::new("ÄRGER")];
//! let folded: Vec<String> = LowercaseFilter::new()
//!     .filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(folded, ["straße", "ärger"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Folds token text to lowercase. Stopped tokens are passed through.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }

    /// Fold a single string, skipping the allocation for text that is
    /// already lowercase.
    pub fn fold(text: String) -> String {
        if text.chars().any(char::is_uppercase) {
            text.to_lowercase()
        } else {
            text
        }
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|mut token| {
            if !token.is_stopped() {
                token.text = Self::fold(std::mem::take(&mut token.text));
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
