//! Final clean-up step of the normalization pipeline.
//!
//! Drops tokens that earlier filters stopped or emptied, so only real words
//! reach the normalized text.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Removes stopped and empty tokens.
#[derive(Clone, Debug, Default)]
pub struct RemoveEmptyFilter;

impl RemoveEmptyFilter {
    pub fn new() -> Self {
        RemoveEmptyFilter
    }
}

impl Filter for RemoveEmptyFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(
            tokens.filter(|token| !token.is_stopped() && !token.is_empty()),
        ))
    }

    fn name(&self) -> &'static str {
        "remove_empty"
    }
}
