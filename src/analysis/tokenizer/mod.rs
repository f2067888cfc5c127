//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the normalization pipeline: they split
//! raw text into [`Token`](crate::analysis::token::Token)s that the token
//! filters then rewrite.
//!
//! # Examples
//!
//! ```
//! use syntheticity::analysis::tokenizer::Tokenizer;
//! use syntheticity::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a tokenizer can be shared between
/// engines running on different threads.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod whitespace;

pub use whitespace::WhitespaceTokenizer;
