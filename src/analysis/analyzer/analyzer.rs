//! Core analyzer trait definition.
//!
//! An [`Analyzer`] is the complete normalization pipeline from raw text to a
//! stream of word tokens:
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → WordSet
//!             ↓
//!         Tokenizer
//!             ↓
//!         Filter 1 … Filter N
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so that one analyzer can back several
/// text loaders at once.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
