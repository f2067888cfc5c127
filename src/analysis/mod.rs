//! Text analysis module.
//!
//! Tokenization and token filtering used to normalize raw text before it is
//! split into morphemes: whitespace splitting, case folding, punctuation
//! stripping and removal of empty tokens.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
