//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows through the normalization pipeline:
//! the tokenizer produces them from raw text, filters rewrite or stop them,
//! and the [`TokenStream`] that comes out the other end is what the text
//! loader turns into a word set.
//!
//! # Examples
//!
//! ```
//! use syntheticity::analysis::token::Token;
//!
//! let token = Token::new("World").with_text("world");
//! assert_eq!(token.text, "world");
//! assert!(!token.is_stopped());
//! ```

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// Whether this token has been marked as stopped (removed) by a filter
    pub stopped: bool,
}

impl Token {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token {
            text: text.into(),
            stopped: false,
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Mark this token as stopped.
    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Replace the text of this token, keeping its stop flag.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
