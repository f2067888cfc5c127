//! Error types for the syntheticity library.
//!
//! Every fallible operation returns [`Result`], whose error side is the
//! [`SyntheticityError`] enum. The pipeline-specific variants mirror the
//! stages of the computation (loading, detection, corpus management,
//! segmentation, validation); the remaining variants cover ambient failures.
//!
//! # Examples
//!
//! ```
//! use syntheticity::error::{Result, SyntheticityError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SyntheticityError::empty_input("nothing to analyze"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for syntheticity operations.
#[derive(Error, Debug)]
pub enum SyntheticityError {
    /// The input was not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The input contained no words after normalization.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// The language of the text could not be determined reliably.
    #[error("Language detection error: {0}")]
    LanguageDetection(String),

    /// No corpus is published (or installed) for the requested language.
    #[error("Corpus unavailable: {0}")]
    CorpusUnavailable(String),

    /// Fetching or installing a corpus failed. Callers may retry.
    #[error("Corpus download error: {0}")]
    CorpusDownload(String),

    /// No morphological analyzer exists for the language.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The computed index violated the `index >= 1.0` invariant.
    #[error("Malformed index: {0}")]
    MalformedIndex(String),

    /// Operation not valid in the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// I/O errors (file operations, resource directory, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with SyntheticityError.
pub type Result<T> = std::result::Result<T, SyntheticityError>;

impl SyntheticityError {
    /// Create a new encoding error.
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        SyntheticityError::Encoding(msg.into())
    }

    /// Create a new empty input error.
    pub fn empty_input<S: Into<String>>(msg: S) -> Self {
        SyntheticityError::EmptyInput(msg.into())
    }

    /// Create a new language detection error.
    pub fn language_detection<S: Into<String>>(msg: S) -> Self {
        SyntheticityError::LanguageDetection(msg.into())
    }

    /// Create a new corpus unavailable error.
    pub fn corpus_unavailable<S: Into<String>>(msg: S) -> Self {
        SyntheticityError::CorpusUnavailable(msg.into())
    }

    /// Create a new corpus download error.
    pub fn corpus_download<S: Into<String>>(msg: S) -> Self {
        SyntheticityError::CorpusDownload(msg.into())
    }

    /// Create a new unsupported language error.
    pub fn unsupported_language<S: Into<String>>(msg: S) -> Self {
        SyntheticityError::UnsupportedLanguage(msg.into())
    }

    /// Create a new malformed index error.
    pub fn malformed_index<S: Into<String>>(msg: S) -> Self {
        SyntheticityError::MalformedIndex(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        SyntheticityError::InvalidOperation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SyntheticityError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SyntheticityError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SyntheticityError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        SyntheticityError::Other(format!("Internal error: {}", msg.into()))
    }

    /// Whether retrying the failed call may succeed.
    ///
    /// Only corpus downloads are retryable; the library itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyntheticityError::CorpusDownload(_))
    }

    /// Distinct process exit status for each error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyntheticityError::Encoding(_) => 3,
            SyntheticityError::EmptyInput(_) => 4,
            SyntheticityError::LanguageDetection(_) => 5,
            SyntheticityError::CorpusUnavailable(_) => 6,
            SyntheticityError::CorpusDownload(_) => 7,
            SyntheticityError::UnsupportedLanguage(_) => 8,
            SyntheticityError::MalformedIndex(_) => 9,
            SyntheticityError::InvalidOperation(_) => 10,
            SyntheticityError::Io(_) => 11,
            SyntheticityError::Json(_) => 12,
            SyntheticityError::Other(_) => 1,
        }
    }
}
