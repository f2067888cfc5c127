//! Normalizing analyzer used to turn raw text into words.
//!
//! # Pipeline
//!
//! 1. WhitespaceTokenizer
//! 2. LowercaseFilter
//! 3. PunctuationFilter
//! 4. RemoveEmptyFilter
//!
//! # Examples
//!
//! ```
//! use syntheticity::analysis::analyzer::{Analyzer, NormalizingAnalyzer};
//!
//! let analyzer = NormalizingAnalyzer::new();
//! let tokens: Vec<_> = analyzer.analyze("Run, RUNNING... !!!").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "run");
//! assert_eq!(tokens[1].text, "running");
//! ```

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{LowercaseFilter, PunctuationFilter, RemoveEmptyFilter};
use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::error::Result;

/// Splits on whitespace, case-folds, strips punctuation and drops the rest.
pub struct NormalizingAnalyzer {
    inner: PipelineAnalyzer,
}

impl NormalizingAnalyzer {
    pub fn new() -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(PunctuationFilter::new()))
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name("normalizing");

        NormalizingAnalyzer { inner: analyzer }
    }
}

impl Default for NormalizingAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for NormalizingAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "normalizing"
    }
}

impl Debug for NormalizingAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizingAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
