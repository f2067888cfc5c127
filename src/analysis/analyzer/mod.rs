//! Analyzer implementations that combine tokenizers and filters.

mod analyzer;
mod normalizing;
mod pipeline;

pub use analyzer::Analyzer;
pub use normalizing::NormalizingAnalyzer;
pub use pipeline::PipelineAnalyzer;
