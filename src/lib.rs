//! # Syntheticity
//!
//! Computes the syntheticity index of a text: the number of distinct
//! morphemes divided by the number of distinct words. Higher values mean a
//! more synthetic (morphologically rich) language.
//!
//! ## Pipeline
//!
//! - [`text`]: read UTF-8 text and extract its normalized word set
//! - [`language`]: detect the language when it is not given
//! - [`corpus`]: install per-language morphological corpora on demand
//! - [`morph`]: split words into morphemes
//! - [`engine`]: drive the pipeline as an explicit state machine
//!
//! ## Example
//!
//! ```
//! use syntheticity::config::SyntheticityConfig;
//! use syntheticity::engine::SyntheticityEngine;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let config = SyntheticityConfig {
//!     corpus_dir: dir.path().to_path_buf(),
//!     ..SyntheticityConfig::default()
//! };
//!
//! let mut engine = SyntheticityEngine::from_config(&config).unwrap();
//! engine.load_str("The players were replaying the games.", None).unwrap();
//! let index = engine.compute_index().unwrap();
//! assert!(index >= 1.0);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod language;
pub mod morph;
pub mod text;

pub mod prelude {
    pub use crate::config::SyntheticityConfig;
    pub use crate::engine::{EngineState, IndexReport, SyntheticityEngine};
    pub use crate::error::{Result, SyntheticityError};
    pub use crate::language::LanguageCode;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
