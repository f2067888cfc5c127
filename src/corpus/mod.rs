//! Per-language morphological corpora and their local resource store.
//!
//! A [`Corpus`] is the JSON resource the segmenter needs for one language.
//! Corpora are published by a [`CorpusCatalog`] and installed into a local
//! directory by the [`CorpusManager`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SyntheticityError};
use crate::language::LanguageCode;

pub mod catalog;
#[cfg(feature = "http-catalog")]
pub mod http;
pub mod manager;

pub use catalog::{BundledCatalog, CorpusCatalog, CorpusPayload, DirectoryCatalog};
#[cfg(feature = "http-catalog")]
pub use http::HttpCatalog;
pub use manager::{CancellationToken, CorpusManager};

fn default_min_stem_len() -> usize {
    2
}

fn default_max_affixes() -> usize {
    4
}

/// Installation state of a language's corpus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusStatus {
    NotInstalled,
    Installed,
}

impl fmt::Display for CorpusStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusStatus::NotInstalled => f.write_str("not installed"),
            CorpusStatus::Installed => f.write_str("installed"),
        }
    }
}

/// Repair applied to a stem left over after an affix was stripped, so that
/// `runn` can still be matched against the root `run`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StemRepair {
    /// Collapse a doubled final letter (`runn` → `run`).
    Undouble,
    /// Append text (`mak` → `make`).
    Append { text: String },
    /// Replace a final substring (`happi` → `happy`).
    ReplaceSuffix { from: String, to: String },
}

impl StemRepair {
    /// Apply the repair, returning `None` when it does not match the stem.
    pub fn apply(&self, stem: &str) -> Option<String> {
        match self {
            StemRepair::Undouble => {
                let mut chars = stem.chars().rev();
                let last = chars.next()?;
                let before = chars.next()?;
                (last == before && last.is_alphabetic())
                    .then(|| stem[..stem.len() - last.len_utf8()].to_string())
            }
            StemRepair::Append { text } => Some(format!("{stem}{text}")),
            StemRepair::ReplaceSuffix { from, to } => stem
                .strip_suffix(from.as_str())
                .filter(|rest| !rest.is_empty())
                .map(|rest| format!("{rest}{to}")),
        }
    }
}

/// Morphological resource for one language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    /// Language this corpus describes.
    pub language: LanguageCode,

    /// Publisher's version string.
    pub version: String,

    /// Shortest stem (in characters) that may remain after stripping an affix.
    #[serde(default = "default_min_stem_len")]
    pub min_stem_len: usize,

    /// Maximum number of affixes stripped from one word.
    #[serde(default = "default_max_affixes")]
    pub max_affixes: usize,

    #[serde(default)]
    pub prefixes: Vec<String>,

    #[serde(default)]
    pub suffixes: Vec<String>,

    #[serde(default)]
    pub stem_repairs: Vec<StemRepair>,

    /// Known roots. Decompositions must bottom out in one of these.
    #[serde(default)]
    pub roots: Vec<String>,

    /// Explicit analyses that take precedence over affix stripping.
    #[serde(default)]
    pub segmentations: BTreeMap<String, Vec<String>>,
}

impl Corpus {
    /// Parse and validate a corpus from its JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let corpus: Corpus = serde_json::from_slice(bytes)?;
        corpus.validate()?;
        Ok(corpus)
    }

    /// Check structural invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() && self.segmentations.is_empty() {
            return Err(SyntheticityError::other(format!(
                "corpus for '{}' has neither roots nor segmentations",
                self.language
            )));
        }
        if self.min_stem_len == 0 {
            return Err(SyntheticityError::other("min_stem_len must be at least 1"));
        }

        let blank_affix = self
            .prefixes
            .iter()
            .chain(&self.suffixes)
            .chain(&self.roots)
            .any(|s| s.is_empty());
        if blank_affix {
            return Err(SyntheticityError::other(format!(
                "corpus for '{}' contains an empty affix or root",
                self.language
            )));
        }

        for (word, morphemes) in &self.segmentations {
            if morphemes.is_empty() || morphemes.iter().any(|m| m.is_empty()) {
                return Err(SyntheticityError::other(format!(
                    "segmentation of '{word}' has an empty morpheme"
                )));
            }
        }

        Ok(())
    }
}

/// Metadata written next to every installed corpus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusManifest {
    pub language: LanguageCode,
    pub version: String,
    pub installed_at: DateTime<Utc>,
    /// Where the corpus was fetched from.
    pub source: String,
    /// Size of the installed corpus file.
    pub bytes: u64,
}
