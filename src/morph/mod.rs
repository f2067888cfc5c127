//! Morphological segmentation of words.
//!
//! [`MorphTokenizer`] is the entry point: given a word and a language it
//! returns the word's morphemes, using the corpus installed by the shared
//! [`CorpusManager`]. It never downloads anything itself; callers run
//! [`CorpusManager::ensure`] first.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use syntheticity::corpus::{BundledCatalog, CorpusManager};
//! use syntheticity::language::LanguageCode;
//! use syntheticity::morph::MorphTokenizer;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let corpora = Arc::new(CorpusManager::new(dir.path(), Arc::new(BundledCatalog::new())).unwrap());
//! let en = LanguageCode::new("en").unwrap();
//! corpora.ensure(&en).unwrap();
//!
//! let tokenizer = MorphTokenizer::new(corpora);
//! assert_eq!(tokenizer.tokenize("running", &en).unwrap(), ["run", "ing"]);
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;
use parking_lot::RwLock;

use crate::corpus::CorpusManager;
use crate::error::{Result, SyntheticityError};
use crate::language::LanguageCode;

pub mod affix;

pub use affix::AffixSegmenter;

/// Distinct morphemes of a text.
pub type MorphSet = BTreeSet<String>;

/// Trait for word segmentation algorithms.
pub trait Segmenter: Send + Sync + std::fmt::Debug {
    /// Split a normalized word into its morphemes.
    fn segment(&self, word: &str) -> Vec<String>;

    /// Get the name of this segmenter.
    fn name(&self) -> &'static str;
}

/// Splits words into morphemes with per-language segmenters.
///
/// Segmenters are built lazily from installed corpora and cached in the
/// instance, so several tokenizers (and engines) can coexist with
/// different languages.
#[derive(Debug)]
pub struct MorphTokenizer {
    corpora: Arc<CorpusManager>,
    segmenters: RwLock<AHashMap<LanguageCode, Arc<dyn Segmenter>>>,
}

impl MorphTokenizer {
    pub fn new(corpora: Arc<CorpusManager>) -> Self {
        MorphTokenizer {
            corpora,
            segmenters: RwLock::new(AHashMap::new()),
        }
    }

    /// The corpus manager this tokenizer reads from.
    pub fn corpora(&self) -> &Arc<CorpusManager> {
        &self.corpora
    }

    fn segmenter(&self, language: &LanguageCode) -> Result<Arc<dyn Segmenter>> {
        if let Some(segmenter) = self.segmenters.read().get(language) {
            return Ok(segmenter.clone());
        }

        if !self.corpora.is_available(language) {
            return Err(if self.corpora.catalog().publishes(language) {
                SyntheticityError::corpus_unavailable(format!(
                    "corpus for '{language}' is not installed; ensure it first"
                ))
            } else {
                SyntheticityError::unsupported_language(format!(
                    "no morphological analyzer for '{language}'"
                ))
            });
        }

        let corpus = self.corpora.load(language)?;
        debug!(
            "Loaded '{language}' corpus version {} ({} roots)",
            corpus.version,
            corpus.roots.len()
        );
        let segmenter: Arc<dyn Segmenter> = Arc::new(AffixSegmenter::new(corpus));

        let mut segmenters = self.segmenters.write();
        Ok(segmenters
            .entry(language.clone())
            .or_insert(segmenter)
            .clone())
    }

    /// Split `word` into morphemes.
    ///
    /// The result is empty only for single characters the corpus does not
    /// know.
    pub fn tokenize(&self, word: &str, language: &LanguageCode) -> Result<Vec<String>> {
        let segmenter = self.segmenter(language)?;
        Ok(segmenter.segment(word))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::corpus::BundledCatalog;

    fn setup() -> (TempDir, MorphTokenizer) {
        let dir = TempDir::new().unwrap();
        let corpora =
            Arc::new(CorpusManager::new(dir.path(), Arc::new(BundledCatalog::new())).unwrap());
        (dir, MorphTokenizer::new(corpora))
    }

    #[test]
    fn test_requires_installed_corpus() {
        let (_dir, tokenizer) = setup();
        let en = LanguageCode::new("en").unwrap();

        assert!(matches!(
            tokenizer.tokenize("running", &en),
            Err(SyntheticityError::CorpusUnavailable(_))
        ));
        assert!(!tokenizer.corpora().is_available(&en));

        tokenizer.corpora().ensure(&en).unwrap();
        assert_eq!(tokenizer.tokenize("running", &en).unwrap(), ["run", "ing"]);
    }

    #[test]
    fn test_unknown_language_is_unsupported() {
        let (_dir, tokenizer) = setup();
        let xx = LanguageCode::new("xx").unwrap();

        assert!(matches!(
            tokenizer.tokenize("word", &xx),
            Err(SyntheticityError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let (_dir, tokenizer) = setup();
        let ru = LanguageCode::new("ru").unwrap();
        tokenizer.corpora().ensure(&ru).unwrap();

        let first = tokenizer.tokenize("домами", &ru).unwrap();
        let second = tokenizer.tokenize("домами", &ru).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, ["дом", "ами"]);
    }

    #[test]
    fn test_languages_coexist() {
        let (_dir, tokenizer) = setup();
        let en = LanguageCode::new("en").unwrap();
        let de = LanguageCode::new("de").unwrap();
        tokenizer.corpora().ensure(&en).unwrap();
        tokenizer.corpora().ensure(&de).unwrap();

        assert_eq!(tokenizer.tokenize("players", &en).unwrap(), ["play", "er", "s"]);
        assert_eq!(tokenizer.tokenize("spielen", &de).unwrap(), ["spiel", "en"]);
        assert_eq!(tokenizer.tokenize("katzen", &de).unwrap(), ["katze", "n"]);
    }
}
