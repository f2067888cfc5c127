//! Text loading and word-set extraction.
//!
//! [`TextLoader`] reads UTF-8 text from any [`Read`] source, normalizes it
//! through an [`Analyzer`] and returns the loaded [`Text`] together with its
//! [`WordSet`].
//!
//! # Examples
//!
//! ```
//! use syntheticity::text::TextLoader;
//!
//! let loader = TextLoader::new();
//! let (text, words) = loader.load_str("Run, running; RUNNER run!").unwrap();
//!
//! assert_eq!(text.normalized(), "run running runner run");
//! assert_eq!(words.len(), 3);
//! assert!(words.contains("runner"));
//! ```

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::{Analyzer, NormalizingAnalyzer};
use crate::error::{Result, SyntheticityError};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Distinct normalized words of a text.
///
/// Ordered so that iteration, and everything derived from it, is
/// deterministic.
pub type WordSet = BTreeSet<String>;

/// Loaded text: the raw content and its normalized form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text {
    raw: String,
    normalized: String,
}

impl Text {
    /// The content exactly as read (minus a leading BOM).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Case-folded, punctuation-free words joined by single spaces.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Number of word tokens (not distinct words) in the normalized form.
    pub fn token_count(&self) -> usize {
        self.normalized.split(' ').filter(|t| !t.is_empty()).count()
    }
}

/// Reads text and extracts its [`WordSet`].
#[derive(Clone)]
pub struct TextLoader {
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TextLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLoader")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl Default for TextLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLoader {
    /// Create a loader backed by the [`NormalizingAnalyzer`].
    pub fn new() -> Self {
        TextLoader {
            analyzer: Arc::new(NormalizingAnalyzer::new()),
        }
    }

    /// Create a loader with a custom analyzer.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        TextLoader { analyzer }
    }

    /// Read all of `source` and extract its words.
    ///
    /// Fails with [`SyntheticityError::Encoding`] if the bytes are not UTF-8
    /// and with [`SyntheticityError::EmptyInput`] if no word survives
    /// normalization.
    pub fn load<R: Read>(&self, mut source: R) -> Result<(Text, WordSet)> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

        let raw = std::str::from_utf8(content).map_err(|e| {
            SyntheticityError::encoding(format!(
                "input is not valid UTF-8 (invalid byte sequence at offset {})",
                e.valid_up_to()
            ))
        })?;

        self.load_str(raw)
    }

    /// Open and load a file.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<(Text, WordSet)> {
        let path = path.as_ref();
        debug!("Loading text from {}", path.display());
        let file = File::open(path)?;
        self.load(BufReader::new(file))
    }

    /// Load text that is already in memory.
    pub fn load_str(&self, raw: &str) -> Result<(Text, WordSet)> {
        let tokens: Vec<String> = self.analyzer.analyze(raw)?.map(|t| t.text).collect();
        let words: WordSet = tokens.iter().cloned().collect();

        if words.is_empty() {
            return Err(SyntheticityError::empty_input(
                "text contains no words after normalization",
            ));
        }

        debug!(
            "Loaded {} tokens, {} distinct words ({} analyzer)",
            tokens.len(),
            words.len(),
            self.analyzer.name()
        );

        let text = Text {
            raw: raw.to_string(),
            normalized: tokens.join(" "),
        };
        Ok((text, words))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_load_deduplicates_and_normalizes() {
        let loader = TextLoader::new();
        let (text, words) = loader.load_str("The cat. THE CAT! the cat?").unwrap();

        assert_eq!(text.token_count(), 6);
        assert_eq!(
            words.into_iter().collect::<Vec<_>>(),
            vec!["cat".to_string(), "the".to_string()]
        );
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let loader = TextLoader::new();

        for input in ["", "   \n\t", "... !!! ???", "-- « » --"] {
            match loader.load_str(input) {
                Err(SyntheticityError::EmptyInput(_)) => {}
                other => panic!("expected EmptyInput for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_utf8_is_an_encoding_error() {
        let loader = TextLoader::new();
        let bytes: &[u8] = &[b'o', b'k', b' ', 0xFF, 0xFE, b'x'];

        match loader.load(Cursor::new(bytes)) {
            Err(SyntheticityError::Encoding(msg)) => assert!(msg.contains("offset 3")),
            other => panic!("expected Encoding error, got {other:?}"),
        }
    }

    #[test]
    fn test_bom_is_skipped() {
        let loader = TextLoader::new();
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("Hallo Welt".as_bytes());

        let (text, words) = loader.load(Cursor::new(bytes)).unwrap();
        assert_eq!(text.raw(), "Hallo Welt");
        assert!(words.contains("hallo"));
    }

    #[test]
    fn test_load_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Привет, мир! Привет.").unwrap();

        let (_, words) = TextLoader::new().load_path(file.path()).unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.contains("привет"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TextLoader::new().load_path("/definitely/not/here.txt");
        assert!(matches!(result, Err(SyntheticityError::Io(_))));
    }
}
