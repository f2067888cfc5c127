//! Sources that publish corpora for installation.
//!
//! A [`CorpusCatalog`] is the transport used by
//! [`CorpusManager`](super::CorpusManager) to fetch a language's corpus.
//! The manager owns installation; catalogs only hand out byte streams.

use std::fmt::Debug;
use std::fs::{self, File};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use crate::error::{Result, SyntheticityError};
use crate::language::LanguageCode;

/// A corpus byte stream together with a description of where it came from.
pub struct CorpusPayload {
    /// Human-readable origin, recorded in the install manifest.
    pub source: String,
    pub reader: Box<dyn Read + Send>,
}

impl Debug for CorpusPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusPayload")
            .field("source", &self.source)
            .finish()
    }
}

/// Trait for corpus publishers.
pub trait CorpusCatalog: Send + Sync + Debug {
    /// Get the name of this catalog (for logs and manifests).
    fn name(&self) -> &'static str;

    /// Languages this catalog can deliver.
    fn languages(&self) -> Result<Vec<LanguageCode>>;

    /// Whether a corpus is published for `language`.
    fn publishes(&self, language: &LanguageCode) -> bool;

    /// Open the corpus for `language`.
    ///
    /// Fails with `CorpusUnavailable` if the language is not published and
    /// with `CorpusDownload` if the transport fails.
    fn open(&self, language: &LanguageCode) -> Result<CorpusPayload>;
}

const BUNDLED: &[(&str, &str)] = &[
    ("de", include_str!("data/de.json")),
    ("en", include_str!("data/en.json")),
    ("es", include_str!("data/es.json")),
    ("ru", include_str!("data/ru.json")),
];

/// Corpora compiled into the binary. Works offline.
#[derive(Clone, Debug, Default)]
pub struct BundledCatalog;

impl BundledCatalog {
    pub fn new() -> Self {
        BundledCatalog
    }

    fn find(language: &LanguageCode) -> Option<&'static str> {
        BUNDLED
            .iter()
            .find(|(code, _)| *code == language.as_str())
            .map(|(_, json)| *json)
    }
}

impl CorpusCatalog for BundledCatalog {
    fn name(&self) -> &'static str {
        "bundled"
    }

    fn languages(&self) -> Result<Vec<LanguageCode>> {
        BUNDLED
            .iter()
            .map(|(code, _)| LanguageCode::new(code))
            .collect()
    }

    fn publishes(&self, language: &LanguageCode) -> bool {
        Self::find(language).is_some()
    }

    fn open(&self, language: &LanguageCode) -> Result<CorpusPayload> {
        let json = Self::find(language).ok_or_else(|| {
            SyntheticityError::corpus_unavailable(format!(
                "no bundled corpus for language '{language}'"
            ))
        })?;

        Ok(CorpusPayload {
            source: format!("bundled:{language}"),
            reader: Box::new(Cursor::new(json.as_bytes())),
        })
    }
}

/// A mirror directory holding one `<language>.json` file per corpus.
#[derive(Clone, Debug)]
pub struct DirectoryCatalog {
    root: PathBuf,
}

impl DirectoryCatalog {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        DirectoryCatalog {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn corpus_path(&self, language: &LanguageCode) -> PathBuf {
        self.root.join(format!("{language}.json"))
    }
}

impl CorpusCatalog for DirectoryCatalog {
    fn name(&self) -> &'static str {
        "directory"
    }

    fn languages(&self) -> Result<Vec<LanguageCode>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            SyntheticityError::corpus_download(format!(
                "cannot list catalog directory {}: {e}",
                self.root.display()
            ))
        })?;

        let mut languages: Vec<LanguageCode> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let code = name.strip_suffix(".json")?;
                LanguageCode::new(code).ok()
            })
            .collect();
        languages.sort();
        Ok(languages)
    }

    fn publishes(&self, language: &LanguageCode) -> bool {
        self.corpus_path(language).is_file()
    }

    fn open(&self, language: &LanguageCode) -> Result<CorpusPayload> {
        let path = self.corpus_path(language);
        if !path.is_file() {
            return Err(SyntheticityError::corpus_unavailable(format!(
                "{} does not publish language '{language}'",
                self.root.display()
            )));
        }

        let file = File::open(&path).map_err(|e| {
            SyntheticityError::corpus_download(format!("cannot open {}: {e}", path.display()))
        })?;

        Ok(CorpusPayload {
            source: format!("file:{}", path.display()),
            reader: Box::new(file),
        })
    }
}
