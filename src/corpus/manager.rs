//! Local corpus store: availability checks and atomic installs.
//!
//! Layout of the resource directory:
//!
//! ```text
//! <root>/
//!   en.json            installed corpus
//!   en.manifest.json   CorpusManifest, written after the corpus
//! ```
//!
//! Both files are written to a temporary file in `<root>` and renamed into
//! place, so readers never observe a partially written corpus. A language
//! counts as installed only when its manifest parses and its corpus file
//! exists.

use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use log::{debug, info, warn};
use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::corpus::catalog::CorpusCatalog;
use crate::corpus::{Corpus, CorpusManifest, CorpusStatus};
use crate::error::{Result, SyntheticityError};
use crate::language::LanguageCode;

/// Default read size while fetching a corpus.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

const MANIFEST_SUFFIX: &str = ".manifest.json";

/// Shared flag used to abort an in-flight corpus download.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Checks and installs per-language corpora in a resource directory.
#[derive(Debug)]
pub struct CorpusManager {
    root: PathBuf,
    catalog: Arc<dyn CorpusCatalog>,
    chunk_size: usize,
    install_lock: Mutex<()>,
}

impl CorpusManager {
    /// Open (creating if needed) the resource directory at `root`.
    pub fn new<P: AsRef<Path>>(root: P, catalog: Arc<dyn CorpusCatalog>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        debug!(
            "Corpus store at {} using {} catalog",
            root.display(),
            catalog.name()
        );

        Ok(CorpusManager {
            root,
            catalog,
            chunk_size: DEFAULT_CHUNK_SIZE,
            install_lock: Mutex::new(()),
        })
    }

    /// Set the read size used while fetching.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog(&self) -> &Arc<dyn CorpusCatalog> {
        &self.catalog
    }

    fn corpus_path(&self, language: &LanguageCode) -> PathBuf {
        self.root.join(format!("{language}.json"))
    }

    fn manifest_path(&self, language: &LanguageCode) -> PathBuf {
        self.root.join(format!("{language}{MANIFEST_SUFFIX}"))
    }

    /// Manifest of the installed corpus, if any. Never touches the network.
    pub fn manifest(&self, language: &LanguageCode) -> Option<CorpusManifest> {
        let bytes = fs::read(self.manifest_path(language)).ok()?;
        match serde_json::from_slice::<CorpusManifest>(&bytes) {
            Ok(manifest) if manifest.language == *language => Some(manifest),
            Ok(_) | Err(_) => {
                warn!("Ignoring unreadable manifest for '{language}'");
                None
            }
        }
    }

    /// Whether the corpus for `language` is installed locally.
    pub fn is_available(&self, language: &LanguageCode) -> bool {
        self.manifest(language).is_some() && self.corpus_path(language).is_file()
    }

    pub fn status(&self, language: &LanguageCode) -> CorpusStatus {
        if self.is_available(language) {
            CorpusStatus::Installed
        } else {
            CorpusStatus::NotInstalled
        }
    }

    /// Install the corpus for `language` unless it is already available.
    pub fn ensure(&self, language: &LanguageCode) -> Result<()> {
        self.ensure_with_cancel(language, &CancellationToken::new())
    }

    /// [`ensure`](Self::ensure) with a token that aborts the download.
    ///
    /// A cancelled download fails with `CorpusDownload` and leaves the
    /// language not installed.
    pub fn ensure_with_cancel(
        &self,
        language: &LanguageCode,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if self.is_available(language) {
            debug!("Corpus for '{language}' already installed");
            return Ok(());
        }

        let _guard = self.install_lock.lock();
        if self.is_available(language) {
            return Ok(());
        }

        if !self.catalog.publishes(language) {
            return Err(SyntheticityError::corpus_unavailable(format!(
                "the {} catalog publishes no corpus for '{language}'",
                self.catalog.name()
            )));
        }

        info!(
            "Installing corpus for '{language}' from the {} catalog",
            self.catalog.name()
        );
        self.install(language, cancel)?;

        if !self.is_available(language) {
            return Err(SyntheticityError::corpus_download(format!(
                "corpus for '{language}' failed verification after install"
            )));
        }
        Ok(())
    }

    fn install(&self, language: &LanguageCode, cancel: &CancellationToken) -> Result<()> {
        let payload = self.catalog.open(language)?;
        let bytes = self.fetch(payload.reader, cancel)?;

        let corpus = Corpus::from_slice(&bytes).map_err(|e| {
            SyntheticityError::corpus_download(format!(
                "corpus for '{language}' from {} is malformed: {e}",
                payload.source
            ))
        })?;
        if corpus.language != *language {
            return Err(SyntheticityError::corpus_download(format!(
                "{} delivered a corpus for '{}' instead of '{language}'",
                payload.source, corpus.language
            )));
        }

        self.write_atomic(&self.corpus_path(language), &bytes)?;

        let manifest = CorpusManifest {
            language: language.clone(),
            version: corpus.version,
            installed_at: Utc::now(),
            source: payload.source,
            bytes: bytes.len() as u64,
        };
        let manifest_bytes = serde_json::to_vec_pretty(&manifest)?;
        self.write_atomic(&self.manifest_path(language), &manifest_bytes)?;

        info!(
            "Installed corpus '{language}' version {} ({} bytes)",
            manifest.version, manifest.bytes
        );
        Ok(())
    }

    fn fetch(&self, mut reader: Box<dyn Read + Send>, cancel: &CancellationToken) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut chunk = vec![0u8; self.chunk_size];

        loop {
            if cancel.is_cancelled() {
                return Err(SyntheticityError::corpus_download("download cancelled"));
            }
            let n = reader.read(&mut chunk).map_err(|e| {
                SyntheticityError::corpus_download(format!("transfer failed: {e}"))
            })?;
            if n == 0 {
                break;
            }
            bytes.extend_from_slice(&chunk[..n]);
        }

        Ok(bytes)
    }

    fn write_atomic(&self, dest: &Path, bytes: &[u8]) -> Result<()> {
        let storage_error = |e: std::io::Error| {
            SyntheticityError::corpus_download(format!("cannot write {}: {e}", dest.display()))
        };

        let mut tmp = NamedTempFile::new_in(&self.root).map_err(storage_error)?;
        tmp.write_all(bytes).map_err(storage_error)?;
        tmp.as_file().sync_all().map_err(storage_error)?;
        tmp.persist(dest).map_err(|e| storage_error(e.error))?;
        Ok(())
    }

    /// Read an installed corpus.
    pub fn load(&self, language: &LanguageCode) -> Result<Corpus> {
        if !self.is_available(language) {
            return Err(SyntheticityError::corpus_unavailable(format!(
                "corpus for '{language}' is not installed"
            )));
        }

        let file = File::open(self.corpus_path(language))?;
        let corpus: Corpus = serde_json::from_reader(BufReader::new(file))?;
        corpus.validate()?;
        Ok(corpus)
    }

    /// Manifests of every installed corpus, sorted by language.
    pub fn installed(&self) -> Result<Vec<CorpusManifest>> {
        let mut manifests = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let name = entry?.file_name();
            let Some(code) = name.to_str().and_then(|n| n.strip_suffix(MANIFEST_SUFFIX)) else {
                continue;
            };
            let Ok(language) = LanguageCode::new(code) else {
                continue;
            };
            if self.is_available(&language)
                && let Some(manifest) = self.manifest(&language)
            {
                manifests.push(manifest);
            }
        }

        manifests.sort_by(|a, b| a.language.cmp(&b.language));
        Ok(manifests)
    }
}
