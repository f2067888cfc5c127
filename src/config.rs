//! Configuration for syntheticity computations.
//!
//! [`SyntheticityConfig`] collects everything an engine needs from the
//! outside world: where corpora live, where they come from, and how much
//! parallelism to use. It can be read from a JSON file; the CLI layers its
//! flags and environment variables on top.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::corpus::manager::DEFAULT_CHUNK_SIZE;
use crate::corpus::{BundledCatalog, CorpusCatalog, CorpusManager, DirectoryCatalog};
use crate::error::{Result, SyntheticityError};
use crate::language::ProfileDetector;
use crate::language::detector::DEFAULT_MIN_TOKENS;

/// Environment variable that overrides the corpus directory.
pub const CORPUS_DIR_ENV: &str = "SYNTHETICITY_CORPUS_DIR";

/// Default corpus directory, relative to the working directory.
pub const DEFAULT_CORPUS_DIR: &str = ".syntheticity/corpora";

/// Where corpora are fetched from.
///
/// Written as `bundled`, `directory:<path>` or `http:<url>` in config files
/// and on the command line. A bare `http://` or `https://` URL is accepted
/// as `http:<url>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CatalogConfig {
    /// Corpora compiled into the binary.
    #[default]
    Bundled,

    /// A mirror directory of `<lang>.json` files.
    Directory(PathBuf),

    /// A remote mirror; needs the `http-catalog` feature.
    Http(String),
}

impl CatalogConfig {
    /// Instantiate the catalog this entry describes.
    pub fn build(&self) -> Result<Arc<dyn CorpusCatalog>> {
        match self {
            CatalogConfig::Bundled => Ok(Arc::new(BundledCatalog::new())),
            CatalogConfig::Directory(path) => Ok(Arc::new(DirectoryCatalog::new(path))),
            #[cfg(feature = "http-catalog")]
            CatalogConfig::Http(url) => Ok(Arc::new(crate::corpus::HttpCatalog::discover(
                url.as_str(),
            )?)),
            #[cfg(not(feature = "http-catalog"))]
            CatalogConfig::Http(url) => Err(SyntheticityError::invalid_config(format!(
                "catalog http:{url} requires the `http-catalog` feature"
            ))),
        }
    }
}

impl fmt::Display for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogConfig::Bundled => f.write_str("bundled"),
            CatalogConfig::Directory(path) => write!(f, "directory:{}", path.display()),
            CatalogConfig::Http(url) => write!(f, "http:{url}"),
        }
    }
}

impl FromStr for CatalogConfig {
    type Err = SyntheticityError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "bundled" {
            return Ok(CatalogConfig::Bundled);
        }
        if has_url_scheme(s) {
            return Ok(CatalogConfig::Http(s.trim_end_matches('/').to_string()));
        }
        match s.split_once(':') {
            Some(("directory", path)) if !path.is_empty() => {
                Ok(CatalogConfig::Directory(PathBuf::from(path)))
            }
            Some(("http", url)) if has_url_scheme(url) => {
                Ok(CatalogConfig::Http(url.trim_end_matches('/').to_string()))
            }
            Some(("http", url)) => Err(SyntheticityError::invalid_config(format!(
                "catalog URL '{url}' must start with http:// or https://"
            ))),
            _ => Err(SyntheticityError::invalid_config(format!(
                "unknown catalog '{s}' (expected bundled, directory:<path> or http:<url>)"
            ))),
        }
    }
}

fn has_url_scheme(s: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| s.len() > scheme.len() && s.starts_with(scheme))
}

impl TryFrom<String> for CatalogConfig {
    type Error = SyntheticityError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CatalogConfig> for String {
    fn from(value: CatalogConfig) -> Self {
        value.to_string()
    }
}

/// Configuration for the syntheticity engine and its corpus store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticityConfig {
    /// Directory holding installed corpora.
    pub corpus_dir: PathBuf,

    /// Source of corpora that are not installed yet.
    pub catalog: CatalogConfig,

    /// Minimum number of word tokens required for language detection.
    pub min_detection_tokens: usize,

    /// Thread pool size for tokenizing words.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Read size in bytes while fetching a corpus.
    pub chunk_size: usize,
}

impl Default for SyntheticityConfig {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from(DEFAULT_CORPUS_DIR),
            catalog: CatalogConfig::Bundled,
            min_detection_tokens: DEFAULT_MIN_TOKENS,
            thread_pool_size: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SyntheticityConfig {
    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SyntheticityError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: SyntheticityConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.thread_pool_size == Some(0) {
            return Err(SyntheticityError::invalid_config(
                "thread_pool_size must be at least 1",
            ));
        }
        if self.chunk_size == 0 {
            return Err(SyntheticityError::invalid_config(
                "chunk_size must be at least 1",
            ));
        }
        Ok(())
    }

    /// Number of tokenizer workers to use.
    pub fn worker_count(&self) -> usize {
        self.thread_pool_size.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Open the corpus store described by this configuration.
    pub fn corpus_manager(&self) -> Result<CorpusManager> {
        let catalog = self.catalog.build()?;
        Ok(CorpusManager::new(&self.corpus_dir, catalog)?.with_chunk_size(self.chunk_size))
    }

    pub fn detector(&self) -> ProfileDetector {
        ProfileDetector::with_min_tokens(self.min_detection_tokens)
    }
}
