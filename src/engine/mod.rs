//! The syntheticity engine.
//!
//! [`SyntheticityEngine`] ties the pipeline together as an explicit state
//! machine:
//!
//! ```text
//! Empty -> TextLoaded -> LanguageResolved -> CorpusReady -> IndexComputed
//! ```
//!
//! Every [`load`](SyntheticityEngine::load) starts over from `TextLoaded`.
//! Later transitions happen on demand, so calling
//! [`compute_index`](SyntheticityEngine::compute_index) right after loading
//! detects the language, installs its corpus and tokenizes the words.
//!
//! # Examples
//!
//! ```
//! use syntheticity::config::SyntheticityConfig;
//! use syntheticity::engine::{EngineState, SyntheticityEngine};
//! use syntheticity::language::LanguageCode;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let config = SyntheticityConfig {
//!     corpus_dir: dir.path().to_path_buf(),
//!     ..SyntheticityConfig::default()
//! };
//!
//! let mut engine = SyntheticityEngine::from_config(&config).unwrap();
//! engine
//!     .load_str("run running runner", Some(LanguageCode::new("en").unwrap()))
//!     .unwrap();
//!
//! assert_eq!(engine.compute_index().unwrap(), 1.0);
//! assert_eq!(engine.state(), EngineState::IndexComputed);
//! ```

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::config::SyntheticityConfig;
use crate::corpus::CancellationToken;
use crate::error::{Result, SyntheticityError};
use crate::language::{LanguageCode, LanguageDetector};
use crate::morph::{MorphSet, MorphTokenizer};
use crate::text::{Text, TextLoader, WordSet};

/// Callback invoked with `(done, total)` while words are tokenized.
///
/// May be called from worker threads, in any order of `done`.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Observable state of a [`SyntheticityEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Empty,
    TextLoaded,
    LanguageResolved,
    CorpusReady,
    IndexComputed,
}

/// Summary of one computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexReport {
    /// Language the words were analyzed in.
    pub language: LanguageCode,

    /// Whether the language was detected rather than supplied.
    pub language_detected: bool,

    /// Number of distinct words.
    pub words: usize,

    /// Number of distinct morphemes.
    pub morphemes: usize,

    /// `morphemes / words`, always at least 1.0.
    pub index: f64,
}

#[derive(Debug, Clone)]
struct ResolvedLanguage {
    code: LanguageCode,
    detected: bool,
}

/// Everything derived from one loaded text. Replaced wholesale on load.
#[derive(Debug)]
struct Session {
    text: Text,
    words: WordSet,
    language: Option<ResolvedLanguage>,
    corpus_ready: bool,
    morphemes: Option<MorphSet>,
    index: Option<f64>,
}

impl Session {
    fn new(text: Text, words: WordSet) -> Self {
        Session {
            text,
            words,
            language: None,
            corpus_ready: false,
            morphemes: None,
            index: None,
        }
    }

    fn state(&self) -> EngineState {
        if self.index.is_some() {
            EngineState::IndexComputed
        } else if self.corpus_ready {
            EngineState::CorpusReady
        } else if self.language.is_some() {
            EngineState::LanguageResolved
        } else {
            EngineState::TextLoaded
        }
    }
}

/// Computes the syntheticity index of one text at a time.
///
/// An engine is not meant to be shared between threads; create one per
/// request. The [`MorphTokenizer`] (and with it the corpus store) can be
/// shared between engines.
pub struct SyntheticityEngine {
    loader: TextLoader,
    detector: Arc<dyn LanguageDetector>,
    tokenizer: Arc<MorphTokenizer>,
    /// Tokenization runs sequentially when unset.
    thread_pool: Option<Arc<ThreadPool>>,
    progress: Option<ProgressCallback>,
    session: Option<Session>,
}

impl fmt::Debug for SyntheticityEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntheticityEngine")
            .field("detector", &self.detector.name())
            .field("workers", &self.worker_count())
            .field("state", &self.state())
            .finish()
    }
}

impl SyntheticityEngine {
    /// Create an engine from a configuration.
    pub fn from_config(config: &SyntheticityConfig) -> Result<Self> {
        config.validate()?;
        let corpora = Arc::new(config.corpus_manager()?);

        Self::with_parts(
            Arc::new(MorphTokenizer::new(corpora)),
            Arc::new(config.detector()),
        )
        .with_thread_pool_size(config.worker_count())
    }

    /// Create a sequential engine from its collaborators.
    pub fn with_parts(tokenizer: Arc<MorphTokenizer>, detector: Arc<dyn LanguageDetector>) -> Self {
        SyntheticityEngine {
            loader: TextLoader::new(),
            detector,
            tokenizer,
            thread_pool: None,
            progress: None,
            session: None,
        }
    }

    /// Tokenize on `size` worker threads. A size of 1 runs sequentially.
    pub fn with_thread_pool_size(mut self, size: usize) -> Result<Self> {
        if size <= 1 {
            self.thread_pool = None;
            return Ok(self);
        }

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(size)
            .thread_name(|i| format!("syntheticity-{i}"))
            .build()
            .map_err(|e| SyntheticityError::internal(format!("Failed to create thread pool: {e}")))?;
        self.thread_pool = Some(Arc::new(thread_pool));
        Ok(self)
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn worker_count(&self) -> usize {
        self.thread_pool
            .as_ref()
            .map_or(1, |pool| pool.current_num_threads())
    }

    /// Load a new text, discarding everything derived from the previous one.
    ///
    /// When `language` is given it is used as is and detection is skipped.
    /// On failure the engine is left `Empty`.
    pub fn load<R: Read>(&mut self, source: R, language: Option<LanguageCode>) -> Result<()> {
        self.session = None;
        let (text, words) = self.loader.load(source)?;
        self.start_session(text, words, language);
        Ok(())
    }

    pub fn load_str(&mut self, raw: &str, language: Option<LanguageCode>) -> Result<()> {
        self.session = None;
        let (text, words) = self.loader.load_str(raw)?;
        self.start_session(text, words, language);
        Ok(())
    }

    pub fn load_path<P: AsRef<Path>>(
        &mut self,
        path: P,
        language: Option<LanguageCode>,
    ) -> Result<()> {
        self.session = None;
        let (text, words) = self.loader.load_path(path)?;
        self.start_session(text, words, language);
        Ok(())
    }

    fn start_session(&mut self, text: Text, words: WordSet, language: Option<LanguageCode>) {
        debug!(
            "Loaded text with {} distinct words ({} tokens)",
            words.len(),
            text.token_count()
        );
        let mut session = Session::new(text, words);
        session.language = language.map(|code| ResolvedLanguage {
            code,
            detected: false,
        });
        self.session = Some(session);
    }

    pub fn state(&self) -> EngineState {
        self.session
            .as_ref()
            .map_or(EngineState::Empty, Session::state)
    }

    pub fn words(&self) -> Option<&WordSet> {
        self.session.as_ref().map(|s| &s.words)
    }

    /// The resolved language, if any. Never triggers detection.
    pub fn language(&self) -> Option<&LanguageCode> {
        self.session
            .as_ref()
            .and_then(|s| s.language.as_ref())
            .map(|l| &l.code)
    }

    /// Whether the resolved language came from detection.
    pub fn language_detected(&self) -> Option<bool> {
        self.session
            .as_ref()
            .and_then(|s| s.language.as_ref())
            .map(|l| l.detected)
    }

    pub fn morphemes(&self) -> Option<&MorphSet> {
        self.session.as_ref().and_then(|s| s.morphemes.as_ref())
    }

    /// The cached index, if it has been computed for the loaded text.
    pub fn index(&self) -> Option<f64> {
        self.session.as_ref().and_then(|s| s.index)
    }

    fn session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| SyntheticityError::invalid_operation("no text loaded"))
    }

    fn session_mut(&mut self) -> Result<&mut Session> {
        self.session
            .as_mut()
            .ok_or_else(|| SyntheticityError::invalid_operation("no text loaded"))
    }

    /// Assign the language of the loaded text.
    ///
    /// The language is fixed once resolved; assigning the same code again is
    /// a no-op, assigning a different one fails.
    pub fn set_language(&mut self, language: LanguageCode) -> Result<()> {
        let session = self.session_mut()?;
        match &session.language {
            Some(current) if current.code == language => Ok(()),
            Some(current) => Err(SyntheticityError::invalid_operation(format!(
                "language already resolved as '{}'",
                current.code
            ))),
            None => {
                debug!("Language set to '{language}'");
                session.language = Some(ResolvedLanguage {
                    code: language,
                    detected: false,
                });
                Ok(())
            }
        }
    }

    /// Return the language of the loaded text, detecting it on first need.
    pub fn resolve_language(&mut self) -> Result<LanguageCode> {
        let session = self.session()?;
        if let Some(language) = &session.language {
            return Ok(language.code.clone());
        }

        let code = self.detector.detect(session.text.raw())?;
        info!("Detected language '{code}' ({} detector)", self.detector.name());

        self.session_mut()?.language = Some(ResolvedLanguage {
            code: code.clone(),
            detected: true,
        });
        Ok(code)
    }

    /// Make sure the corpus for the loaded text's language is installed.
    pub fn prepare_corpus(&mut self) -> Result<()> {
        self.prepare_corpus_with_cancel(&CancellationToken::new())
    }

    /// Like [`prepare_corpus`](Self::prepare_corpus), aborting a download
    /// when `cancel` fires.
    pub fn prepare_corpus_with_cancel(&mut self, cancel: &CancellationToken) -> Result<()> {
        if self.session()?.corpus_ready {
            return Ok(());
        }

        let language = self.resolve_language()?;
        self.tokenizer
            .corpora()
            .ensure_with_cancel(&language, cancel)?;
        self.session_mut()?.corpus_ready = true;
        Ok(())
    }

    /// Compute the syntheticity index of the loaded text.
    ///
    /// Runs whatever transitions are still pending. Once computed the value
    /// is cached and returned unchanged until the next load. An index below
    /// 1.0 is rejected with [`SyntheticityError::MalformedIndex`] and never
    /// cached.
    pub fn compute_index(&mut self) -> Result<f64> {
        if let Some(index) = self.session()?.index {
            return Ok(index);
        }
        if self.session()?.words.is_empty() {
            return Err(SyntheticityError::empty_input("word set is empty"));
        }

        self.prepare_corpus()?;
        let language = self.resolve_language()?;

        if self.session()?.morphemes.is_none() {
            let morphemes = self.tokenize_words(&self.session()?.words, &language)?;
            self.session_mut()?.morphemes = Some(morphemes);
        }

        let session = self.session_mut()?;
        let words = session.words.len();
        let morphemes = session.morphemes.as_ref().map_or(0, |m| m.len());
        let index = morphemes as f64 / words as f64;

        if index < 1.0 {
            return Err(SyntheticityError::malformed_index(format!(
                "{morphemes} distinct morphemes for {words} distinct words gives {index:.4}, \
                 below the minimum of 1.0"
            )));
        }

        info!("Syntheticity index {index:.4} ({morphemes} morphemes / {words} words, '{language}')");
        session.index = Some(index);
        Ok(index)
    }

    /// Summary of the last computation.
    pub fn report(&self) -> Result<IndexReport> {
        let session = self.session()?;
        let (Some(index), Some(language), Some(morphemes)) =
            (session.index, &session.language, &session.morphemes)
        else {
            return Err(SyntheticityError::invalid_operation(
                "index has not been computed",
            ));
        };

        Ok(IndexReport {
            language: language.code.clone(),
            language_detected: language.detected,
            words: session.words.len(),
            morphemes: morphemes.len(),
            index,
        })
    }

    /// Union of the morphemes of every word.
    ///
    /// Results are merged in word order, so the first failing word (in that
    /// order) decides the error regardless of which worker finished first.
    fn tokenize_words(&self, words: &WordSet, language: &LanguageCode) -> Result<MorphSet> {
        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        let total = words.len();
        let done = AtomicUsize::new(0);

        let tokenize_one = |word: &str| {
            let result = self.tokenizer.tokenize(word, language);
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(progress) = &self.progress {
                progress(finished, total);
            }
            result
        };

        let results: Vec<Result<Vec<String>>> = match &self.thread_pool {
            Some(pool) => {
                debug!(
                    "Tokenizing {total} words on {} threads",
                    pool.current_num_threads()
                );
                pool.install(|| words.par_iter().map(|w| tokenize_one(w)).collect())
            }
            None => {
                let mut results = Vec::with_capacity(total);
                for word in &words {
                    let result = tokenize_one(word);
                    let failed = result.is_err();
                    results.push(result);
                    if failed {
                        break;
                    }
                }
                results
            }
        };

        let mut morphemes = MorphSet::new();
        for result in results {
            morphemes.extend(result?);
        }
        Ok(morphemes)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tempfile::TempDir;

    use super::*;
    use crate::corpus::{BundledCatalog, CorpusManager};
    use crate::language::ProfileDetector;

    fn engine(dir: &TempDir) -> SyntheticityEngine {
        let corpora =
            CorpusManager::new(dir.path(), Arc::new(BundledCatalog::new())).unwrap();
        SyntheticityEngine::with_parts(
            Arc::new(MorphTokenizer::new(Arc::new(corpora))),
            Arc::new(ProfileDetector::new()),
        )
    }

    fn en() -> Option<LanguageCode> {
        Some(LanguageCode::new("en").unwrap())
    }

    #[test]
    fn test_state_transitions() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir);
        assert_eq!(engine.state(), EngineState::Empty);

        engine.load_str("the cat sat on the mat", None).unwrap();
        assert_eq!(engine.state(), EngineState::TextLoaded);
        assert!(engine.language().is_none());

        assert_eq!(engine.resolve_language().unwrap().as_str(), "en");
        assert_eq!(engine.state(), EngineState::LanguageResolved);
        assert_eq!(engine.language_detected(), Some(true));

        engine.prepare_corpus().unwrap();
        assert_eq!(engine.state(), EngineState::CorpusReady);

        engine.compute_index().unwrap();
        assert_eq!(engine.state(), EngineState::IndexComputed);
    }

    #[test]
    fn test_run_running_runner_is_exactly_one() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir);
        engine.load_str("run running runner", en()).unwrap();

        assert_eq!(engine.compute_index().unwrap(), 1.0);
        let morphemes: Vec<&str> = engine
            .morphemes()
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(morphemes, ["er", "ing", "run"]);

        let report = engine.report().unwrap();
        assert_eq!(report.words, 3);
        assert_eq!(report.morphemes, 3);
        assert!(!report.language_detected);
    }

    #[test]
    fn test_compute_index_is_cached() {
        let dir = TempDir::new().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut engine = engine(&dir).with_progress(Arc::new(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        engine.load_str("unhappiness makes players sad", en()).unwrap();
        let first = engine.compute_index().unwrap();
        let second = engine.compute_index().unwrap();

        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_index_below_one_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir);
        // {dog, cat, s} for four distinct words.
        engine.load_str("dog dogs cat cats", en()).unwrap();

        assert!(matches!(
            engine.compute_index(),
            Err(SyntheticityError::MalformedIndex(_))
        ));
        assert!(engine.index().is_none());
        assert!(engine.report().is_err());
        assert_ne!(engine.state(), EngineState::IndexComputed);
    }

    #[test]
    fn test_empty_input_leaves_engine_empty() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir);
        engine.load_str("run", en()).unwrap();

        for input in ["", "   \n\t", "... !!! ???"] {
            assert!(matches!(
                engine.load_str(input, en()),
                Err(SyntheticityError::EmptyInput(_))
            ));
            assert_eq!(engine.state(), EngineState::Empty);
        }
        // Nothing reached the corpus store.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unknown_explicit_language() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir);
        engine
            .load_str("some words here", Some(LanguageCode::new("xx").unwrap()))
            .unwrap();

        assert!(matches!(
            engine.prepare_corpus(),
            Err(SyntheticityError::CorpusUnavailable(_))
        ));
        assert_eq!(engine.state(), EngineState::LanguageResolved);
        assert!(matches!(
            engine.compute_index(),
            Err(SyntheticityError::CorpusUnavailable(_))
        ));
        assert!(engine.morphemes().is_none());
    }

    #[test]
    fn test_language_is_fixed_once_resolved() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir);

        assert!(matches!(
            engine.set_language(LanguageCode::new("en").unwrap()),
            Err(SyntheticityError::InvalidOperation(_))
        ));

        engine.load_str("run running", None).unwrap();
        engine.set_language(LanguageCode::new("en").unwrap()).unwrap();
        engine.set_language(LanguageCode::new("en").unwrap()).unwrap();
        assert!(matches!(
            engine.set_language(LanguageCode::new("de").unwrap()),
            Err(SyntheticityError::InvalidOperation(_))
        ));
        assert_eq!(engine.language_detected(), Some(false));
    }

    #[test]
    fn test_load_resets_downstream_state() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir);
        engine.load_str("run running runner", en()).unwrap();
        engine.compute_index().unwrap();

        engine.load_str("der hund und die katzen", None).unwrap();
        assert_eq!(engine.state(), EngineState::TextLoaded);
        assert!(engine.index().is_none());
        assert!(engine.morphemes().is_none());
        assert!(engine.language().is_none());
    }

    #[test]
    fn test_compute_without_text() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir);
        assert!(matches!(
            engine.compute_index(),
            Err(SyntheticityError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = TempDir::new().unwrap();
        let text = "the players were replaying the games and the children \
                    were making unhappiness out of kindness";

        let mut sequential = engine(&dir);
        sequential.load_str(text, en()).unwrap();
        let expected = sequential.compute_index().unwrap();

        let mut parallel = engine(&dir).with_thread_pool_size(4).unwrap();
        assert_eq!(parallel.worker_count(), 4);
        parallel.load_str(text, en()).unwrap();

        assert_eq!(parallel.compute_index().unwrap(), expected);
        assert_eq!(parallel.morphemes(), sequential.morphemes());
    }

    #[test]
    fn test_progress_reaches_total() {
        let dir = TempDir::new().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut engine = engine(&dir)
            .with_thread_pool_size(2)
            .unwrap()
            .with_progress(Arc::new(move |done, total| {
                sink.lock().unwrap().push((done, total));
            }));

        engine.load_str("run running runner", en()).unwrap();
        engine.compute_index().unwrap();

        let mut seen = seen.lock().unwrap().clone();
        seen.sort();
        assert_eq!(seen, [(1, 3), (2, 3), (3, 3)]);
    }
}
