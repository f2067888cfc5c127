//! Integration tests for installing corpora into the local store.

use std::fs;
use std::io::{self, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use tempfile::TempDir;

use syntheticity::corpus::{
    BundledCatalog, CancellationToken, CorpusCatalog, CorpusManager, CorpusPayload, CorpusStatus,
    DirectoryCatalog,
};
use syntheticity::error::{Result, SyntheticityError};
use syntheticity::language::LanguageCode;

fn code(s: &str) -> LanguageCode {
    LanguageCode::new(s).unwrap()
}

/// Bundled corpora, counting how many downloads were started.
#[derive(Debug, Default)]
struct CountingCatalog {
    inner: BundledCatalog,
    opened: AtomicUsize,
}

impl CorpusCatalog for CountingCatalog {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn languages(&self) -> Result<Vec<LanguageCode>> {
        self.inner.languages()
    }

    fn publishes(&self, language: &LanguageCode) -> bool {
        self.inner.publishes(language)
    }

    fn open(&self, language: &LanguageCode) -> Result<CorpusPayload> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.inner.open(language)
    }
}

/// Reader that fails halfway through, like a dropped connection.
struct BrokenReader {
    sent: bool,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sent {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
        }
        self.sent = true;
        let head = br#"{"language": "en", "#;
        let n = head.len().min(buf.len());
        buf[..n].copy_from_slice(&head[..n]);
        Ok(n)
    }
}

#[derive(Debug)]
struct FlakyCatalog;

impl CorpusCatalog for FlakyCatalog {
    fn name(&self) -> &'static str {
        "flaky"
    }

    fn languages(&self) -> Result<Vec<LanguageCode>> {
        Ok(vec![code("en")])
    }

    fn publishes(&self, language: &LanguageCode) -> bool {
        language.as_str() == "en"
    }

    fn open(&self, _language: &LanguageCode) -> Result<CorpusPayload> {
        Ok(CorpusPayload {
            source: "flaky:en".to_string(),
            reader: Box::new(BrokenReader { sent: false }),
        })
    }
}

#[test]
fn ensure_downloads_at_most_once() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let catalog = Arc::new(CountingCatalog::default());
    let manager = CorpusManager::new(dir.path(), catalog.clone())?;
    let en = code("en");

    assert_eq!(manager.status(&en), CorpusStatus::NotInstalled);
    for _ in 0..5 {
        manager.ensure(&en)?;
        assert!(manager.is_available(&en));
    }

    assert_eq!(catalog.opened.load(Ordering::SeqCst), 1);
    assert_eq!(manager.status(&en), CorpusStatus::Installed);
    Ok(())
}

#[test]
fn concurrent_ensure_installs_once() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let catalog = Arc::new(CountingCatalog::default());
    let manager = Arc::new(CorpusManager::new(dir.path(), catalog.clone())?);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = manager.clone();
            thread::spawn(move || manager.ensure(&code("de")))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap()?;
    }

    assert_eq!(catalog.opened.load(Ordering::SeqCst), 1);
    assert_eq!(manager.load(&code("de"))?.language.as_str(), "de");
    Ok(())
}

#[test]
fn cancelled_download_leaves_nothing_behind() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let manager = CorpusManager::new(dir.path(), Arc::new(BundledCatalog::new()))?;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = manager.ensure_with_cancel(&code("es"), &cancel).unwrap_err();
    assert!(matches!(err, SyntheticityError::CorpusDownload(_)));
    assert!(err.is_retryable());
    assert_eq!(manager.status(&code("es")), CorpusStatus::NotInstalled);
    assert_eq!(fs::read_dir(dir.path())?.count(), 0);

    manager.ensure(&code("es"))?;
    assert_eq!(manager.status(&code("es")), CorpusStatus::Installed);
    Ok(())
}

#[test]
fn broken_transfer_is_a_retryable_download_error() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let manager = CorpusManager::new(dir.path(), Arc::new(FlakyCatalog))?.with_chunk_size(64);

    let err = manager.ensure(&code("en")).unwrap_err();
    assert!(matches!(err, SyntheticityError::CorpusDownload(_)));
    assert!(err.is_retryable());
    assert!(!manager.is_available(&code("en")));
    assert!(manager.installed()?.is_empty());
    Ok(())
}

#[test]
fn mirror_directory_installs_and_records_source() -> Result<()> {
    let mirror = TempDir::new().unwrap();
    fs::write(
        mirror.path().join("fi.json"),
        r#"{"language": "fi", "version": "test-1", "suffixes": ["ssa", "t"],
            "roots": ["talo"]}"#,
    )?;

    let store = TempDir::new().unwrap();
    let manager = CorpusManager::new(store.path(), Arc::new(DirectoryCatalog::new(mirror.path())))?;

    manager.ensure(&code("fi"))?;
    let manifest = manager.manifest(&code("fi")).unwrap();
    assert_eq!(manifest.version, "test-1");
    assert!(manifest.source.starts_with("file:"));

    let installed = manager.installed()?;
    assert_eq!(installed.len(), 1);
    assert_eq!(installed[0].language.as_str(), "fi");

    let err = manager.ensure(&code("sv")).unwrap_err();
    assert!(matches!(err, SyntheticityError::CorpusUnavailable(_)));
    Ok(())
}

#[test]
fn installed_corpora_survive_a_new_manager() -> Result<()> {
    let dir = TempDir::new().unwrap();
    CorpusManager::new(dir.path(), Arc::new(BundledCatalog::new()))?.ensure(&code("ru"))?;

    let catalog = Arc::new(CountingCatalog::default());
    let manager = CorpusManager::new(dir.path(), catalog.clone())?;
    manager.ensure(&code("ru"))?;

    assert_eq!(catalog.opened.load(Ordering::SeqCst), 0);
    assert_eq!(manager.installed()?.len(), 1);
    Ok(())
}
