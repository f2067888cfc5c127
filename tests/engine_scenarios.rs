//! End-to-end scenarios for the syntheticity engine.

use std::fs;
use std::io::Cursor;
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;

use syntheticity::config::SyntheticityConfig;
use syntheticity::corpus::{BundledCatalog, CorpusManager};
use syntheticity::engine::{EngineState, SyntheticityEngine};
use syntheticity::error::{Result, SyntheticityError};
use syntheticity::language::{LanguageCode, ProfileDetector};
use syntheticity::morph::MorphTokenizer;

fn lang(code: &str) -> Option<LanguageCode> {
    Some(LanguageCode::new(code).unwrap())
}

fn config(dir: &TempDir) -> SyntheticityConfig {
    SyntheticityConfig {
        corpus_dir: dir.path().join("corpora"),
        thread_pool_size: Some(2),
        ..SyntheticityConfig::default()
    }
}

#[test]
fn run_running_runner_is_accepted_at_the_boundary() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.txt");
    fs::write(&path, "run running runner")?;

    let mut engine = SyntheticityEngine::from_config(&config(&dir))?;
    engine.load_path(&path, lang("en"))?;

    assert_eq!(engine.words().map(|w| w.len()), Some(3));
    assert_eq!(engine.compute_index()?, 1.0);
    assert_eq!(engine.morphemes().map(|m| m.len()), Some(3));
    Ok(())
}

#[test]
fn compute_index_twice_returns_identical_value() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let mut engine = SyntheticityEngine::from_config(&config(&dir))?;
    engine.load(
        Cursor::new("The children were replaying the games, unhappily."),
        None,
    )?;

    let first = engine.compute_index()?;
    let morphemes = engine.morphemes().cloned();
    let second = engine.compute_index()?;

    assert!(first >= 1.0);
    assert_eq!(first.to_bits(), second.to_bits());
    assert_eq!(engine.morphemes().cloned(), morphemes);
    assert_eq!(engine.report()?.language.as_str(), "en");
    assert!(engine.report()?.language_detected);
    Ok(())
}

#[test]
fn empty_and_punctuation_only_texts_are_rejected() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let mut engine = SyntheticityEngine::from_config(&config(&dir))?;

    for content in ["", "  \n \t  ", "... !!! ???"] {
        let path = dir.path().join("input.txt");
        fs::write(&path, content)?;

        let err = engine.load_path(&path, None).unwrap_err();
        assert!(matches!(err, SyntheticityError::EmptyInput(_)), "{content:?}: {err}");
        assert_eq!(engine.state(), EngineState::Empty);
    }

    // The corpus store was never touched.
    let corpora = dir.path().join("corpora");
    assert_eq!(fs::read_dir(corpora)?.count(), 0);
    Ok(())
}

#[test]
fn invalid_utf8_is_an_encoding_error() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let mut engine = SyntheticityEngine::from_config(&config(&dir))?;

    // "caf\xe9" in Latin-1.
    let err = engine
        .load(Cursor::new(b"caf\xe9 au lait".to_vec()), lang("en"))
        .unwrap_err();
    assert!(matches!(err, SyntheticityError::Encoding(_)));
    assert!(err.to_string().contains("offset 3"));
    Ok(())
}

#[test]
fn unresolvable_language_stops_before_tokenizing() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let mut engine = SyntheticityEngine::from_config(&config(&dir))?;
    engine.load_str("one two three", lang("tlh"))?;

    let err = engine.prepare_corpus().unwrap_err();
    assert!(matches!(err, SyntheticityError::CorpusUnavailable(_)));
    assert!(!err.is_retryable());

    assert!(engine.compute_index().is_err());
    assert!(engine.morphemes().is_none());
    assert!(engine.index().is_none());
    Ok(())
}

#[test]
fn russian_text_is_detected_and_segmented() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let mut engine = SyntheticityEngine::from_config(&config(&dir))?;
    engine.load_str("Я читаю книги, и ты читаешь книгу.", None)?;

    let index = engine.compute_index()?;
    let report = engine.report()?;

    assert_eq!(report.language.as_str(), "ru");
    assert_eq!(report.words, 7);
    assert_eq!(report.morphemes, 9);
    assert_eq!(index, 9.0 / 7.0);
    Ok(())
}

#[test]
fn engines_with_different_languages_share_a_tokenizer() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let corpora = Arc::new(CorpusManager::new(
        dir.path(),
        Arc::new(BundledCatalog::new()),
    )?);
    let tokenizer = Arc::new(MorphTokenizer::new(corpora));

    let jobs = [
        ("en", "run running runner"),
        ("de", "die kinder spielen mit den katzen"),
        ("es", "los niños cantaban canciones"),
    ];

    let results: Vec<Result<f64>> = thread::scope(|scope| {
        let handles: Vec<_> = jobs
            .iter()
            .map(|(code, text)| {
                let tokenizer = tokenizer.clone();
                scope.spawn(move || {
                    let mut engine = SyntheticityEngine::with_parts(
                        tokenizer,
                        Arc::new(ProfileDetector::new()),
                    );
                    engine.load_str(text, lang(code))?;
                    engine.compute_index()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for ((code, _), result) in jobs.iter().zip(results) {
        let index = result?;
        assert!(index >= 1.0, "{code}: {index}");
    }
    Ok(())
}

#[test]
fn stray_kana_in_english_text_is_analyzed_as_english() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let mut engine = SyntheticityEngine::from_config(&config(&dir))?;
    engine.load_str("The players were replaying the games (see ア).", None)?;

    let index = engine.compute_index()?;
    assert_eq!(engine.language().map(LanguageCode::as_str), Some("en"));
    assert_eq!(engine.words().map(|w| w.len()), Some(7));
    assert_eq!(index, 10.0 / 7.0);
    Ok(())
}
