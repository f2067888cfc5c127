//! Command implementations for the syntheticity CLI.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use ahash::AHashSet;
use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::SyntheticityConfig;
use crate::engine::SyntheticityEngine;
use crate::error::{Result, SyntheticityError};
use crate::language::{LanguageCode, LanguageDetector};
use crate::morph::MorphTokenizer;
use crate::text::TextLoader;

/// Execute a CLI command.
pub fn execute_command(args: SyntheticityArgs) -> Result<()> {
    let config = load_config(&args)?;
    debug!(
        "Corpus directory {}, catalog {}",
        config.corpus_dir.display(),
        config.catalog
    );

    match &args.command {
        Command::Index(index_args) => compute_index(index_args, &config, &args),
        Command::Detect(detect_args) => detect_language(detect_args, &config, &args),
        Command::Segment(segment_args) => segment_words(segment_args, &config, &args),
        Command::Corpus(corpus_command) => manage_corpus(corpus_command, &config, &args),
    }
}

/// Build the effective configuration: file first, then flags and environment.
pub fn load_config(args: &SyntheticityArgs) -> Result<SyntheticityConfig> {
    let mut config = match &args.config {
        Some(path) => SyntheticityConfig::from_file(path)?,
        None => SyntheticityConfig::default(),
    };

    if let Some(corpus_dir) = &args.corpus_dir {
        config.corpus_dir = corpus_dir.clone();
    }
    if let Some(catalog) = &args.catalog {
        config.catalog = catalog.clone();
    }
    if let Some(threads) = args.threads {
        config.thread_pool_size = Some(threads);
    }

    config.validate()?;
    Ok(config)
}

/// Reject anything but an existing `.txt` file.
fn check_text_file(path: &Path) -> Result<()> {
    if path.extension().is_none_or(|ext| ext != "txt") {
        return Err(SyntheticityError::invalid_argument(
            "Will not attempt to read anything other than a .txt file.",
        ));
    }
    if !path.is_file() {
        return Err(io::Error::new(io::ErrorKind::NotFound, "No text found.").into());
    }
    Ok(())
}

fn parse_language(code: &str) -> Result<LanguageCode> {
    LanguageCode::new(code)
}

/// Compute the syntheticity index of a file.
fn compute_index(args: &IndexArgs, config: &SyntheticityConfig, cli_args: &SyntheticityArgs) -> Result<()> {
    check_text_file(&args.file)?;
    let language = args.language.as_deref().map(parse_language).transpose()?;

    let mut engine = SyntheticityEngine::from_config(config)?;
    if args.progress {
        engine = engine.with_progress(Arc::new(report_progress));
    }

    engine.load_path(&args.file, language)?;
    engine.compute_index()?;

    output_result(
        &format!("Analyzed {}", args.file.display()),
        &IndexResult {
            file: args.file.display().to_string(),
            report: engine.report()?,
        },
        cli_args,
    )
}

/// Progress line on stderr, finished with a newline at the last word.
fn report_progress(done: usize, total: usize) {
    let percent = done * 100 / total.max(1);
    let mut stderr = io::stderr().lock();
    let _ = write!(stderr, "\rTokenizing words: {done}/{total} ({percent}%)");
    if done == total {
        let _ = writeln!(stderr);
    }
}

/// Detect the language of a file.
fn detect_language(
    args: &DetectArgs,
    config: &SyntheticityConfig,
    cli_args: &SyntheticityArgs,
) -> Result<()> {
    check_text_file(&args.file)?;
    let (text, _) = TextLoader::new().load_path(&args.file)?;

    let detector = config.detector();
    let language = detector.detect(text.raw())?;
    info!("Detected '{language}' with the {} detector", detector.name());

    output_result(
        "Language detected",
        &DetectionResult {
            file: args.file.display().to_string(),
            language,
        },
        cli_args,
    )
}

/// Segment words given on the command line.
fn segment_words(
    args: &SegmentArgs,
    config: &SyntheticityConfig,
    cli_args: &SyntheticityArgs,
) -> Result<()> {
    let language = parse_language(&args.language)?;
    let corpora = Arc::new(config.corpus_manager()?);
    corpora.ensure(&language)?;
    let tokenizer = MorphTokenizer::new(corpora);

    let (text, _) = TextLoader::new().load_str(&args.words.join(" "))?;
    let mut seen = AHashSet::new();
    let mut words = Vec::new();
    for word in text.normalized().split(' ') {
        if !seen.insert(word) {
            continue;
        }
        words.push(WordSegmentation {
            word: word.to_string(),
            morphemes: tokenizer.tokenize(word, &language)?,
        });
    }

    output_result(
        &format!("Segmented {} words", words.len()),
        &SegmentationResult { language, words },
        cli_args,
    )
}

/// Inspect or populate the corpus store.
fn manage_corpus(
    command: &CorpusCommand,
    config: &SyntheticityConfig,
    cli_args: &SyntheticityArgs,
) -> Result<()> {
    let manager = config.corpus_manager()?;

    match command {
        CorpusCommand::List => output_result(
            "Installed corpora",
            &CorpusListResult {
                corpus_dir: manager.root().display().to_string(),
                corpora: manager.installed()?,
            },
            cli_args,
        ),
        CorpusCommand::Status { language } => {
            let language = parse_language(language)?;
            output_result(
                "Corpus status",
                &CorpusStatusResult {
                    status: manager.status(&language),
                    manifest: manager.manifest(&language),
                    language,
                },
                cli_args,
            )
        }
        CorpusCommand::Install { language } => {
            let language = parse_language(language)?;
            manager.ensure(&language)?;
            output_result(
                "Corpus installed",
                &CorpusStatusResult {
                    status: manager.status(&language),
                    manifest: manager.manifest(&language),
                    language,
                },
                cli_args,
            )
        }
    }
}
