//! Command line argument parsing for the syntheticity CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{CORPUS_DIR_ENV, CatalogConfig};

/// Syntheticity - morphological complexity of a text
#[derive(Parser, Debug, Clone)]
#[command(name = "syntheticity")]
#[command(about = "Compute the syntheticity index (distinct morphemes per distinct word) of a text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SyntheticityArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding installed corpora
    #[arg(long, value_name = "DIR", env = CORPUS_DIR_ENV)]
    pub corpus_dir: Option<PathBuf>,

    /// Corpus source: bundled, directory:<path> or an http(s) URL
    #[arg(long, value_name = "CATALOG")]
    pub catalog: Option<CatalogConfig>,

    /// Number of tokenizer threads (default: number of CPU cores)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SyntheticityArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute the syntheticity index of a text file
    Index(IndexArgs),

    /// Detect the language of a text file
    Detect(DetectArgs),

    /// Split words into morphemes
    Segment(SegmentArgs),

    /// Manage installed corpora
    #[command(subcommand)]
    Corpus(CorpusCommand),
}

/// Arguments for computing an index
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// Text file to analyze (must end in .txt)
    #[arg(value_name = "FILE", default_value = "test.txt")]
    pub file: PathBuf,

    /// Language of the text (detected when omitted)
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<String>,

    /// Show progress while tokenizing
    #[arg(long)]
    pub progress: bool,
}

/// Arguments for language detection
#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    /// Text file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for segmenting words
#[derive(Parser, Debug, Clone)]
pub struct SegmentArgs {
    /// Words to segment
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    /// Language of the words
    #[arg(short, long, value_name = "LANG")]
    pub language: String,
}

/// Corpus management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum CorpusCommand {
    /// List installed corpora
    List,

    /// Show whether a language's corpus is installed
    Status {
        #[arg(value_name = "LANG")]
        language: String,
    },

    /// Install a language's corpus from the catalog
    Install {
        #[arg(value_name = "LANG")]
        language: String,
    },
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
