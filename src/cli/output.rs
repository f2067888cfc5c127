//! Output formatting for CLI commands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SyntheticityArgs};
use crate::corpus::{CorpusManifest, CorpusStatus};
use crate::engine::IndexReport;
use crate::error::Result;
use crate::language::LanguageCode;

/// Result structure for index computation.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResult {
    pub file: String,
    #[serde(flatten)]
    pub report: IndexReport,
}

impl fmt::Display for IndexResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Syntheticity index for {}: {}",
            self.file, self.report.index
        )?;
        let origin = if self.report.language_detected {
            "detected"
        } else {
            "given"
        };
        writeln!(f, "language: {} ({origin})", self.report.language)?;
        writeln!(f, "distinct words: {}", self.report.words)?;
        write!(f, "distinct morphemes: {}", self.report.morphemes)
    }
}

/// Result structure for language detection.
#[derive(Debug, Serialize, Deserialize)]
pub struct DetectionResult {
    pub file: String,
    pub language: LanguageCode,
}

impl fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.language)
    }
}

/// Morphemes of one word.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordSegmentation {
    pub word: String,
    pub morphemes: Vec<String>,
}

/// Result structure for word segmentation.
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentationResult {
    pub language: LanguageCode,
    pub words: Vec<WordSegmentation>,
}

impl fmt::Display for SegmentationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .words
            .iter()
            .map(|w| w.word.chars().count())
            .max()
            .unwrap_or(0);
        for (i, entry) in self.words.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let morphemes = if entry.morphemes.is_empty() {
                "(none)".to_string()
            } else {
                entry.morphemes.join(" + ")
            };
            write!(f, "{:<width$}  {morphemes}", entry.word)?;
        }
        Ok(())
    }
}

/// Result structure for listing installed corpora.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorpusListResult {
    pub corpus_dir: String,
    pub corpora: Vec<CorpusManifest>,
}

impl fmt::Display for CorpusListResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.corpora.is_empty() {
            return write!(f, "No corpora installed in {}", self.corpus_dir);
        }

        write!(f, "Corpora in {}:", self.corpus_dir)?;
        for manifest in &self.corpora {
            write!(
                f,
                "\n  {:<8} {:<10} {:>10}  {}",
                manifest.language,
                manifest.version,
                format_bytes(manifest.bytes),
                manifest.installed_at.format("%Y-%m-%d %H:%M:%S")
            )?;
        }
        Ok(())
    }
}

/// Result structure for corpus status and installation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorpusStatusResult {
    pub language: LanguageCode,
    pub status: CorpusStatus,
    pub manifest: Option<CorpusManifest>,
}

impl fmt::Display for CorpusStatusResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.language, self.status)?;
        if let Some(manifest) = &self.manifest {
            write!(
                f,
                " (version {}, {}, from {})",
                manifest.version,
                format_bytes(manifest.bytes),
                manifest.source
            )?;
        }
        Ok(())
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + fmt::Display>(
    message: &str,
    result: &T,
    args: &SyntheticityArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: fmt::Display>(message: &str, result: &T, args: &SyntheticityArgs) -> Result<()> {
    if args.verbosity() > 1 && !message.is_empty() {
        println!("{message}");
        println!();
    }
    println!("{result}");
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SyntheticityArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format bytes into human-readable format.
fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    let unit = UNITS[unit_index];
    if unit_index == 0 {
        format!("{bytes} {unit}")
    } else {
        format!("{size:.1} {unit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> LanguageCode {
        LanguageCode::new("en").unwrap()
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
    }

    #[test]
    fn test_index_result_json_is_flat() {
        let result = IndexResult {
            file: "test.txt".to_string(),
            report: IndexReport {
                language: en(),
                language_detected: true,
                words: 3,
                morphemes: 3,
                index: 1.0,
            },
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["file"], "test.txt");
        assert_eq!(value["language"], "en");
        assert_eq!(value["index"], 1.0);
        assert!(
            result
                .to_string()
                .starts_with("Syntheticity index for test.txt: 1")
        );
    }

    #[test]
    fn test_segmentation_display() {
        let result = SegmentationResult {
            language: en(),
            words: vec![
                WordSegmentation {
                    word: "running".to_string(),
                    morphemes: vec!["run".to_string(), "ing".to_string()],
                },
                WordSegmentation {
                    word: "q".to_string(),
                    morphemes: Vec::new(),
                },
            ],
        };

        assert_eq!(result.to_string(), "running  run + ing\nq        (none)");
    }

    #[test]
    fn test_corpus_status_display() {
        let result = CorpusStatusResult {
            language: en(),
            status: CorpusStatus::NotInstalled,
            manifest: None,
        };
        assert_eq!(result.to_string(), "en: not installed");
    }
}
