//! Language detection from character and function-word statistics.
//!
//! # Examples
//!
//! ```
//! use syntheticity::language::{LanguageDetector, ProfileDetector};
//!
//! let detector = ProfileDetector::new();
//! let code = detector.detect("the cat sat on the mat and it was happy").unwrap();
//! assert_eq!(code.as_str(), "en");
//! ```

use std::collections::BTreeMap;

use log::debug;

use crate::analysis::token_filter::PunctuationFilter;
use crate::error::{Result, SyntheticityError};
use crate::language::LanguageCode;
use crate::language::profile::{Script, profiles_for};

/// Default minimum number of word tokens for a detection attempt.
pub const DEFAULT_MIN_TOKENS: usize = 3;

/// Trait for language identification strategies.
pub trait LanguageDetector: Send + Sync {
    /// Infer the single best-guess language of `text`.
    fn detect(&self, text: &str) -> Result<LanguageCode>;

    /// Get the name of this detector (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Detects languages from script statistics, then function words.
///
/// Scripts that are used by a single supported language (Greek, Hangul,
/// Hebrew, ...) resolve immediately. Latin and Cyrillic text is scored
/// against per-language function-word lists and characteristic letters.
#[derive(Clone, Debug)]
pub struct ProfileDetector {
    min_tokens: usize,
}

impl Default for ProfileDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileDetector {
    /// Create a detector with the default minimum token count.
    pub fn new() -> Self {
        ProfileDetector {
            min_tokens: DEFAULT_MIN_TOKENS,
        }
    }

    /// Create a detector requiring at least `min_tokens` word tokens.
    pub fn with_min_tokens(min_tokens: usize) -> Self {
        ProfileDetector {
            min_tokens: min_tokens.max(1),
        }
    }

    pub fn min_tokens(&self) -> usize {
        self.min_tokens
    }

    fn dominant_script(tokens: &[String]) -> Result<Script> {
        let mut counts: BTreeMap<Script, usize> = BTreeMap::new();
        for c in tokens.iter().flat_map(|t| t.chars()) {
            if !c.is_alphabetic() {
                continue;
            }
            let script = Script::of(c);
            if script != Script::Other {
                *counts.entry(script).or_default() += 1;
            }
        }

        // Japanese text mixes kana with han characters.
        if counts.contains_key(&Script::Kana)
            && let Some(han) = counts.remove(&Script::Han)
        {
            *counts.entry(Script::Kana).or_default() += han;
        }

        let mut ranked: Vec<(Script, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        match ranked.as_slice() {
            [] => Err(SyntheticityError::language_detection(
                "text contains no letters of a known script",
            )),
            [(first, n1), (second, n2), ..] if n1 == n2 => {
                Err(SyntheticityError::language_detection(format!(
                    "scripts {first:?} and {second:?} are equally frequent"
                )))
            }
            [(script, _), ..] => Ok(*script),
        }
    }
}

impl LanguageDetector for ProfileDetector {
    fn detect(&self, text: &str) -> Result<LanguageCode> {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|t| PunctuationFilter::strip(&t.to_lowercase()))
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.len() < self.min_tokens {
            return Err(SyntheticityError::language_detection(format!(
                "text too short for detection: {} tokens, need at least {}",
                tokens.len(),
                self.min_tokens
            )));
        }

        let script = Self::dominant_script(&tokens)?;
        if let Some(code) = script.sole_language() {
            debug!("Detected '{code}' from {script:?} script");
            return LanguageCode::new(code);
        }

        let mut scores: Vec<(&'static str, usize)> = profiles_for(script)
            .map(|profile| {
                let function_hits = tokens
                    .iter()
                    .filter(|t| profile.function_words.contains(&t.as_str()))
                    .count();
                let marker_hits = tokens
                    .iter()
                    .filter(|t| t.chars().any(|c| profile.marker_chars.contains(&c)))
                    .count();
                (profile.code, function_hits * 2 + marker_hits)
            })
            .collect();
        scores.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        debug!("Language scores for {script:?} text: {scores:?}");

        match scores.as_slice() {
            [] | [(_, 0), ..] => Err(SyntheticityError::language_detection(format!(
                "no known {script:?}-script language matches the text"
            ))),
            [(first, s1), (second, s2), ..] if s1 == s2 => {
                Err(SyntheticityError::language_detection(format!(
                    "ambiguous between '{first}' and '{second}'"
                )))
            }
            [(code, _), ..] => LanguageCode::new(code),
        }
    }

    fn name(&self) -> &'static str {
        "profile"
    }
}
