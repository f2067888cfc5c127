//! Language codes and language detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyntheticityError};

pub mod detector;
pub mod profile;

pub use detector::{LanguageDetector, ProfileDetector};

/// A short ISO 639-style language identifier such as `en` or `pt-br`.
///
/// Codes are stored lower-case. The primary subtag is 2–8 ASCII letters,
/// optionally followed by `-` and a 2–8 character alphanumeric region or
/// variant subtag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse and normalize a language code.
    pub fn new<S: AsRef<str>>(code: S) -> Result<Self> {
        let normalized = code.as_ref().trim().to_ascii_lowercase().replace('_', "-");
        let mut parts = normalized.splitn(2, '-');

        let primary = parts.next().unwrap_or_default();
        if !(2..=8).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(SyntheticityError::invalid_argument(format!(
                "'{}' is not a valid language code",
                code.as_ref()
            )));
        }

        if let Some(region) = parts.next() {
            if !(2..=8).contains(&region.len())
                || !region.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(SyntheticityError::invalid_argument(format!(
                    "'{}' has an invalid region subtag",
                    code.as_ref()
                )));
            }
        }

        Ok(LanguageCode(normalized))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary subtag (`pt` for `pt-br`).
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = SyntheticityError;

    fn from_str(s: &str) -> Result<Self> {
        LanguageCode::new(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = SyntheticityError;

    fn try_from(value: String) -> Result<Self> {
        LanguageCode::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}
