//! HTTP corpus catalog.
//!
//! Fetches `<base_url>/<language>.json`. The set of published languages is
//! either given up front or discovered from `<base_url>/index.json`, a JSON
//! array of language codes. Requires the `http-catalog` feature.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::corpus::catalog::{CorpusCatalog, CorpusPayload};
use crate::error::{Result, SyntheticityError};
use crate::language::LanguageCode;

const USER_AGENT: &str = concat!("syntheticity/", env!("CARGO_PKG_VERSION"));

/// Corpus catalog served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    languages: Vec<LanguageCode>,
}

impl HttpCatalog {
    /// Create a catalog for a known list of languages.
    pub fn new<S: Into<String>>(base_url: S, languages: Vec<LanguageCode>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| SyntheticityError::corpus_download(format!("HTTP client: {e}")))?;

        Ok(HttpCatalog {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            languages,
        })
    }

    /// Create a catalog whose languages are listed in `<base_url>/index.json`.
    pub fn discover<S: Into<String>>(base_url: S) -> Result<Self> {
        let mut catalog = Self::new(base_url, Vec::new())?;
        let url = format!("{}/index.json", catalog.base_url);

        let response = catalog
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| SyntheticityError::corpus_download(format!("GET {url}: {e}")))?;
        catalog.languages = response
            .json()
            .map_err(|e| SyntheticityError::corpus_download(format!("bad index at {url}: {e}")))?;
        catalog.languages.sort();
        Ok(catalog)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl CorpusCatalog for HttpCatalog {
    fn name(&self) -> &'static str {
        "http"
    }

    fn languages(&self) -> Result<Vec<LanguageCode>> {
        Ok(self.languages.clone())
    }

    fn publishes(&self, language: &LanguageCode) -> bool {
        self.languages.contains(language)
    }

    fn open(&self, language: &LanguageCode) -> Result<CorpusPayload> {
        if !self.publishes(language) {
            return Err(SyntheticityError::corpus_unavailable(format!(
                "{} publishes no corpus for '{language}'",
                self.base_url
            )));
        }

        let url = format!("{}/{language}.json", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| SyntheticityError::corpus_download(format!("GET {url}: {e}")))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(SyntheticityError::corpus_unavailable(format!(
                "{url} does not exist"
            ))),
            status if !status.is_success() => Err(SyntheticityError::corpus_download(format!(
                "GET {url}: HTTP {status}"
            ))),
            _ => Ok(CorpusPayload {
                source: url,
                reader: Box::new(response),
            }),
        }
    }
}
