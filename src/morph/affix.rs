//! Root-guided affix stripping.
//!
//! A word is decomposed as `prefix* root suffix*`. Affixes are tried longest
//! first and a decomposition is accepted only if it ends in a known root
//! (possibly after a [`StemRepair`]). Words with no such decomposition are
//! treated as a single morpheme.

use ahash::{AHashMap, AHashSet};

use crate::corpus::{Corpus, StemRepair};
use crate::language::LanguageCode;
use crate::morph::Segmenter;

#[derive(Debug, Default)]
struct Decomposition {
    prefixes: Vec<String>,
    root: String,
    suffixes: Vec<String>,
}

impl Decomposition {
    fn into_morphemes(self) -> Vec<String> {
        let mut morphemes = self.prefixes;
        morphemes.push(self.root);
        morphemes.extend(self.suffixes);
        morphemes
    }
}

/// Segmenter built from a [`Corpus`].
#[derive(Debug, Clone)]
pub struct AffixSegmenter {
    language: LanguageCode,
    version: String,
    prefixes: Vec<String>,
    suffixes: Vec<String>,
    repairs: Vec<StemRepair>,
    roots: AHashSet<String>,
    segmentations: AHashMap<String, Vec<String>>,
    min_stem_len: usize,
    max_affixes: usize,
}

/// Longest first, then alphabetical, so the search order is fixed.
fn sorted_affixes(affixes: &[String]) -> Vec<String> {
    let mut sorted = affixes.to_vec();
    sorted.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    sorted.dedup();
    sorted
}

impl AffixSegmenter {
    pub fn new(corpus: Corpus) -> Self {
        AffixSegmenter {
            prefixes: sorted_affixes(&corpus.prefixes),
            suffixes: sorted_affixes(&corpus.suffixes),
            repairs: corpus.stem_repairs,
            roots: corpus.roots.into_iter().collect(),
            segmentations: corpus.segmentations.into_iter().collect(),
            min_stem_len: corpus.min_stem_len,
            max_affixes: corpus.max_affixes,
            language: corpus.language,
            version: corpus.version,
        }
    }

    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn as_root(&self, stem: &str) -> Option<String> {
        if self.roots.contains(stem) {
            return Some(stem.to_string());
        }
        self.repairs
            .iter()
            .filter_map(|repair| repair.apply(stem))
            .find(|repaired| self.roots.contains(repaired))
    }

    fn long_enough(&self, stem: &str) -> bool {
        stem.chars().count() >= self.min_stem_len
    }

    fn decompose(&self, word: &str, depth: usize) -> Option<Decomposition> {
        if let Some(root) = self.as_root(word) {
            return Some(Decomposition {
                root,
                ..Decomposition::default()
            });
        }
        if depth >= self.max_affixes {
            return None;
        }

        for suffix in &self.suffixes {
            let Some(stem) = word.strip_suffix(suffix.as_str()) else {
                continue;
            };
            if !self.long_enough(stem) {
                continue;
            }
            if let Some(mut inner) = self.decompose(stem, depth + 1) {
                inner.suffixes.push(suffix.clone());
                return Some(inner);
            }
        }

        for prefix in &self.prefixes {
            let Some(stem) = word.strip_prefix(prefix.as_str()) else {
                continue;
            };
            if !self.long_enough(stem) {
                continue;
            }
            if let Some(mut inner) = self.decompose(stem, depth + 1) {
                inner.prefixes.insert(0, prefix.clone());
                return Some(inner);
            }
        }

        None
    }
}

impl Segmenter for AffixSegmenter {
    fn segment(&self, word: &str) -> Vec<String> {
        if let Some(morphemes) = self.segmentations.get(word) {
            return morphemes.clone();
        }

        match self.decompose(word, 0) {
            Some(decomposition) => decomposition.into_morphemes(),
            // Unknown single characters carry no morpheme.
            None if word.chars().count() <= 1 => Vec::new(),
            None => vec![word.to_string()],
        }
    }

    fn name(&self) -> &'static str {
        "affix"
    }
}
