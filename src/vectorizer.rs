//! TF-IDF vectorisation over a single request's documents.
//!
//! The model is fit on the profile blob and every listing blob together,
//! used once, and dropped. Nothing is cached between requests, so two
//! calls with the same inputs always produce the same vectors.
//!
//! Weighting follows the classic smoothed TF-IDF recipe:
//! - tokens are runs of two or more word characters (single characters
//!   are ignored);
//! - terms are the n-grams of consecutive tokens within the configured
//!   range (unigrams and bigrams by default), with no stop-word list and
//!   no minimum document frequency;
//! - `idf(t) = ln((1 + n) / (1 + df(t))) + 1`;
//! - each document vector is raw counts times idf, L2-normalised.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::VectorizerConfig;
use crate::error::{JobRankError, Result};

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("static pattern is valid"));

// ---------------------------------------------------------------------------
// Sparse vectors
// ---------------------------------------------------------------------------

/// A sparse vector with entries sorted by column index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from `(index, value)` pairs; pairs are sorted by index and
    /// zero values are dropped.
    pub fn from_pairs(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, v)| v != 0.0);
        entries.sort_by_key(|&(i, _)| i);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Dot product via a merge walk over both sorted index lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ai, av) = self.entries[i];
            let (bi, bv) = other.entries[j];
            match ai.cmp(&bi) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += av * bv;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, v) in &mut self.entries {
                *v /= norm;
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Fitted model
// ---------------------------------------------------------------------------

/// Vocabulary and idf weights fit over one batch of documents.
///
/// Column `i` holds the `i`-th term in sorted order.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl VectorSpace {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term stored in column `index`.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Vectorizer
// ---------------------------------------------------------------------------

/// Fits a [`VectorSpace`] and projects documents into it.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    ngram_range: (usize, usize),
}

impl TfidfVectorizer {
    pub fn new(config: &VectorizerConfig) -> Self {
        Self {
            ngram_range: (config.ngram_min, config.ngram_max),
        }
    }

    /// Fit the model over `documents` and return one vector per document,
    /// in input order.
    ///
    /// Fails with [`JobRankError::DegenerateVocabulary`] when there are no
    /// documents or when no document yields a single term.
    pub fn fit_transform(&self, documents: &[String]) -> Result<(VectorSpace, Vec<SparseVector>)> {
        if documents.is_empty() {
            return Err(JobRankError::DegenerateVocabulary);
        }

        let per_doc: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|d| term_counts(d, self.ngram_range))
            .collect();

        let terms: BTreeSet<&str> = per_doc
            .iter()
            .flat_map(|counts| counts.keys().map(String::as_str))
            .collect();
        let vocabulary: BTreeMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();

        let mut df = vec![0usize; vocabulary.len()];
        for counts in &per_doc {
            for term in counts.keys() {
                if let Some(&idx) = vocabulary.get(term) {
                    df[idx] += 1;
                }
            }
        }

        let n = documents.len() as f64;
        let space = VectorSpace {
            terms: vocabulary.keys().cloned().collect(),
            idf: df
                .iter()
                .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
                .collect(),
        };
        if space.is_empty() {
            return Err(JobRankError::DegenerateVocabulary);
        }

        let vectors = per_doc
            .into_iter()
            .map(|counts| {
                let pairs = counts
                    .into_iter()
                    .map(|(term, count)| {
                        let idx = vocabulary[&term];
                        (idx, count as f64 * space.idf[idx])
                    })
                    .collect();
                SparseVector::from_pairs(pairs).l2_normalized()
            })
            .collect();

        debug!(
            documents = documents.len(),
            vocabulary = space.len(),
            "fitted tf-idf space"
        );

        Ok((space, vectors))
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(&VectorizerConfig::default())
    }
}

/// Split a document into tokens of two or more word characters.
pub fn tokenize(document: &str) -> Vec<&str> {
    TOKEN.find_iter(document).map(|m| m.as_str()).collect()
}

/// Count every n-gram of consecutive tokens within `range` (inclusive).
fn term_counts(document: &str, (min_n, max_n): (usize, usize)) -> HashMap<String, usize> {
    let tokens = tokenize(document);
    let mut counts = HashMap::new();
    for n in min_n..=max_n {
        if n == 0 || n > tokens.len() {
            continue;
        }
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_insert(0) += 1;
        }
    }
    counts
}
