//! TF-IDF vectorization
//!
//! Word tokens are runs of two or more alphanumeric (or `_`) characters after
//! lowercasing; n-grams join consecutive tokens with a single space. The
//! vocabulary keeps the `max_features` terms with the highest corpus
//! frequency (ties broken alphabetically) and indexes them alphabetically.
//! Weights use the smoothed idf `ln((1 + n) / (1 + df)) + 1` and every row is
//! L2-normalized.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use textops_domain::{Result, TextOpsError};

/// Sparse row: `(feature index, value)` sorted by index
pub type SparseRow = Vec<(usize, f64)>;

/// Vocabulary and idf weights learned by [`fit`](Self::fit)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: usize,
    ngram_range: (usize, usize),
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Unfitted vectorizer
    pub fn new(max_features: usize, ngram_range: (usize, usize)) -> Self {
        Self { max_features, ngram_range, vocabulary: BTreeMap::new(), idf: Vec::new() }
    }

    /// Whether a vocabulary has been learned
    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Width of the produced rows
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Term to column index
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    /// Learn the vocabulary and idf weights from `documents`.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        let mut term_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let terms = self.analyze(doc);
            let unique: BTreeSet<&String> = terms.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            for term in terms {
                *term_counts.entry(term).or_insert(0) += 1;
            }
        }

        if term_counts.is_empty() {
            return Err(TextOpsError::invalid_input(
                "empty vocabulary: documents contain no tokens of two or more characters",
            ));
        }

        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        // Highest frequency first; BTreeMap order already sorts ties alphabetically.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.max_features);

        let mut kept: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort_unstable();

        let n = documents.len() as f64;
        self.idf = kept
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        self.vocabulary = kept.into_iter().enumerate().map(|(idx, term)| (term, idx)).collect();
        Ok(())
    }

    /// Check that every vocabulary index points at an idf weight.
    ///
    /// Fitted vectorizers always pass; deserialized ones may not.
    pub fn validate(&self) -> Result<()> {
        let mut seen = vec![false; self.idf.len()];
        for (term, &idx) in &self.vocabulary {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(TextOpsError::invalid_input(format!(
                        "vocabulary index {idx} of '{term}' is used twice"
                    )))
                }
                None => {
                    return Err(TextOpsError::invalid_input(format!(
                        "vocabulary index {idx} of '{term}' is out of range for {} idf weights",
                        self.idf.len()
                    )))
                }
            }
        }
        if let Some(bad) = self.idf.iter().find(|w| !w.is_finite()) {
            return Err(TextOpsError::invalid_input(format!("non-finite idf weight {bad}")));
        }
        Ok(())
    }

    /// L2-normalized TF-IDF row for `document`. Unknown terms are ignored.
    pub fn transform(&self, document: &str) -> SparseRow {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseRow = counts
            .into_iter()
            .filter_map(|(idx, tf)| self.idf.get(idx).map(|idf| (idx, tf * idf)))
            .collect();
        let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            row.iter_mut().for_each(|(_, v)| *v /= norm);
        }
        row
    }

    /// [`transform`](Self::transform) every document
    pub fn transform_batch(&self, documents: &[String]) -> Vec<SparseRow> {
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = tokenize(text);
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n == 1 {
                terms.extend(tokens.iter().cloned());
            } else if n <= tokens.len() {
                terms.extend(tokens.windows(n).map(|window| window.join(" ")));
            }
        }
        terms
    }
}

/// Lowercased word tokens of at least two characters
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}
