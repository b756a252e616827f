//! TF-IDF vectors over a small corpus of gift documents.
//!
//! One document per character. The vectorizer learns a vocabulary and IDF
//! weights from the corpus, then embeds any text into the same space as
//! sparse, unit-length vectors. Cosine similarity is then a dot product.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::extract_terms;

/// Configuration for the vectorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfConfig {
    /// Use `ln((1 + n) / (1 + df)) + 1` instead of `ln(n / df) + 1`
    pub smooth_idf: bool,
}

impl Default for TfIdfConfig {
    fn default() -> Self {
        Self { smooth_idf: true }
    }
}

/// Sparse, L2-normalized term vector. Entries are sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(usize, f32)>,
}

impl TermVector {
    fn from_weights(weights: BTreeMap<usize, f32>) -> Self {
        let norm = weights.values().map(|w| w * w).sum::<f32>().sqrt();
        if norm == 0.0 {
            return Self::default();
        }
        Self {
            entries: weights.into_iter().map(|(i, w)| (i, w / norm)).collect(),
        }
    }

    /// True when no term of the text is in the vocabulary.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    fn dot(&self, other: &TermVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0_f32;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Cosine similarity of two term vectors, always in `[0.0, 1.0]`.
///
/// A zero vector on either side scores 0.0.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f32 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    // Both sides are unit length; clamp absorbs rounding above 1.0.
    a.dot(b).clamp(0.0, 1.0)
}

/// A vectorizer fitted on a corpus.
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    /// term -> dimension index
    vocabulary: HashMap<String, usize>,
    /// IDF weight per dimension
    idf: Vec<f32>,
    config: TfIdfConfig,
}

impl TfIdfVectorizer {
    /// Fit with the default configuration.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        Self::fit_with_config(documents, TfIdfConfig::default())
    }

    /// Learn vocabulary and IDF weights from already-normalized documents.
    pub fn fit_with_config<S: AsRef<str>>(documents: &[S], config: TfIdfConfig) -> Self {
        let n = documents.len() as f32;

        // Sorted so dimension indices do not depend on hash order.
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in documents {
            let mut terms = extract_terms(doc.as_ref());
            terms.sort_unstable();
            terms.dedup();
            for term in terms {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (idx, (term, df)) in doc_freq.into_iter().enumerate() {
            let df = df as f32;
            let weight = if config.smooth_idf {
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            } else {
                (n / df).ln() + 1.0
            };
            vocabulary.insert(term.to_string(), idx);
            idf.push(weight);
        }

        Self {
            vocabulary,
            idf,
            config,
        }
    }

    /// Embed normalized text into the fitted space.
    ///
    /// Terms outside the vocabulary are ignored.
    pub fn transform(&self, text: &str) -> TermVector {
        let mut weights: BTreeMap<usize, f32> = BTreeMap::new();
        for term in extract_terms(text) {
            if let Some(&idx) = self.vocabulary.get(term) {
                *weights.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        for (idx, tf) in weights.iter_mut() {
            *tf *= self.idf[*idx];
        }
        TermVector::from_weights(weights)
    }

    /// Number of distinct terms learned from the corpus.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }
}
