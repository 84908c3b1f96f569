//! Two-document TF-IDF space.
//!
//! The vector space is built from exactly the two compared documents on every
//! call, so a similarity value is relative to that pair and not to any wider
//! corpus. Weighting matches the usual smoothed scheme:
//!
//! - tf: raw term count
//! - idf: `ln((1 + n) / (1 + df)) + 1` with `n = 2`
//! - each document vector L2-normalised

use std::collections::BTreeMap;

use super::{cosine_similarity, tokenize, TextSimilarityError};

const DOCUMENT_COUNT: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TfidfPair {
    /// term → column index (sorted by term)
    pub vocabulary: BTreeMap<String, usize>,
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

impl TfidfPair {
    /// Fits the vocabulary on `{left, right}` and returns both weighted vectors.
    pub fn fit(left: &str, right: &str) -> Result<Self, TextSimilarityError> {
        let left_counts = term_counts(left);
        let right_counts = term_counts(right);

        let vocabulary: BTreeMap<String, usize> = left_counts
            .keys()
            .chain(right_counts.keys())
            .cloned()
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();

        if vocabulary.is_empty() {
            return Err(TextSimilarityError::EmptyVocabulary);
        }

        let idf: Vec<f64> = vocabulary
            .keys()
            .map(|term| {
                let df = u8::from(left_counts.contains_key(term))
                    + u8::from(right_counts.contains_key(term));
                ((1.0 + DOCUMENT_COUNT) / (1.0 + f64::from(df))).ln() + 1.0
            })
            .collect();

        let left = weighted_vector(&vocabulary, &left_counts, &idf);
        let right = weighted_vector(&vocabulary, &right_counts, &idf);

        Ok(Self {
            vocabulary,
            left,
            right,
        })
    }

    pub fn similarity(&self) -> f64 {
        cosine_similarity(&self.left, &self.right)
    }
}

/// Cosine similarity (0.0〜1.0) of two documents in their own two-document TF-IDF space.
pub fn pair_similarity(left: &str, right: &str) -> Result<f64, TextSimilarityError> {
    Ok(TfidfPair::fit(left, right)?.similarity())
}

fn term_counts(document: &str) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for token in tokenize(document) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

fn weighted_vector(
    vocabulary: &BTreeMap<String, usize>,
    counts: &BTreeMap<String, u32>,
    idf: &[f64],
) -> Vec<f64> {
    let mut vector = vec![0.0; vocabulary.len()];
    for (term, count) in counts {
        if let Some(&idx) = vocabulary.get(term) {
            vector[idx] = f64::from(*count) * idf[idx];
        }
    }

    let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
    vector
}
