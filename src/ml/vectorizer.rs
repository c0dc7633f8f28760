use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fitted TF-IDF vectorizer, transform-only.
///
/// The vocabulary, IDF weights and n-gram range are produced by the offline
/// training pipeline and shipped inside each model artifact. Terms outside
/// the vocabulary are dropped; empty text maps to the zero vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term -> column index
    vocabulary: HashMap<String, usize>,

    /// IDF weight per column
    idf: Vec<f64>,

    /// N-gram range (min, max), inclusive
    ngram_range: (usize, usize),
}

impl TfidfVectorizer {
    pub fn new(
        vocabulary: HashMap<String, usize>,
        idf: Vec<f64>,
        ngram_range: (usize, usize),
    ) -> Self {
        Self {
            vocabulary,
            idf,
            ngram_range,
        }
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Transform normalized text into an L2-normalized tf·idf vector.
    pub fn transform(&self, text: &str) -> Array1<f64> {
        let mut features: Array1<f64> = Array1::zeros(self.n_features());

        for term in self.extract_terms(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                if idx < self.idf.len() {
                    features[idx] += self.idf[idx];
                }
            }
        }

        let norm = features.dot(&features).sqrt();
        if norm > 0.0 {
            features /= norm;
        }

        features
    }

    /// Extract word n-grams over the configured range, joined with spaces.
    fn extract_terms(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut terms = Vec::new();

        // n-gram sizes below 1 are meaningless; treat (0, n) as (1, n)
        let min_n = self.ngram_range.0.max(1);
        let max_n = self.ngram_range.1.max(min_n);
        for n in min_n..=max_n {
            for window in words.windows(n) {
                terms.push(window.join(" "));
            }
        }

        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_vectorizer() -> TfidfVectorizer {
        let vocabulary: HashMap<String, usize> = [
            ("password".to_string(), 0),
            ("reset".to_string(), 1),
            ("password reset".to_string(), 2),
            ("vpn".to_string(), 3),
        ]
        .into_iter()
        .collect();

        TfidfVectorizer::new(vocabulary, vec![1.0, 1.5, 2.0, 1.2], (1, 2))
    }

    #[test]
    fn test_transform_counts_unigrams_and_bigrams() {
        let vectorizer = test_vectorizer();
        let features = vectorizer.transform("password reset");

        assert_eq!(features.len(), 4);
        assert!(features[0] > 0.0);
        assert!(features[1] > 0.0);
        assert!(features[2] > 0.0);
        assert_eq!(features[3], 0.0);
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let vectorizer = test_vectorizer();
        let features = vectorizer.transform("password reset vpn");

        let norm = features.dot(&features).sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_empty_text_is_zero_vector() {
        let vectorizer = test_vectorizer();
        let features = vectorizer.transform("");

        assert_eq!(features.len(), 4);
        assert!(features.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_transform_drops_out_of_vocabulary_terms() {
        let vectorizer = test_vectorizer();
        let features = vectorizer.transform("unknown words only");

        assert!(features.iter().all(|&v| v == 0.0));
    }
}
