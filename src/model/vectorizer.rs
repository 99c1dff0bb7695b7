//! TF-IDF features for cleaned text

use crate::error::{NewsClassifierError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Terms are runs of two or more word characters
static TERM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid term regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Fitted TF-IDF vocabulary and weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f32>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

/// Sparse feature vector: (feature index, weight), sorted by index
pub type SparseVector = Vec<(usize, f32)>;

impl TfidfVectorizer {
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(NewsClassifierError::ModelLoading(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }

        if let Some((term, index)) = self.vocabulary.iter().find(|(_, i)| **i >= self.idf.len()) {
            return Err(NewsClassifierError::ModelLoading(format!(
                "term '{}' maps to feature {} outside the idf table",
                term, index
            )));
        }

        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(NewsClassifierError::ModelLoading(format!(
                "invalid ngram range ({}, {})",
                min_n, max_n
            )));
        }

        Ok(())
    }

    /// Lowercased terms and their n-grams, in document order
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = TERM.find_iter(&lowered).map(|m| m.as_str()).collect();
        let (min_n, max_n) = self.ngram_range;

        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > words.len() {
                break;
            }
            for window in words.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    pub fn transform_one(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for term in self.analyze(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut features: SparseVector = counts
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (index, tf * self.idf[index])
            })
            .collect();

        if self.norm == Norm::L2 {
            let length = features.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
            if length > 0.0 {
                for (_, weight) in features.iter_mut() {
                    *weight /= length;
                }
            }
        }

        features
    }

    pub fn transform(&self, texts: &[String]) -> Vec<SparseVector> {
        texts.iter().map(|t| self.transform_one(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer(terms: &[&str], ngram_range: (usize, usize)) -> TfidfVectorizer {
        TfidfVectorizer {
            vocabulary: terms
                .iter()
                .enumerate()
                .map(|(i, t)| (t.to_string(), i))
                .collect(),
            idf: vec![1.0; terms.len()],
            ngram_range,
            sublinear_tf: false,
            norm: Norm::L2,
        }
    }

    #[test]
    fn test_single_letter_words_are_ignored() {
        let v = vectorizer(&["market"], (1, 1));
        assert_eq!(v.analyze("A market I saw"), vec!["market", "saw"]);
    }

    #[test]
    fn test_bigrams() {
        let v = vectorizer(&["stock market"], (1, 2));
        assert_eq!(
            v.analyze("stock market rally"),
            vec!["stock", "market", "rally", "stock market", "market rally"]
        );
    }

    #[test]
    fn test_l2_normalized() {
        let v = vectorizer(&["goal", "match"], (1, 1));
        let features = v.transform_one("goal goal match");
        let length: f32 = features.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        assert!((length - 1.0).abs() < 1e-6);
        assert!(features[0].1 > features[1].1);
    }

    #[test]
    fn test_unknown_terms_give_empty_vector() {
        let v = vectorizer(&["goal"], (1, 1));
        assert!(v.transform_one("nothing relevant here").is_empty());
    }

    #[test]
    fn test_norm_defaults_to_l2() {
        assert_eq!(Norm::default(), Norm::L2);
        let v: TfidfVectorizer =
            serde_json::from_str(r#"{"vocabulary": {"goal": 0}, "idf": [1.0]}"#).unwrap();
        assert_eq!(v.norm, Norm::L2);
        assert_eq!(v.ngram_range, (1, 1));
    }

    #[test]
    fn test_validation() {
        let mut v = vectorizer(&["goal", "match"], (1, 1));
        assert!(v.validate().is_ok());

        v.idf.pop();
        assert!(v.validate().is_err());

        let mut v = vectorizer(&["goal"], (2, 1));
        assert!(v.validate().is_err());
        v.ngram_range = (1, 1);
        v.vocabulary.insert("goal".to_string(), 3);
        assert!(v.validate().is_err());
    }
}
