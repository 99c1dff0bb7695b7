//! Multinomial logistic regression over sparse TF-IDF features

use crate::error::{NewsClassifierError, Result};
use crate::model::vectorizer::SparseVector;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Weights as stored in the pipeline artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearWeights {
    /// One row per class, one column per feature
    pub coef: Vec<Vec<f32>>,
    pub intercept: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct SoftmaxClassifier {
    coef: Array2<f32>,
    intercept: Array1<f32>,
}

impl SoftmaxClassifier {
    pub fn from_weights(weights: LinearWeights, n_features: usize) -> Result<Self> {
        let n_classes = weights.coef.len();
        if n_classes == 0 {
            return Err(NewsClassifierError::ModelLoading(
                "classifier has no classes".to_string(),
            ));
        }

        if weights.intercept.len() != n_classes {
            return Err(NewsClassifierError::ModelLoading(format!(
                "{} coefficient rows but {} intercepts",
                n_classes,
                weights.intercept.len()
            )));
        }

        if let Some(row) = weights.coef.iter().position(|r| r.len() != n_features) {
            return Err(NewsClassifierError::ModelLoading(format!(
                "coefficient row {} has {} weights, expected {}",
                row,
                weights.coef[row].len(),
                n_features
            )));
        }

        let flat: Vec<f32> = weights.coef.into_iter().flatten().collect();
        let coef = Array2::from_shape_vec((n_classes, n_features), flat)
            .map_err(|e| NewsClassifierError::ModelLoading(format!("bad coefficient shape: {}", e)))?;

        Ok(Self {
            coef,
            intercept: Array1::from(weights.intercept),
        })
    }

    pub fn n_classes(&self) -> usize {
        self.coef.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.coef.ncols()
    }

    pub fn decision_function(&self, features: &SparseVector) -> Array1<f32> {
        let mut scores = self.intercept.clone();
        for &(index, weight) in features {
            scores.scaled_add(weight, &self.coef.column(index));
        }
        scores
    }

    /// Class probabilities for one sample; sums to 1
    pub fn predict_proba_one(&self, features: &SparseVector) -> Vec<f32> {
        softmax(&self.decision_function(features)).to_vec()
    }

    pub fn predict_proba(&self, batch: &[SparseVector]) -> Vec<Vec<f32>> {
        batch.iter().map(|f| self.predict_proba_one(f)).collect()
    }
}

fn softmax(scores: &Array1<f32>) -> Array1<f32> {
    let max = scores.fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exp = scores.mapv(|s| (s - max).exp());
    let total = exp.sum();
    exp / total
}

/// Index and value of the largest probability; the first one wins ties
pub fn argmax(probabilities: &[f32]) -> Option<(usize, f32)> {
    probabilities
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, p)| match best {
            Some((_, bp)) if bp >= p => best,
            _ => Some((i, p)),
        })
}
