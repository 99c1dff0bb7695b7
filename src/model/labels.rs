//! Class index to category name mapping

use crate::error::{NewsClassifierError, Result};

/// Category names indexed by the classifier's class index
pub const LABELS: [&str; 5] = ["Business", "Entertainment", "Politics", "Sport", "Tech"];

pub fn format_prediction(index: usize) -> Result<&'static str> {
    LABELS
        .get(index)
        .copied()
        .ok_or(NewsClassifierError::LabelOutOfRange(index))
}

/// Probability rendered as a percentage with two decimals, e.g. `0.87125` -> `"87.13%"`
pub fn format_probability(probability: f32) -> String {
    format!("{:.2}%", probability * 100.0)
}
