//! Trained classification pipeline and label formatting

pub mod classifier;
pub mod labels;
pub mod pipeline;
pub mod vectorizer;
