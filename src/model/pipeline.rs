//! Classification pipeline: preprocess, vectorize, classify

use crate::error::{NewsClassifierError, Result};
use crate::model::classifier::{argmax, LinearWeights, SoftmaxClassifier};
use crate::model::labels::{format_prediction, format_probability, LABELS};
use crate::model::vectorizer::TfidfVectorizer;
use crate::processing::stopwords::StopwordProvider;
use crate::processing::text_processor::{PreprocessorConfig, TextPreprocessor, TextTransformer};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// On-disk form of a trained pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineArtifact {
    #[serde(default)]
    pub preprocessor: PreprocessorConfig,
    pub vectorizer: TfidfVectorizer,
    pub classifier: LinearWeights,
}

/// Top class for one input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub label: String,
    pub probability: f32,
}

impl Estimate {
    pub fn formatted_probability(&self) -> String {
        format_probability(self.probability)
    }
}

#[derive(Debug)]
pub struct Pipeline {
    preprocessor: TextPreprocessor,
    vectorizer: TfidfVectorizer,
    classifier: SoftmaxClassifier,
}

impl Pipeline {
    pub fn load(path: &Path, stopwords: Arc<StopwordProvider>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NewsClassifierError::ModelLoading(format!("cannot read {}: {}", path.display(), e))
        })?;
        let artifact: PipelineArtifact = serde_json::from_str(&content).map_err(|e| {
            NewsClassifierError::ModelLoading(format!("cannot parse {}: {}", path.display(), e))
        })?;

        let pipeline = Self::from_artifact(artifact, stopwords)?;
        info!(
            "Loaded pipeline from {} ({} features, {} classes)",
            path.display(),
            pipeline.vectorizer.n_features(),
            pipeline.classifier.n_classes()
        );
        Ok(pipeline)
    }

    pub fn from_artifact(artifact: PipelineArtifact, stopwords: Arc<StopwordProvider>) -> Result<Self> {
        artifact.vectorizer.validate()?;

        let classifier =
            SoftmaxClassifier::from_weights(artifact.classifier, artifact.vectorizer.n_features())?;

        // Every class index the model can produce must have a label
        if classifier.n_classes() != LABELS.len() {
            return Err(NewsClassifierError::ModelLoading(format!(
                "model predicts {} classes but the label table has {}",
                classifier.n_classes(),
                LABELS.len()
            )));
        }

        Ok(Self {
            preprocessor: TextPreprocessor::new(artifact.preprocessor, stopwords),
            vectorizer: artifact.vectorizer,
            classifier,
        })
    }

    pub fn preprocessor(&self) -> &TextPreprocessor {
        &self.preprocessor
    }

    /// Per-input class probabilities, in input order
    pub fn predict_proba(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let cleaned = self.preprocessor.transform(texts)?;
        let features = self.vectorizer.transform(&cleaned);
        Ok(self.classifier.predict_proba(&features))
    }

    pub fn estimate(&self, texts: &[String]) -> Result<Vec<Estimate>> {
        self.predict_proba(texts)?
            .iter()
            .map(|probabilities| {
                let (index, probability) = argmax(probabilities).ok_or_else(|| {
                    NewsClassifierError::Processing("empty probability vector".to_string())
                })?;
                let label = format_prediction(index)?;
                debug!("Predicted {} with p={:.4}", label, probability);
                Ok(Estimate {
                    label: label.to_string(),
                    probability,
                })
            })
            .collect()
    }

    /// Estimate for a single text
    pub fn estimate_one(&self, text: &str) -> Result<Estimate> {
        self.estimate(&[text.to_string()])?
            .pop()
            .ok_or_else(|| NewsClassifierError::Processing("no estimate produced".to_string()))
    }
}
