//! Text cleaning: Unicode normalization, punctuation and stopword removal

use crate::error::Result;
use crate::processing::stopwords::StopwordProvider;
use crate::processing::tokenizer::word_tokenize;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use unicode_normalization::UnicodeNormalization;

/// Anything that is not a letter, a number, an underscore or whitespace.
/// Combining marks count as punctuation here, so accents split off by NFKD go too.
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_\s]").expect("Invalid punctuation regex"));

/// Which cleaning steps run. Every combination is valid; all disabled is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessorConfig {
    pub normalize: bool,
    pub remove_punctuation: bool,
    pub remove_stopwords: bool,
    pub language: String,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            normalize: true,
            remove_punctuation: true,
            remove_stopwords: true,
            language: "english".to_string(),
        }
    }
}

impl PreprocessorConfig {
    /// Configuration with every step switched off
    pub fn passthrough() -> Self {
        Self {
            normalize: false,
            remove_punctuation: false,
            remove_stopwords: false,
            ..Self::default()
        }
    }
}

/// Batch text transformation step of a classification pipeline.
///
/// `fit` exists so transformers compose with trained stages; stateless
/// transformers keep the default no-op.
pub trait TextTransformer {
    fn fit(&self, _texts: &[String]) -> &Self
    where
        Self: Sized,
    {
        self
    }

    /// Transform a batch. The output has one entry per input, in input order.
    fn transform(&self, texts: &[String]) -> Result<Vec<String>>;
}

/// Applies the enabled cleaning steps to every text in a batch, in a fixed
/// order: normalize, remove punctuation, remove stopwords.
pub struct TextPreprocessor {
    config: PreprocessorConfig,
    stopwords: Arc<StopwordProvider>,
    cleaned_text: RwLock<Vec<String>>,
}

impl TextPreprocessor {
    pub fn new(config: PreprocessorConfig, stopwords: Arc<StopwordProvider>) -> Self {
        Self {
            config,
            stopwords,
            cleaned_text: RwLock::new(Vec::new()),
        }
    }

    /// Preprocessor backed by the stopword lists compiled into the binary
    pub fn with_bundled_stopwords(config: PreprocessorConfig) -> Self {
        Self::new(config, Arc::new(StopwordProvider::bundled()))
    }

    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Output of the most recent `transform` call
    pub fn cleaned_text(&self) -> Vec<String> {
        self.cleaned_text
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn remember(&self, batch: &[String]) {
        let mut last = self.cleaned_text.write().unwrap_or_else(|e| e.into_inner());
        *last = batch.to_vec();
    }
}

impl TextTransformer for TextPreprocessor {
    fn transform(&self, texts: &[String]) -> Result<Vec<String>> {
        let mut cleaned = texts.to_vec();

        if self.config.normalize {
            cleaned = cleaned.iter().map(|t| normalize_text(t)).collect();
        }

        if self.config.remove_punctuation {
            cleaned = cleaned.iter().map(|t| remove_punctuation(t)).collect();
        }

        if self.config.remove_stopwords && !cleaned.is_empty() {
            let language = &self.config.language;
            let stop = self.stopwords.get(language)?;
            cleaned = cleaned
                .iter()
                .map(|t| remove_stopwords(t, language, &stop))
                .collect();
        }

        debug!("Preprocessed batch of {} texts", cleaned.len());
        self.remember(&cleaned);
        Ok(cleaned)
    }
}

impl std::fmt::Debug for TextPreprocessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPreprocessor")
            .field("config", &self.config)
            .finish()
    }
}

/// NFKD: split composed characters into base letters and combining marks
pub fn normalize_text(text: &str) -> String {
    text.nfkd().collect()
}

pub fn remove_punctuation(text: &str) -> String {
    PUNCTUATION.replace_all(text, "").into_owned()
}

/// Lowercase, tokenize, drop stopwords and join the survivors with single spaces
pub fn remove_stopwords(text: &str, language: &str, stopwords: &HashSet<String>) -> String {
    let lowered = text.to_lowercase();
    word_tokenize(&lowered, language)
        .into_iter()
        .filter(|token| !stopwords.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}
