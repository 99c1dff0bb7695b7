//! Integration tests for the news classifier

use news_classifier::model::labels::format_prediction;
use news_classifier::model::pipeline::Pipeline;
use news_classifier::processing::batch::TextBatch;
use news_classifier::processing::stopwords::{CorpusDirectory, StopwordProvider};
use news_classifier::processing::text_processor::{
    PreprocessorConfig, TextPreprocessor, TextTransformer,
};
use news_classifier::NewsClassifierError;
use std::path::Path;
use std::sync::Arc;

const DEMO_MODEL: &str = "models/demo_pipeline.json";

fn demo_pipeline() -> Pipeline {
    Pipeline::load(Path::new(DEMO_MODEL), Arc::new(StopwordProvider::bundled()))
        .expect("demo pipeline should load")
}

#[test]
fn test_demo_pipeline_categories() {
    let texts = vec![
        "The election campaign heats up as party leaders argue over tax.".to_string(),
        "Microsoft unveils new mobile phone software for online users.".to_string(),
        "England win the cup after a late goal from their star player.".to_string(),
        "Oil prices push bank shares and company profit higher.".to_string(),
        "The band's new album tops the chart ahead of the film festival.".to_string(),
    ];

    let estimates = demo_pipeline().estimate(&texts).unwrap();
    let labels: Vec<&str> = estimates.iter().map(|e| e.label.as_str()).collect();

    assert_eq!(labels, vec!["Politics", "Tech", "Sport", "Business", "Entertainment"]);
    for estimate in &estimates {
        assert!(estimate.probability > 0.2 && estimate.probability <= 1.0);
    }
}

#[test]
fn test_demo_pipeline_probabilities_cover_label_table() {
    let probs = demo_pipeline()
        .predict_proba(&["Parliament vote".to_string()])
        .unwrap();

    assert_eq!(probs.len(), 1);
    assert_eq!(probs[0].len(), 5);
    for index in 0..probs[0].len() {
        assert!(format_prediction(index).is_ok());
    }
    assert!((probs[0].iter().sum::<f32>() - 1.0).abs() < 1e-5);
}

#[test]
fn test_json_batch_through_preprocessor() {
    let batch = TextBatch::from_json_str(r#"["The quick fox", "Café, rentrée!"]"#).unwrap();
    let preprocessor = TextPreprocessor::with_bundled_stopwords(PreprocessorConfig::default());

    let cleaned = preprocessor.transform(batch.texts()).unwrap();
    assert_eq!(cleaned, vec!["quick fox".to_string(), "cafe rentree".to_string()]);
}

#[test]
fn test_invalid_json_batch() {
    let err = TextBatch::from_json_str(r#"{"text": "not a list"}"#).unwrap_err();
    assert!(matches!(err, NewsClassifierError::InvalidInput(_)));
}

#[test]
fn test_stopwords_downloaded_into_resource_cache_on_first_use() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = CorpusDirectory::new(dir.path().join("corpora").join("stopwords"));
    assert!(!corpus.is_cached("english"));

    let provider = Arc::new(StopwordProvider::new(corpus.clone()));
    let preprocessor = TextPreprocessor::new(PreprocessorConfig::default(), Arc::clone(&provider));

    let cleaned = preprocessor
        .transform(&["This is the end".to_string()])
        .unwrap();

    assert_eq!(cleaned, vec!["end".to_string()]);
    assert!(corpus.is_cached("english"));
    assert!(provider.is_cached("english"));
}

#[test]
fn test_unavailable_language_fails_after_retry() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(StopwordProvider::from_directory(dir.path()));
    let config = PreprocessorConfig {
        language: "esperanto".to_string(),
        ..PreprocessorConfig::default()
    };
    let preprocessor = TextPreprocessor::new(config, provider);

    let err = preprocessor.transform(&["Saluton".to_string()]).unwrap_err();
    assert!(matches!(err, NewsClassifierError::ResourceUnavailable { .. }));
}
