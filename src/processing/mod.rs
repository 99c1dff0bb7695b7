//! Text cleaning and the language resources it depends on

pub mod batch;
pub mod stopwords;
pub mod text_processor;
pub mod tokenizer;
