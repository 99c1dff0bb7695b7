//! Checked input batches for untyped boundaries (JSON bodies, stdin)

use crate::error::{NewsClassifierError, Result};
use serde_json::Value;

/// Ordered sequence of raw texts. Order is significant: outputs line up with inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBatch(Vec<String>);

impl TextBatch {
    pub fn new(texts: Vec<String>) -> Self {
        Self(texts)
    }

    /// Accept only a JSON array whose elements are all strings
    pub fn from_json(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| {
            NewsClassifierError::InvalidInput(format!(
                "expected a list of texts, got {}",
                json_kind(value)
            ))
        })?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    NewsClassifierError::InvalidInput(format!(
                        "element {} is {}, expected a string",
                        i,
                        json_kind(item)
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| NewsClassifierError::InvalidInput(format!("malformed JSON: {}", e)))?;
        Self::from_json(&value)
    }

    pub fn texts(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for TextBatch {
    fn from(texts: Vec<String>) -> Self {
        Self(texts)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_list_of_strings() {
        let batch = TextBatch::from_json(&json!(["a", "b"])).unwrap();
        assert_eq!(batch.texts(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_accepts_empty_list() {
        let batch = TextBatch::from_json(&json!([])).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_rejects_bare_string() {
        let err = TextBatch::from_json(&json!("just one text")).unwrap_err();
        assert!(matches!(err, NewsClassifierError::InvalidInput(_)));
        assert!(err.to_string().contains("got a string"));
    }

    #[test]
    fn test_rejects_non_string_element() {
        let err = TextBatch::from_json(&json!(["ok", 3])).unwrap_err();
        assert!(err.to_string().contains("element 1 is a number"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = TextBatch::from_json_str("[\"unterminated").unwrap_err();
        assert!(matches!(err, NewsClassifierError::InvalidInput(_)));
    }
}
