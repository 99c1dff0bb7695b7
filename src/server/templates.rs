//! HTML page for the classifier front-end

use crate::model::pipeline::Estimate;
use askama::Template;

/// Result block shown under the form
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateView {
    pub label: String,
    pub probability: String,
}

impl From<&Estimate> for EstimateView {
    fn from(estimate: &Estimate) -> Self {
        Self {
            label: estimate.label.clone(),
            probability: estimate.formatted_probability(),
        }
    }
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>News Topic Classifier</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 760px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        textarea {
            width: 100%;
            min-height: 180px;
            padding: 10px;
            box-sizing: border-box;
            font: inherit;
        }
        button {
            margin-top: 12px;
            padding: 8px 20px;
            border: none;
            border-radius: 4px;
            background: #007acc;
            color: white;
            cursor: pointer;
        }
        .result {
            margin-top: 25px;
            padding: 15px;
            border-left: 4px solid #28a745;
            background: #f8f9fa;
        }
        .error {
            margin-top: 25px;
            padding: 15px;
            border-left: 4px solid #dc3545;
            background: #fff5f5;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>News Topic Classifier</h1>
        <p>Paste an article and get its category: Business, Entertainment, Politics, Sport or Tech.</p>
        <form action="/estimate" method="post">
            <textarea name="text" placeholder="Article text...">{{ text }}</textarea>
            <button type="submit">Estimate</button>
        </form>
        {% if let Some(result) = result %}
        <div class="result" id="result">
            <p><strong>Category:</strong> <span id="label">{{ result.label }}</span></p>
            <p><strong>Probability:</strong> <span id="probability">{{ result.probability }}</span></p>
        </div>
        {% endif %}
        {% if let Some(message) = error %}
        <div class="error" id="error">
            <p>{{ message }}</p>
        </div>
        {% endif %}
    </div>
</body>
</html>"#, ext = "html")]
pub struct IndexTemplate {
    pub text: String,
    pub result: Option<EstimateView>,
    pub error: Option<String>,
}

impl IndexTemplate {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            result: None,
            error: None,
        }
    }

    pub fn with_result(text: String, estimate: &Estimate) -> Self {
        Self {
            text,
            result: Some(EstimateView::from(estimate)),
            error: None,
        }
    }

    pub fn with_error(text: String, message: String) -> Self {
        Self {
            text,
            result: None,
            error: Some(message),
        }
    }
}
