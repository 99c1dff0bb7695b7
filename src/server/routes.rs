//! Request handlers

use crate::error::{NewsClassifierError, Result};
use crate::model::pipeline::Estimate;
use crate::processing::batch::TextBatch;
use crate::server::templates::IndexTemplate;
use crate::server::AppState;
use askama::Template;
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct EstimateForm {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ApiEstimate {
    pub label: String,
    pub probability: f32,
    pub probability_formatted: String,
}

impl From<Estimate> for ApiEstimate {
    fn from(estimate: Estimate) -> Self {
        Self {
            probability_formatted: estimate.formatted_probability(),
            label: estimate.label,
            probability: estimate.probability,
        }
    }
}

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn index() -> Response {
    render_page(IndexTemplate::empty(), StatusCode::OK)
}

pub async fn estimate(
    State(state): State<AppState>,
    form: std::result::Result<Form<EstimateForm>, FormRejection>,
) -> Response {
    let text = match form {
        Ok(Form(form)) => form.text,
        Err(rejection) => {
            error!("Rejected estimate form: {}", rejection);
            let message = format!("Could not read the submitted form: {}", rejection.body_text());
            return render_page(IndexTemplate::with_error(String::new(), message), rejection.status());
        }
    };

    let outcome = if text.trim().is_empty() {
        Err(NewsClassifierError::InvalidInput(
            "Please enter some text to classify.".to_string(),
        ))
    } else {
        classify(&state, vec![text.clone()]).await.and_then(|mut estimates| {
            estimates
                .pop()
                .ok_or_else(|| NewsClassifierError::Processing("no estimate produced".to_string()))
        })
    };

    match outcome {
        Ok(estimate) => {
            info!(
                "Estimated {} ({}) for {} chars",
                estimate.label,
                estimate.formatted_probability(),
                text.chars().count()
            );
            render_page(IndexTemplate::with_result(text, &estimate), StatusCode::OK)
        }
        Err(e) => {
            error!("Estimate failed: {}", e);
            let status = status_for(&e);
            render_page(IndexTemplate::with_error(text, e.to_string()), status)
        }
    }
}

pub async fn api_estimate(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let batch = body
        .get("texts")
        .ok_or_else(|| NewsClassifierError::InvalidInput("missing field 'texts'".to_string()))
        .and_then(TextBatch::from_json);

    let outcome = match batch {
        Ok(batch) => classify(&state, batch.into_inner()).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(estimates) => {
            info!("Estimated batch of {}", estimates.len());
            let estimates: Vec<ApiEstimate> = estimates.into_iter().map(ApiEstimate::from).collect();
            Json(json!({ "estimates": estimates })).into_response()
        }
        Err(e) => {
            error!("API estimate failed: {}", e);
            (status_for(&e), Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

/// Run the pipeline off the async executor
async fn classify(state: &AppState, texts: Vec<String>) -> Result<Vec<Estimate>> {
    let pipeline = Arc::clone(&state.pipeline);
    tokio::task::spawn_blocking(move || pipeline.estimate(&texts))
        .await
        .map_err(|e| NewsClassifierError::Processing(format!("classification task failed: {}", e)))?
}

fn status_for(error: &NewsClassifierError) -> StatusCode {
    match error {
        NewsClassifierError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        NewsClassifierError::ResourceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn render_page(page: IndexTemplate, status: StatusCode) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "template rendering failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&NewsClassifierError::InvalidInput("x".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&NewsClassifierError::resource_unavailable("english", "gone")),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&NewsClassifierError::LabelOutOfRange(9)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_estimate_shape() {
        let api = ApiEstimate::from(Estimate {
            label: "Tech".to_string(),
            probability: 0.25,
        });
        let value = serde_json::to_value(&api).unwrap();
        assert_eq!(value["label"], "Tech");
        assert_eq!(value["probability_formatted"], "25.00%");
    }
}
