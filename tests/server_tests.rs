use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use news_classifier::model::pipeline::Pipeline;
use news_classifier::processing::stopwords::StopwordProvider;
use news_classifier::server::{build_router, AppState};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let pipeline = Pipeline::load(
        Path::new("models/demo_pipeline.json"),
        Arc::new(StopwordProvider::bundled()),
    )
    .expect("demo pipeline should load");
    build_router(AppState::new(pipeline))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body must be readable")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body must be utf-8")
}

fn form_request(text: &str) -> Request<Body> {
    let encoded: String = text
        .bytes()
        .map(|b| match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' => (b as char).to_string(),
            b' ' => "+".to_string(),
            _ => format!("%{:02X}", b),
        })
        .collect();

    Request::builder()
        .method("POST")
        .uri("/estimate")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("text={}", encoded)))
        .expect("request builder should not fail")
}

fn json_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/estimate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builder should not fail")
}

#[tokio::test]
async fn index_renders_empty_form() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .expect("index handler should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<form action=\"/estimate\" method=\"post\">"));
    assert!(!html.contains("id=\"result\""));
}

#[tokio::test]
async fn estimate_renders_label_and_probability() {
    let text = "England win the cup after a late goal, says the coach.";
    let response = app()
        .oneshot(form_request(text))
        .await
        .expect("estimate handler should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<span id=\"label\">Sport</span>"));

    // The page shows the probability the pipeline actually computed
    let pipeline = Pipeline::load(
        Path::new("models/demo_pipeline.json"),
        Arc::new(StopwordProvider::bundled()),
    )
    .unwrap();
    let expected = pipeline.estimate_one(text).unwrap().formatted_probability();
    assert!(
        html.contains(&format!("<span id=\"probability\">{}</span>", expected)),
        "page should show {expected}"
    );
}

#[tokio::test]
async fn blank_text_renders_error_state() {
    let response = app()
        .oneshot(form_request("   "))
        .await
        .expect("estimate handler should respond");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("id=\"error\""));
    assert!(!html.contains("id=\"result\""));
}

#[tokio::test]
async fn api_estimate_returns_one_result_per_text() {
    let response = app()
        .oneshot(json_request(json!({
            "texts": ["Parliament vote on the budget", "New broadband and digital services"]
        })))
        .await
        .expect("api handler should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = serde_json::from_str(&body_string(response).await).unwrap();
    let estimates = value["estimates"].as_array().expect("estimates list");
    assert_eq!(estimates.len(), 2);
    assert_eq!(estimates[0]["label"], "Politics");
    assert_eq!(estimates[1]["label"], "Tech");
    assert!(estimates[0]["probability_formatted"]
        .as_str()
        .unwrap()
        .ends_with('%'));
}

#[tokio::test]
async fn api_estimate_rejects_non_list_input() {
    let response = app()
        .oneshot(json_request(json!({ "texts": "single string" })))
        .await
        .expect("api handler should respond");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let value: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(value["error"].as_str().unwrap().starts_with("Invalid input"));
}

#[tokio::test]
async fn api_estimate_rejects_non_string_elements() {
    let response = app()
        .oneshot(json_request(json!({ "texts": ["fine", 42] })))
        .await
        .expect("api handler should respond");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn healthz_returns_ok_json() {
    let response = app()
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .expect("healthz handler should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(value, json!({ "status": "ok" }));
}

#[tokio::test]
async fn non_form_submission_renders_error_page() {
    let request = Request::builder()
        .method("POST")
        .uri("/estimate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"text": "goal"}"#))
        .expect("request builder should not fail");

    let response = app()
        .oneshot(request)
        .await
        .expect("estimate handler should respond");

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .expect("content-type header present")
        .to_str()
        .expect("content-type must be valid utf-8")
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let html = body_string(response).await;
    assert!(html.contains("id=\"error\""));
    assert!(html.contains("<form action=\"/estimate\" method=\"post\">"));
}
