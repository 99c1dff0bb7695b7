//! Web front-end: form page, estimate endpoints and health check

pub mod routes;
pub mod templates;

use crate::error::{NewsClassifierError, Result};
use crate::model::pipeline::Pipeline;
use axum::{
    routing::{get, post},
    Router,
};
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;

/// State shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/estimate", post(routes::estimate))
        .route("/api/estimate", post(routes::api_estimate))
        .route("/healthz", get(routes::healthz))
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn serve(listen_addr: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(listen_addr).await.map_err(|e| {
        NewsClassifierError::Server(format!("failed to bind to {}: {}", listen_addr, e))
    })?;

    let local_addr = listener.local_addr()?;
    info!("News classifier listening on http://{}", local_addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| NewsClassifierError::Server(e.to_string()))?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested, draining connections"),
        Err(e) => {
            // Without a signal handler the server runs until killed
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
