//! HTTP API for liveness and bot metrics.

use crate::BotMetrics;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
};
use serde::Serialize;
use std::time::Instant;

/// API state shared by the handlers.
#[derive(Debug, Clone)]
pub struct ApiState {
    metrics: BotMetrics,
    started: Instant,
    bot: String,
    version: String,
}

impl ApiState {
    /// Creates new API state; uptime counts from now.
    pub fn new(metrics: BotMetrics, bot: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            metrics,
            started: Instant::now(),
            bot: bot.into(),
            version: version.into(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the server answers
    pub status: &'static str,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Bot name
    pub bot: String,
    /// Bot version
    pub version: String,
}

/// Creates the health and metrics router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<ApiState>) -> impl IntoResponse {
    (StatusCode::OK, Json(health(&state)))
}

fn health(state: &ApiState) -> HealthResponse {
    HealthResponse {
        status: "ok",
        uptime_seconds: state.started.elapsed().as_secs(),
        bot: state.bot.clone(),
        version: state.version.clone(),
    }
}

/// Get current metrics snapshot.
async fn get_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.metrics.snapshot();
    (StatusCode::OK, Json(snapshot))
}
