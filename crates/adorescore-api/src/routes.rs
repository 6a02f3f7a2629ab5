//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, info, Instrument};
use uuid::Uuid;

use crate::state::AppState;
use adorescore_core::{AnalysisRequest, AnalysisResponse};

pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health_check))
        .route("/ready", get(readiness))
        .route("/metrics", get(metrics))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// 200 when every model slot loaded, 503 otherwise
async fn readiness(State(state): State<AppState>) -> Response {
    let models = state.analyzer.models();
    let ready = models.is_ready();
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = json!({
        "ready": ready,
        "models": models.statuses(),
    });
    (status, Json(body)).into_response()
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Analyze one review.
///
/// Malformed bodies are reported like any other failure: 500 with a detail.
async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, AppError> {
    metrics::counter!("adorescore_requests_total").increment(1);

    let Json(request) = body.map_err(|rejection| AppError::new("request", rejection.body_text()))?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("analyze", %request_id, chars = request.text.chars().count());

    async move {
        let start = Instant::now();
        let response = state
            .analyzer
            .analyze(&request.text)
            .await?;

        let elapsed = start.elapsed().as_micros() as f64;
        metrics::histogram!("adorescore_analysis_latency_us").record(elapsed);
        info!(
            overall = response.adorescore.overall,
            "Analysis complete in {:.0}us", elapsed
        );

        Ok::<_, AppError>(Json(response))
    }
    .instrument(span)
    .await
}

/// Any handler failure. Always rendered as HTTP 500.
#[derive(Debug)]
pub struct AppError {
    kind: &'static str,
    message: String,
}

impl AppError {
    fn new(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<adorescore_core::Error> for AppError {
    fn from(err: adorescore_core::Error) -> Self {
        let kind = match &err {
            adorescore_core::Error::Model(_) => "model",
            adorescore_core::Error::MalformedOutput(_) => "malformed_output",
            adorescore_core::Error::ModelUnavailable { .. } => "model_unavailable",
            _ => "internal",
        };
        Self::new(kind, err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(kind = self.kind, "Analysis failed: {}", self.message);
        metrics::counter!("adorescore_errors_total", "kind" => self.kind).increment(1);

        let body = json!({
            "detail": format!("Internal Server Error: {}", self.message),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
