use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::warn;

use roastline_common::RoastlineError;

use crate::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    urls: Vec<String>,
}

/// POST /analyze-profiles — run the scrape + generation pipeline for a
/// batch of profile URLs.
pub async fn analyze_profiles(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    // Transport-level URL sanity only; the exactly-3 batch invariant is
    // owned by the analyzer.
    for raw in &body.urls {
        if !is_http_url(raw) {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": format!("Invalid profile URL: {raw}")})),
            )
                .into_response();
        }
    }

    match state.analyzer.analyze(&body.urls).await {
        Ok(report) => Json(report).into_response(),
        Err(err) => {
            let status = error_status(&err);
            if status.is_server_error() {
                warn!(error = %err, "Profile analysis failed");
            }
            (
                status,
                Json(serde_json::json!({"error": format!("Analysis failed: {err}")})),
            )
                .into_response()
        }
    }
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "healthy"}))
}

fn is_http_url(raw: &str) -> bool {
    matches!(url::Url::parse(raw), Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https")
}

/// Caller precondition violations are the client's fault; everything
/// else is an upstream dependency failure.
fn error_status(err: &RoastlineError) -> StatusCode {
    match err {
        RoastlineError::Validation(_) => StatusCode::BAD_REQUEST,
        RoastlineError::Scraping(_) | RoastlineError::Anyhow(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
