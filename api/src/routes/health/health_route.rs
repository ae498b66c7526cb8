//! GET /health — probes every configured completion-service profile.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use tracing::debug;

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

/// Handler: GET /health
///
/// Always answers 200 with a per-profile snapshot; an unreachable backend
/// shows up as `ok: false` rather than as a failed request.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let statuses = state.llm.health_all().await;
    debug!(probes = statuses.len(), "health: done");

    ApiResponse::success(statuses).into_response_with_status(StatusCode::OK)
}
