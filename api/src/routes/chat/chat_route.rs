//! GET /chat — answers one free-text question.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use tracing::debug;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    routes::chat::chat_types::{ChatParams, ChatResponse},
};

/// Handler: GET /chat
///
/// # Example
/// ```bash
/// curl 'http://127.0.0.1:8080/chat?message=where%20is%20inflation%20data'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChatParams>,
) -> Response {
    debug!(chars = params.message.len(), "chat: start");

    // The pipeline never fails: blank input, classification errors and
    // upstream outages all end in a deterministic user-visible string.
    let response = assistant::respond(&state.assistant, &params.message).await;

    debug!(chars = response.len(), "chat: done");
    ApiResponse::success(ChatResponse { response }).into_response_with_status(StatusCode::OK)
}
