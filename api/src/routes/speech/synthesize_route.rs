//! POST /tts/synthesize — text-to-speech, returning MP3 bytes.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::speech::speech_types::SynthesizeRequest,
};

const DEFAULT_LANGUAGE: &str = "en-US";

/// Handler: POST /tts/synthesize
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/tts/synthesize \
///   -H 'content-type: application/json' \
///   -d '{"text":"გამარჯობა","language":"ka-GE"}' --output speech.mp3
/// ```
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SynthesizeRequest>,
) -> AppResult<Response> {
    if body.text.trim().is_empty() {
        return Err(AppError::BadRequest("text parameter is missing or empty".to_string()));
    }

    let language = body.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    debug!(chars = body.text.chars().count(), language = %language, "synthesize: start");

    let audio = state
        .tts
        .synthesize(&body.text, &language)
        .await
        .map_err(|e| {
            error!(error = %e, "synthesis failed");
            AppError::from(e)
        })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("audio/mpeg"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("inline; filename=speech.mp3"),
    );

    Ok((StatusCode::OK, headers, audio).into_response())
}
