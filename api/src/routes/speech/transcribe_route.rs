//! POST /transcribe — speech-to-text over a base64 audio clip.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, error};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::speech::speech_types::{TranscribeRequest, TranscribeResponse},
};

const DEFAULT_LANGUAGE: &str = "ka-GE";

/// Handler: POST /transcribe
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/transcribe \
///   -H 'content-type: application/json' \
///   -d '{"audio_base64":"...","language":"ka-GE"}'
/// ```
pub async fn transcribe(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TranscribeRequest>,
) -> AppResult<Response> {
    if body.audio_base64.trim().is_empty() {
        return Err(AppError::BadRequest("no audio data provided".to_string()));
    }

    let audio = BASE64
        .decode(body.audio_base64.as_bytes())
        .map_err(|e| AppError::BadRequest(format!("invalid base64 audio: {e}")))?;

    let language = body.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    debug!(bytes = audio.len(), language = %language, "transcribe: start");

    let transcript = state
        .stt
        .transcribe(&audio, Some(&language))
        .await
        .map_err(|e| {
            error!(error = %e, "transcription failed");
            AppError::from(e)
        })?;

    let message = transcript
        .is_empty()
        .then(|| "No speech detected".to_string());

    Ok(
        ApiResponse::success(TranscribeResponse {
            transcript,
            language,
            message,
        })
        .into_response_with_status(StatusCode::OK),
    )
}
