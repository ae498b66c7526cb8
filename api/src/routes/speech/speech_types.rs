use serde::{Deserialize, Serialize};

/// Request body of `POST /transcribe`.
#[derive(Debug, Deserialize)]
pub struct TranscribeRequest {
    /// Base64-encoded WEBM/OPUS audio clip.
    pub audio_base64: String,
    /// BCP-47 language code; defaults to `ka-GE`.
    #[serde(default)]
    pub language: Option<String>,
}

/// Response payload of `POST /transcribe`.
#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    /// Recognized text; empty when no speech was detected.
    pub transcript: String,
    /// Language the recognizer was asked for.
    pub language: String,
    /// Human-readable note for the empty-transcript case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Request body of `POST /tts/synthesize`.
#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    /// Text to synthesize (at most 5000 characters).
    pub text: String,
    /// BCP-47 language code; defaults to `en-US`.
    #[serde(default)]
    pub language: Option<String>,
}
