//! Speech-to-text client over the Google Speech REST API.
//!
//! One call shape: `POST {endpoint}/v1/speech:recognize?key={api_key}`
//! with base64 audio content. The recorder in the web client produces
//! WEBM/OPUS at 48 kHz, so those parameters are fixed here.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SpeechError;

const GEORGIAN_LANGUAGE_CODE: &str = "ka-GE";
const WEBM_OPUS_SAMPLE_RATE: u32 = 48_000;

/// Thin client for Google Speech `speech:recognize`.
pub struct SpeechToTextClient {
    http: reqwest::Client,
    url_recognize: String,
}

impl SpeechToTextClient {
    /// Builds the client from `GOOGLE_SPEECH_API_KEY` (and an optional
    /// `GOOGLE_SPEECH_URL` override, default
    /// `https://speech.googleapis.com`).
    pub fn from_env() -> Result<Self, SpeechError> {
        let api_key = std::env::var("GOOGLE_SPEECH_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or(SpeechError::MissingEnv("GOOGLE_SPEECH_API_KEY"))?;
        let base = std::env::var("GOOGLE_SPEECH_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "https://speech.googleapis.com".to_string());

        Self::new(&api_key, &base)
    }

    /// Builds the client against an explicit endpoint.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, SpeechError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            url_recognize: format!(
                "{}/v1/speech:recognize?key={}",
                base_url.trim_end_matches('/'),
                api_key
            ),
        })
    }

    /// Transcribes an audio clip.
    ///
    /// Empty input is a no-op returning empty text, not an error; so is a
    /// response in which the service detected no speech.
    ///
    /// # Errors
    /// - [`SpeechError::HttpStatus`] for non-2xx responses
    /// - [`SpeechError::Transport`] for client errors
    pub async fn transcribe(
        &self,
        audio: &[u8],
        language_code: Option<&str>,
    ) -> Result<String, SpeechError> {
        if audio.is_empty() {
            warn!("empty audio data received");
            return Ok(String::new());
        }

        let body = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "WEBM_OPUS",
                sample_rate_hertz: WEBM_OPUS_SAMPLE_RATE,
                language_code: language_code.unwrap_or(GEORGIAN_LANGUAGE_CODE),
                enable_automatic_punctuation: true,
            },
            audio: RecognitionAudio {
                content: BASE64.encode(audio),
            },
        };

        let resp = self
            .http
            .post(&self.url_recognize)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(SpeechError::HttpStatus {
                status,
                url: "speech:recognize".to_string(),
                snippet: text.chars().take(240).collect(),
            });
        }

        let out: RecognizeResponse = resp
            .json()
            .await
            .map_err(|e| SpeechError::Decode(format!("serde error: {e}")))?;

        let transcript = out
            .results
            .into_iter()
            .next()
            .and_then(|r| r.alternatives.into_iter().next())
            .map(|a| a.transcript)
            .unwrap_or_default();

        if transcript.is_empty() {
            info!("no speech detected in audio");
        } else {
            info!(chars = transcript.len(), "transcription successful");
        }

        Ok(transcript)
    }
}

/* ==========================
HTTP payloads
========================== */

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'a str,
    sample_rate_hertz: u32,
    language_code: &'a str,
    enable_automatic_punctuation: bool,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_audio_is_a_no_op() {
        // The endpoint is never contacted for empty input.
        let client = SpeechToTextClient::new("key", "http://127.0.0.1:9").unwrap();
        let transcript = client.transcribe(&[], None).await.unwrap();
        assert_eq!(transcript, "");
    }
}
