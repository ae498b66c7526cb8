//! Text-to-speech client over the ElevenLabs REST API.
//!
//! One call shape: `POST {endpoint}/v1/text-to-speech/{voice_id}` with an
//! `xi-api-key` header, returning raw MP3 bytes. The voice is picked per
//! language; texts over the service limit are rejected before the call.

use std::time::Duration;

use serde::Serialize;
use tracing::{error, info};

use crate::error::SpeechError;

/// Hard input limit enforced before calling the service.
pub const MAX_TEXT_CHARS: usize = 5000;

const VOICE_GEORGIAN: &str = "Z3R5wn05IrDiVCyEkUrK";
const VOICE_ENGLISH: &str = "21m00Tcm4TlvDq8ikWAM";
const MODEL_ID: &str = "eleven_v3";

/// Thin client for ElevenLabs text-to-speech.
pub struct TextToSpeechClient {
    http: reqwest::Client,
    base: String,
    api_key: String,
}

impl TextToSpeechClient {
    /// Builds the client from `ELEVENLABS_API_KEY` (and an optional
    /// `ELEVENLABS_URL` override, default `https://api.elevenlabs.io`).
    pub fn from_env() -> Result<Self, SpeechError> {
        let api_key = std::env::var("ELEVENLABS_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or(SpeechError::MissingEnv("ELEVENLABS_API_KEY"))?;
        let base = std::env::var("ELEVENLABS_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "https://api.elevenlabs.io".to_string());

        Self::new(&api_key, &base)
    }

    /// Builds the client against an explicit endpoint.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, SpeechError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Synthesizes speech for `text`, returning MP3 bytes.
    ///
    /// # Errors
    /// - [`SpeechError::TextTooLong`] for inputs over [`MAX_TEXT_CHARS`];
    ///   the service is not called in that case
    /// - [`SpeechError::HttpStatus`] for non-2xx responses
    /// - [`SpeechError::Decode`] for an empty audio body
    pub async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
        let len = text.chars().count();
        if len > MAX_TEXT_CHARS {
            error!(len, max = MAX_TEXT_CHARS, "text too long for synthesis");
            return Err(SpeechError::TextTooLong {
                len,
                max: MAX_TEXT_CHARS,
            });
        }

        let voice_id = voice_for_language(language);
        let url = format!("{}/v1/text-to-speech/{voice_id}", self.base);
        info!(voice_id, language, chars = len, "synthesizing speech");

        let resp = self
            .http
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&SynthesizeRequest {
                text,
                model_id: MODEL_ID,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SpeechError::HttpStatus {
                status,
                url,
                snippet: body.chars().take(240).collect(),
            });
        }

        let audio = resp.bytes().await?.to_vec();
        if audio.is_empty() {
            return Err(SpeechError::Decode("empty audio response".into()));
        }

        info!(bytes = audio.len(), "audio generated");
        Ok(audio)
    }
}

/// Georgian text goes to the Georgian-capable voice, everything else to
/// the English default.
fn voice_for_language(language: &str) -> &'static str {
    if language.starts_with("ka") {
        VOICE_GEORGIAN
    } else {
        VOICE_ENGLISH
    }
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_selection_follows_language_prefix() {
        assert_eq!(voice_for_language("ka-GE"), VOICE_GEORGIAN);
        assert_eq!(voice_for_language("ka"), VOICE_GEORGIAN);
        assert_eq!(voice_for_language("en-US"), VOICE_ENGLISH);
    }

    #[tokio::test]
    async fn over_long_text_is_rejected_before_the_call() {
        let client = TextToSpeechClient::new("key", "http://127.0.0.1:9").unwrap();
        let text = "ა".repeat(MAX_TEXT_CHARS + 1);

        match client.synthesize(&text, "ka-GE").await {
            Err(SpeechError::TextTooLong { len, max }) => {
                assert_eq!(len, MAX_TEXT_CHARS + 1);
                assert_eq!(max, MAX_TEXT_CHARS);
            }
            other => panic!("expected TextTooLong, got {other:?}"),
        }
    }
}
