use std::sync::Arc;

use assistant::AssistantConfig;
use llm_service::{LlmServiceProfiles, config::default_config};
use speech::{SpeechToTextClient, TextToSpeechClient};

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Assistant pipeline (classification, search, routing).
    pub assistant: AssistantConfig,
    /// Shared completion-service profiles, also surfaced via `/health`.
    pub llm: Arc<LlmServiceProfiles>,
    /// Speech-to-text collaborator.
    pub stt: SpeechToTextClient,
    /// Text-to-speech collaborator.
    pub tts: TextToSpeechClient,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// Construction happens once at boot; any missing configuration is
    /// fatal before the listener binds.
    pub fn from_env() -> Result<Self, AppError> {
        let fast = default_config::config_fast()?;
        // Quality profile is optional: without one, slow calls reuse fast.
        let slow = default_config::config_slow().ok();
        let llm = Arc::new(LlmServiceProfiles::new(fast, slow, Some(10))?);

        let assistant = AssistantConfig::from_env(llm.clone())?;
        let stt = SpeechToTextClient::from_env()?;
        let tts = TextToSpeechClient::from_env()?;

        Ok(Self {
            assistant,
            llm,
            stt,
            tts,
        })
    }
}
