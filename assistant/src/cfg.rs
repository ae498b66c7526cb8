//! Runtime configuration for the assistant pipeline.

use std::sync::Arc;

use llm_service::error_handler::must_env;
use llm_service::LlmServiceProfiles;

use crate::error::AssistantError;
use crate::search::PseClient;

/// Config bag for one assistant instance: the shared completion service
/// plus the domain-restricted search client.
pub struct AssistantConfig {
    pub svc: Arc<LlmServiceProfiles>,
    pub search: PseClient,
}

impl AssistantConfig {
    /// Builds the config from environment variables.
    ///
    /// # Environment variables
    /// - `PSE_API_KEY`  = Google Programmable Search API key (mandatory)
    /// - `PSE_CX_ID`    = search engine id (mandatory)
    /// - `PSE_ENDPOINT` = REST endpoint
    ///   (default `https://www.googleapis.com/customsearch/v1`)
    ///
    /// # Errors
    /// Fails fast on missing variables; configuration problems are fatal at
    /// startup, before any request is served.
    pub fn from_env(svc: Arc<LlmServiceProfiles>) -> Result<Self, AssistantError> {
        let api_key = must_env("PSE_API_KEY")?;
        let cx_id = must_env("PSE_CX_ID")?;
        let endpoint = env(
            "PSE_ENDPOINT",
            "https://www.googleapis.com/customsearch/v1",
        );

        Ok(Self {
            svc,
            search: PseClient::new(&endpoint, &api_key, &cx_id)?,
        })
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k).unwrap_or_else(|_| dflt.to_string())
}
