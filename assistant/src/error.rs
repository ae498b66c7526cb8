//! Typed error for the assistant crate.
//!
//! These errors never escape [`crate::respond`]: every boundary that can
//! fail (classification, search, synthesis) absorbs its own error into the
//! next fallback tier. The type exists so the fallible internals stay
//! explicit about what went wrong.

use llm_service::AiLlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    /// Errors from the underlying llm-service crate.
    #[error("LLM error: {0}")]
    Llm(#[from] AiLlmError),

    /// HTTP/transport errors when calling the search API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization issues on untrusted model/search output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The completion service answered with an empty body.
    #[error("completion service returned an empty result")]
    EmptyCompletion,
}
