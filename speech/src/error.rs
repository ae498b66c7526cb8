//! Typed error for the speech crate.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeechError {
    /// Input failed validation before any service call was made.
    #[error("[Speech] text exceeds maximum length of {max} characters (got {len})")]
    TextTooLong {
        /// Actual input length in characters.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// Required configuration is missing.
    #[error("[Speech] missing required environment variable: {0}")]
    MissingEnv(&'static str),

    /// Transport/HTTP client error.
    #[error("[Speech] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-successful HTTP status from upstream.
    #[error("[Speech] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// Unexpected/empty response payload.
    #[error("[Speech] decode error: {0}")]
    Decode(String),
}
