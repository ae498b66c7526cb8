use serde::{Deserialize, Serialize};

/// Query parameters of `GET /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatParams {
    /// The user's free-text question.
    pub message: String,
}

/// Response payload of `GET /chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Generated answer text.
    pub response: String,
}
