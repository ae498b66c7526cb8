//! HTTP surface of the assistant backend.
//!
//! Thin request/response mapping only: every route unwraps its DTO, calls
//! into the owning crate (`assistant`, `speech`, `llm-service`) and wraps
//! the result in the response envelope. No decision logic lives here.

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

use crate::core::app_state::AppState;
use crate::error_handler::{AppError, AppResult};
use crate::middleware_layer::json_extractor::json_error_mapper;
use crate::routes::{
    chat::chat_route::chat, health::health_route::health,
    speech::synthesize_route::synthesize, speech::transcribe_route::transcribe,
};

pub async fn start() -> AppResult<()> {
    let host_url = env::var("API_ADDRESS").map_err(|_| AppError::MissingEnv("API_ADDRESS"))?;

    let state = Arc::new(AppState::from_env()?);

    let app = Router::new()
        .route("/chat", get(chat))
        .route("/transcribe", post(transcribe))
        .route("/tts/synthesize", post(synthesize))
        .route("/health", get(health))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %host_url, "assistant backend listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    // Wait for the Ctrl+C signal
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
