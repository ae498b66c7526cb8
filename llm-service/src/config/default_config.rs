//! Default LLM configs loaded strictly from environment variables.
//!
//! This module provides convenience constructors for [`LlmModelConfig`],
//! grouped by provider and role. Two roles exist:
//!
//! - **Slow** → high-quality, slower model (result analysis, explanations)
//! - **Fast** → lower-latency model (classification, short replies)
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`       = provider kind (`anthropic` (default) or `ollama`)
//! - `LLM_MAX_TOKENS` = optional max tokens (u32)
//!
//! Anthropic-specific:
//! - `ANTHROPIC_API_KEY`    = API key (mandatory)
//! - `ANTHROPIC_URL`        = endpoint (default `https://api.anthropic.com`)
//! - `ANTHROPIC_MODEL`      = slow/quality model (mandatory)
//! - `ANTHROPIC_MODEL_FAST` = fast model (falls back to `ANTHROPIC_MODEL`)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//! - `OLLAMA_MODEL`                = slow/quality model (mandatory)
//! - `OLLAMA_MODEL_FAST`           = fast model (falls back to `OLLAMA_MODEL`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError, env_opt_u32, must_env},
};

/// Resolves the provider kind from `LLM_KIND` (default: `anthropic`).
///
/// # Errors
/// [`ConfigError::UnsupportedProvider`] for anything other than
/// `anthropic` / `ollama` (case-insensitive).
pub fn llm_kind() -> Result<LlmProvider, AiLlmError> {
    let kind = std::env::var("LLM_KIND").unwrap_or_else(|_| "anthropic".to_string());
    match kind.trim().to_ascii_lowercase().as_str() {
        "anthropic" => Ok(LlmProvider::Anthropic),
        "ollama" => Ok(LlmProvider::Ollama),
        other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
    }
}

/// Constructs the **slow/quality** config for the active provider.
pub fn config_slow() -> Result<LlmModelConfig, AiLlmError> {
    match llm_kind()? {
        LlmProvider::Anthropic => config_anthropic_slow(),
        LlmProvider::Ollama => config_ollama_slow(),
    }
}

/// Constructs the **fast/speed** config for the active provider.
pub fn config_fast() -> Result<LlmModelConfig, AiLlmError> {
    match llm_kind()? {
        LlmProvider::Anthropic => config_anthropic_fast(),
        LlmProvider::Ollama => config_ollama_fast(),
    }
}

/// Resolves the Anthropic endpoint (default `https://api.anthropic.com`).
fn anthropic_endpoint() -> String {
    std::env::var("ANTHROPIC_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "https://api.anthropic.com".to_string())
}

/// Constructs a config for the **slow/quality** Anthropic model.
///
/// # Env
/// - `ANTHROPIC_API_KEY` (required)
/// - `ANTHROPIC_MODEL` (required)
/// - `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.2)`
/// - `timeout_secs = Some(60)`
pub fn config_anthropic_slow() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("ANTHROPIC_API_KEY")?;
    let model = must_env("ANTHROPIC_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Anthropic,
        model,
        endpoint: anthropic_endpoint(),
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.2),
        top_p: None,
        timeout_secs: Some(60),
    })
}

/// Constructs a config for the **fast** Anthropic model.
///
/// # Env
/// - `ANTHROPIC_API_KEY` (required)
/// - `ANTHROPIC_MODEL_FAST` (falls back to `ANTHROPIC_MODEL`)
/// - `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.7)`
/// - `top_p = Some(0.9)`
/// - `timeout_secs = Some(30)`
pub fn config_anthropic_fast() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("ANTHROPIC_API_KEY")?;
    let model = std::env::var("ANTHROPIC_MODEL_FAST")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(Ok)
        .unwrap_or_else(|| must_env("ANTHROPIC_MODEL"))?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Anthropic,
        model,
        endpoint: anthropic_endpoint(),
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.7),
        top_p: Some(0.9),
        timeout_secs: Some(30),
    })
}

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if both are missing
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Err(AiLlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/// Constructs a config for the **slow/quality** Ollama model.
///
/// # Env
/// - `OLLAMA_MODEL` (required)
/// - `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.2)`
/// - `timeout_secs = Some(120)`
pub fn config_ollama_slow() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = ollama_endpoint()?;
    let model = must_env("OLLAMA_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens,
        temperature: Some(0.2),
        top_p: None,
        timeout_secs: Some(120),
    })
}

/// Constructs a config for the **fast/speed** Ollama model.
///
/// # Env
/// - `OLLAMA_MODEL_FAST` (falls back to `OLLAMA_MODEL`)
/// - `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.7)`
/// - `top_p = Some(0.9)`
/// - `timeout_secs = Some(60)`
pub fn config_ollama_fast() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = ollama_endpoint()?;
    let model = std::env::var("OLLAMA_MODEL_FAST")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(Ok)
        .unwrap_or_else(|| must_env("OLLAMA_MODEL"))?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens,
        temperature: Some(0.7),
        top_p: Some(0.9),
        timeout_secs: Some(60),
    })
}
