//! Shared LLM completion service.
//!
//! One crate owns every outbound call to a text-completion backend:
//! - provider clients ([`services::ollama_service`], [`services::anthropic_service`])
//! - a dual **fast**/**slow** profile facade ([`service_profiles::LlmServiceProfiles`])
//! - health probes suitable for a `/health` endpoint ([`health_service`])
//! - env-driven model configs ([`config::default_config`])
//! - unified error types ([`error_handler`])
//!
//! Construct [`service_profiles::LlmServiceProfiles`] once at startup, wrap it
//! in an `Arc`, and hand clones to whoever needs to generate text.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::AiLlmError;
pub use service_profiles::LlmServiceProfiles;
