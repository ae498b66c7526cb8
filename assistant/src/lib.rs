//! Question-answering pipeline for the statistics office assistant.
//!
//! Public API: [`respond`]. It validates the input, short-circuits bare
//! greetings, classifies the message into a [`plan::QueryPlan`], and
//! dispatches to either the conversation responder or the navigation
//! router. Every failure path inside the pipeline terminates in a
//! deterministic, language-appropriate string — [`respond`] cannot fail.

pub mod cfg;
pub mod classify;
pub mod conversation;
pub mod error;
pub mod language;
pub mod navigation;
pub mod plan;
pub mod portals;
pub mod prompts;
pub mod scoring;
pub mod search;

pub use cfg::AssistantConfig;
pub use error::AssistantError;
pub use plan::{Intent, QueryPlan};
pub use search::SearchCandidate;

use tracing::info;

const ENTER_QUESTION_KA: &str = "გთხოვთ, შეიყვანოთ შეკითხვა.";

/// Answers one free-text user message.
///
/// # Example
/// ```no_run
/// # use std::sync::Arc;
/// # use assistant::AssistantConfig;
/// # use llm_service::{LlmServiceProfiles, config::default_config};
/// # #[tokio::main] async fn main() {
/// let svc = Arc::new(
///     LlmServiceProfiles::new(
///         default_config::config_fast().unwrap(),
///         default_config::config_slow().ok(),
///         Some(10),
///     )
///     .unwrap(),
/// );
/// let cfg = AssistantConfig::from_env(svc).unwrap();
/// let answer = assistant::respond(&cfg, "სად ვნახო ინფლაციის მონაცემები?").await;
/// println!("{answer}");
/// # }
/// ```
pub async fn respond(cfg: &AssistantConfig, message: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        return ENTER_QUESTION_KA.to_string();
    }

    info!(chars = message.len(), "user message received");

    if language::is_simple_greeting(message) {
        return language::greeting_reply(message).to_string();
    }

    let plan = classify::classify(&cfg.svc, message).await;
    info!(
        intent = %plan.intent,
        topic = %plan.topic,
        queries = ?plan.search_queries,
        "dispatching plan"
    );

    match plan.intent() {
        Intent::SmallTalk => conversation::small_talk(&cfg.svc, message, &plan.language).await,
        Intent::GeneralKnowledge => {
            conversation::general_knowledge(&cfg.svc, message, &plan.language).await
        }
        Intent::Navigation => navigation::handle(cfg, message, &plan).await,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use llm_service::{LlmModelConfig, LlmProvider, LlmServiceProfiles};

    use super::*;
    use crate::search::PseClient;

    /// Config whose endpoints are never contacted by the paths under test.
    fn offline_cfg() -> AssistantConfig {
        let fast = LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "test-model".into(),
            endpoint: "http://127.0.0.1:9".into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(1),
        };
        let svc = Arc::new(LlmServiceProfiles::new(fast, None, Some(1)).unwrap());
        let search = PseClient::new("http://127.0.0.1:9", "key", "cx").unwrap();
        AssistantConfig { svc, search }
    }

    #[tokio::test]
    async fn blank_input_gets_the_validation_reply() {
        let cfg = offline_cfg();
        assert_eq!(respond(&cfg, "   ").await, ENTER_QUESTION_KA);
    }

    #[tokio::test]
    async fn english_greeting_bypasses_classification() {
        let cfg = offline_cfg();
        // The offline endpoints would make any classifier call fail loudly;
        // this path must never reach them.
        assert_eq!(
            respond(&cfg, "hello").await,
            "Hello! What statistics are you looking for today?"
        );
    }

    #[tokio::test]
    async fn georgian_greeting_bypasses_classification() {
        let cfg = offline_cfg();
        assert_eq!(
            respond(&cfg, "გამარჯობა").await,
            "გამარჯობა! რა სტატისტიკური მონაცემები გაინტერესებთ?"
        );
    }
}
