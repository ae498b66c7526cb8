//! Intent classification over untrusted completion output.

use llm_service::LlmServiceProfiles;
use tracing::{debug, info, warn};

use crate::error::AssistantError;
use crate::plan::QueryPlan;
use crate::prompts;

/// Classifies a user message into a [`QueryPlan`].
///
/// Never fails visibly: any error — transport, timeout, malformed model
/// output — collapses into the deterministic fallback plan instead of
/// propagating.
pub async fn classify(svc: &LlmServiceProfiles, message: &str) -> QueryPlan {
    match try_classify(svc, message).await {
        Ok(plan) => {
            info!(
                intent = %plan.intent,
                topic = %plan.topic,
                queries = plan.search_queries.len(),
                "classification completed"
            );
            plan
        }
        Err(err) => {
            warn!(error = %err, "classification failed, using fallback plan");
            QueryPlan::fallback(message)
        }
    }
}

async fn try_classify(
    svc: &LlmServiceProfiles,
    message: &str,
) -> Result<QueryPlan, AssistantError> {
    let prompt = prompts::classification_prompt(message);
    let raw = svc.generate_fast(&prompt, None).await?;

    if raw.trim().is_empty() {
        return Err(AssistantError::EmptyCompletion);
    }
    debug!(
        raw = %raw.chars().take(200).collect::<String>(),
        "raw classification response"
    );

    let mut plan: QueryPlan = serde_json::from_str(extract_json(&raw))?;
    plan.normalize(message);
    Ok(plan)
}

/// Extracts the JSON object from free-form model output.
///
/// Anything the model emits outside the outermost braces — prose, code
/// fences, trailing notes — is noise to discard, not an error. If no brace
/// pair exists the input is returned as-is and the caller's parse fails
/// into the fallback plan.
pub(crate) fn extract_json(raw: &str) -> &str {
    let start = raw.find('{');
    let end = raw.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if end > start => &raw[start..=end],
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN_JSON: &str =
        r#"{"language":"en", "intent":"navigation", "topic":"economy", "searchQueries":["gdp"]}"#;

    #[test]
    fn extracts_bare_json() {
        assert_eq!(extract_json(PLAN_JSON), PLAN_JSON);
    }

    #[test]
    fn strips_code_fences_and_prose() {
        let fenced = format!("```json\n{PLAN_JSON}\n```");
        assert_eq!(extract_json(&fenced), PLAN_JSON);

        let chatty = format!("Here is the classification:\n{PLAN_JSON}\nHope that helps!");
        assert_eq!(extract_json(&chatty), PLAN_JSON);
    }

    #[test]
    fn no_braces_returns_input_unchanged() {
        assert_eq!(extract_json("no json here"), "no json here");
    }

    #[test]
    fn extracted_json_deserializes_into_a_plan() {
        let fenced = format!("```json\n{PLAN_JSON}\n```");
        let mut plan: QueryPlan = serde_json::from_str(extract_json(&fenced)).unwrap();
        plan.normalize("gdp?");

        assert_eq!(plan.intent, "navigation");
        assert_eq!(plan.topic, "economy");
        assert_eq!(plan.search_queries, vec!["gdp".to_string()]);
    }
}
