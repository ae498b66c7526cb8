//! Conversational responses: small talk, concept explanations, and the
//! best-result synthesis used by the navigation router.
//!
//! The two public handlers never fail: a dead or empty completion turns
//! into a canned, language-selected apology. The synthesis helper stays
//! fallible because the router has its own fallback tier for it.

use llm_service::LlmServiceProfiles;
use tracing::{info, warn};

use crate::error::AssistantError;
use crate::prompts;

const KNOWLEDGE_APOLOGY_KA: &str =
    "ვერ მოხერხდა პასუხის გენერირება. გთხოვთ, სცადოთ თავიდან ან ეწვიოთ www.geostat.ge-ს";
const KNOWLEDGE_APOLOGY_EN: &str =
    "Unable to generate response. Please try again or visit www.geostat.ge";

const SMALL_TALK_APOLOGY_KA: &str = "გამარჯობა! როგორ შემიძლია დაგეხმაროთ სტატისტიკის მოძებნაში?";
const SMALL_TALK_APOLOGY_EN: &str = "Hello! How can I help you find statistics?";

/// Explains a statistics concept in 3-4 sentences, without quoting figures.
pub async fn general_knowledge(svc: &LlmServiceProfiles, message: &str, language: &str) -> String {
    let prompt = prompts::general_knowledge_prompt(message, language);

    match completed(svc.generate_slow(&prompt, None).await) {
        Ok(response) => {
            info!(chars = response.len(), "knowledge response generated");
            response
        }
        Err(err) => {
            warn!(error = %err, "knowledge response failed");
            if language == "ka" {
                KNOWLEDGE_APOLOGY_KA.to_string()
            } else {
                KNOWLEDGE_APOLOGY_EN.to_string()
            }
        }
    }
}

/// Replies to greetings/thanks/off-topic chatter in 1-2 sentences.
pub async fn small_talk(svc: &LlmServiceProfiles, message: &str, language: &str) -> String {
    let prompt = prompts::small_talk_prompt(message, language);

    match completed(svc.generate_fast(&prompt, None).await) {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "small talk failed");
            if language == "ka" {
                SMALL_TALK_APOLOGY_KA.to_string()
            } else {
                SMALL_TALK_APOLOGY_EN.to_string()
            }
        }
    }
}

/// Asks the model to pick the single best candidate from a formatted
/// result list and explain it in the required heading/URL/blank/sentences
/// format.
///
/// # Errors
/// Propagates completion failures; the navigation router degrades to its
/// URL-scanning fallback in that case. A blank-but-successful completion
/// is returned as-is (the router skips blank blocks).
pub async fn synthesize_best_result(
    svc: &LlmServiceProfiles,
    question: &str,
    formatted_results: &str,
    language: &str,
) -> Result<String, AssistantError> {
    let prompt = prompts::best_result_prompt(question, formatted_results, language);
    let analysis = svc.generate_slow(&prompt, None).await?;
    Ok(analysis.trim().to_string())
}

/// Collapses a blank completion into an error so callers fall back to the
/// canned reply.
fn completed(result: Result<String, llm_service::AiLlmError>) -> Result<String, AssistantError> {
    let text = result?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AssistantError::EmptyCompletion);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_completion_counts_as_a_failure() {
        assert!(completed(Ok("   \n".to_string())).is_err());
        assert_eq!(completed(Ok(" ok ".to_string())).unwrap(), "ok");
    }
}
