//! The per-request query plan produced by classification.

use serde::Deserialize;

use crate::language;

/// Classified purpose of a user message.
///
/// The wire format is a lowercase string tag (see [`QueryPlan::intent`]);
/// this enum is what the dispatcher actually matches on. Unknown tags
/// dispatch as [`Intent::Navigation`] — showing data is the safe default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Navigation,
    GeneralKnowledge,
    SmallTalk,
}

/// One request's classified plan.
///
/// Deserialized from the classifier's single-line JSON; every field is
/// optional on the wire and [`QueryPlan::normalize`] fills the gaps.
/// Created once per request and never mutated after normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryPlan {
    /// Two-letter language code (`ka` / `en`).
    #[serde(default)]
    pub language: String,

    /// Lowercase intent tag (`navigation` / `general_knowledge` / `small_talk`).
    #[serde(default)]
    pub intent: String,

    /// Coarse topic tag used for the portal lookup, or `other`.
    #[serde(default)]
    pub topic: String,

    /// Relevance-ranked search queries; non-empty whenever the intent is
    /// navigation (guaranteed by `normalize`).
    #[serde(default, rename = "searchQueries")]
    pub search_queries: Vec<String>,
}

impl QueryPlan {
    /// Maps the normalized intent tag onto the dispatch enum.
    pub fn intent(&self) -> Intent {
        match self.intent.as_str() {
            "small_talk" => Intent::SmallTalk,
            "general_knowledge" => Intent::GeneralKnowledge,
            _ => Intent::Navigation,
        }
    }

    /// Normalize classifier output:
    /// - default language via the script heuristic
    /// - trim + lowercase intent/topic, defaulting blanks
    /// - ensure navigation has at least one search query
    ///
    /// Idempotent: normalizing an already-normalized plan is a no-op.
    pub fn normalize(&mut self, original_msg: &str) {
        if self.language.trim().is_empty() {
            self.language = language::detect_language(original_msg).to_string();
        }

        if self.intent.trim().is_empty() {
            self.intent = "navigation".to_string();
        } else {
            self.intent = self.intent.trim().to_lowercase();
        }

        if self.topic.trim().is_empty() {
            self.topic = "other".to_string();
        } else {
            self.topic = self.topic.trim().to_lowercase();
        }

        if self.intent == "navigation" && self.search_queries.is_empty() {
            let fallback_query = original_msg
                .split_whitespace()
                .take(3)
                .collect::<Vec<_>>()
                .join(" ");
            self.search_queries = vec![fallback_query];
        }
    }

    /// Deterministic plan used when classification fails entirely.
    pub fn fallback(original_msg: &str) -> Self {
        let mut plan = Self {
            language: language::detect_language(original_msg).to_string(),
            intent: "navigation".to_string(),
            topic: "other".to_string(),
            search_queries: vec![original_msg.to_string()],
        };
        plan.normalize(original_msg);
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_defaults_blank_fields() {
        let mut plan = QueryPlan::default();
        plan.normalize("where is GDP data");

        assert_eq!(plan.language, "en");
        assert_eq!(plan.intent, "navigation");
        assert_eq!(plan.topic, "other");
        assert_eq!(plan.search_queries, vec!["where is GDP".to_string()]);
    }

    #[test]
    fn normalize_lowercases_and_trims_tags() {
        let mut plan = QueryPlan {
            language: "en".into(),
            intent: "  Navigation ".into(),
            topic: " Prices ".into(),
            search_queries: vec!["inflation".into()],
        };
        plan.normalize("inflation?");

        assert_eq!(plan.intent, "navigation");
        assert_eq!(plan.topic, "prices");
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut once = QueryPlan {
            language: String::new(),
            intent: "NAVIGATION".into(),
            topic: String::new(),
            search_queries: Vec::new(),
        };
        once.normalize("სად ვნახო ინფლაციის მონაცემები დღეს");
        let mut twice = once.clone();
        twice.normalize("სად ვნახო ინფლაციის მონაცემები დღეს");

        assert_eq!(once.language, twice.language);
        assert_eq!(once.intent, twice.intent);
        assert_eq!(once.topic, twice.topic);
        assert_eq!(once.search_queries, twice.search_queries);
    }

    #[test]
    fn navigation_always_has_a_query_after_normalize() {
        let mut plan = QueryPlan {
            language: "ka".into(),
            intent: "navigation".into(),
            topic: "prices".into(),
            search_queries: Vec::new(),
        };
        plan.normalize("ინფლაცია საქართველოში 2024 წელს");

        assert!(!plan.search_queries.is_empty());
        // First three whitespace-separated tokens of the original message.
        assert_eq!(plan.search_queries[0], "ინფლაცია საქართველოში 2024");
    }

    #[test]
    fn non_navigation_may_keep_empty_queries() {
        let mut plan = QueryPlan {
            language: "en".into(),
            intent: "general_knowledge".into(),
            topic: "economy".into(),
            search_queries: Vec::new(),
        };
        plan.normalize("what is GDP?");

        assert!(plan.search_queries.is_empty());
    }

    #[test]
    fn unknown_intent_dispatches_as_navigation() {
        let mut plan = QueryPlan {
            language: "en".into(),
            intent: "chit_chat".into(),
            topic: "other".into(),
            search_queries: Vec::new(),
        };
        plan.normalize("something");

        assert_eq!(plan.intent(), Intent::Navigation);
    }

    #[test]
    fn fallback_plan_is_navigation_with_the_message_as_query() {
        let plan = QueryPlan::fallback("უმუშევრობის დონე");

        assert_eq!(plan.language, "ka");
        assert_eq!(plan.intent(), Intent::Navigation);
        assert_eq!(plan.topic, "other");
        assert_eq!(plan.search_queries, vec!["უმუშევრობის დონე".to_string()]);
    }
}
