//! Domain-restricted search client (Google Programmable Search Engine).
//!
//! Every query is prefixed with `site:geostat.ge` so the external index can
//! only ever return pages of the statistics office. Failures of any kind —
//! transport, non-2xx, unparseable body — degrade to an empty candidate
//! list; the router treats that exactly like "no results".

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::AssistantError;
use crate::scoring::{self, SITE_DOMAIN};

/// Upper bound on raw items requested per query.
const RESULT_COUNT: u32 = 10;

/// Snippets longer than this are clipped for prompt hygiene.
const MAX_SNIPPET_CHARS: usize = 250;

/// One scored search result.
///
/// The score is computed exactly once, at construction, and never changes.
#[derive(Debug, Clone)]
pub struct SearchCandidate {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub score: i32,
}

impl SearchCandidate {
    /// Builds a candidate from raw API fields, clipping the snippet and
    /// computing the relevance score.
    pub fn new(title: String, link: String, snippet: String) -> Self {
        let snippet = clip_snippet(snippet);
        let score = scoring::score(&title, &link);
        Self {
            title,
            link,
            snippet,
            score,
        }
    }
}

fn clip_snippet(snippet: String) -> String {
    if snippet.chars().count() <= MAX_SNIPPET_CHARS {
        return snippet;
    }
    let mut clipped: String = snippet.chars().take(MAX_SNIPPET_CHARS - 3).collect();
    clipped.push_str("...");
    clipped
}

/// Client for the Google Programmable Search REST API, locked to one
/// search-engine id and one target domain.
pub struct PseClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    cx_id: String,
}

impl PseClient {
    /// Construct a new search client with a per-call timeout.
    pub fn new(endpoint: &str, api_key: &str, cx_id: &str) -> Result<Self, AssistantError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            cx_id: cx_id.to_string(),
        })
    }

    /// Runs one domain-restricted query and returns scored candidates.
    ///
    /// Never fails: any upstream problem is logged and yields an empty vec.
    pub async fn search(&self, query: &str) -> Vec<SearchCandidate> {
        match self.try_search(query).await {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(error = %err, query = %query, "search request failed");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<SearchCandidate>, AssistantError> {
        let site_query = format!("site:{SITE_DOMAIN} {query}");
        let count = RESULT_COUNT.to_string();
        debug!(query = %site_query, "GET {}", self.endpoint);

        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cx_id.as_str()),
                ("q", site_query.as_str()),
                ("num", count.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = resp.text().await?;
        let candidates = candidates_from_json(&body)?;
        debug!(count = candidates.len(), "search response parsed");
        Ok(candidates)
    }
}

/// Raw response shape of the search API. Every field may be missing.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Default, Deserialize)]
struct RawItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

/// Parses a raw API body into scored candidates.
///
/// Missing `title`/`link`/`snippet` fields become empty strings rather than
/// dropping the item.
pub(crate) fn candidates_from_json(body: &str) -> Result<Vec<SearchCandidate>, AssistantError> {
    let parsed: SearchResponse = serde_json::from_str(body)?;
    Ok(parsed
        .items
        .into_iter()
        .map(|item| SearchCandidate::new(item.title, item.link, item.snippet))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_with_missing_fields_as_empty_strings() {
        let body = r#"{
            "items": [
                {"title": "Inflation", "link": "https://www.geostat.ge/ka/prices", "snippet": "CPI data"},
                {"link": "https://www.geostat.ge/ka/gdp"},
                {}
            ]
        }"#;

        let candidates = candidates_from_json(body).unwrap();
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[1].title, "");
        assert_eq!(candidates[1].snippet, "");
        assert_eq!(candidates[2].link, "");
    }

    #[test]
    fn body_without_items_is_empty_not_an_error() {
        let candidates = candidates_from_json("{}").unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn garbage_body_is_an_error() {
        assert!(candidates_from_json("<html>quota exceeded</html>").is_err());
    }

    #[test]
    fn long_snippets_are_clipped_to_250_chars() {
        let long = "ა".repeat(400);
        let candidate = SearchCandidate::new("t".into(), "https://geostat.ge".into(), long);

        assert_eq!(candidate.snippet.chars().count(), 250);
        assert!(candidate.snippet.ends_with("..."));
    }

    #[test]
    fn short_snippets_are_untouched() {
        let candidate = SearchCandidate::new(
            "t".into(),
            "https://geostat.ge".into(),
            "short snippet".into(),
        );
        assert_eq!(candidate.snippet, "short snippet");
    }

    #[test]
    fn score_is_computed_at_construction() {
        let on_domain =
            SearchCandidate::new("Prices".into(), "https://kaleidoscope.geostat.ge/".into(), String::new());
        let off_domain =
            SearchCandidate::new("Prices".into(), "https://example.com/prices".into(), String::new());

        assert!(on_domain.score > 0);
        assert_eq!(off_domain.score, crate::scoring::OFF_DOMAIN_SCORE);
    }
}
