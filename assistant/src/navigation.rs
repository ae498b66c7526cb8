//! Navigation routing: ordered search attempts, ranked results, portal
//! recommendation and best-result synthesis.
//!
//! Every step that talks to the network degrades gracefully: a failed
//! query falls through to the next one, a failed synthesis falls back to
//! the first result URL, and a fully dry run ends in a canned message.
//! [`handle`] never returns an error to its caller.

use tracing::{info, warn};

use crate::cfg::AssistantConfig;
use crate::conversation;
use crate::plan::QueryPlan;
use crate::portals;
use crate::prompts;
use crate::search::{PseClient, SearchCandidate};

/// Maximum number of ranked results offered to the synthesis step.
const TOP_RESULTS: usize = 5;

/// Minimum length for the degraded single-token retry.
const MIN_FALLBACK_TOKEN_CHARS: usize = 3;

/// Produces the final navigation answer for a classified plan.
pub async fn handle(cfg: &AssistantConfig, message: &str, plan: &QueryPlan) -> String {
    info!(topic = %plan.topic, "handling navigation");

    let results = run_search(&cfg.search, &plan.search_queries).await;
    info!(found = results.is_some(), "search attempts finished");

    if results.is_none() && portals::portal_url(&plan.topic).is_none() {
        warn!(topic = %plan.topic, "no results and no portal for topic");
        return no_results_message(&plan.language);
    }

    let analysis = match &results {
        Some(formatted) => Some(best_result_block(cfg, message, formatted, &plan.language).await),
        None => None,
    };

    assemble(plan, analysis.as_deref())
}

/// Runs the ordered search attempts, then the degraded single-token retry.
///
/// Returns the formatted top-ranked block of the first attempt that
/// produced at least one positively scored candidate.
async fn run_search(pse: &PseClient, queries: &[String]) -> Option<String> {
    for (attempt, query) in queries.iter().enumerate() {
        info!(attempt = attempt + 1, query = %query, "search attempt");
        if let Some(formatted) = rank_and_format(pse.search(query).await) {
            return Some(formatted);
        }
    }

    // Degraded tier: first word of the first query, if long enough to be
    // a meaningful term.
    let first_token = queries.first()?.split_whitespace().next()?;
    if first_token.chars().count() < MIN_FALLBACK_TOKEN_CHARS {
        return None;
    }
    info!(query = %first_token, "degraded single-token retry");
    rank_and_format(pse.search(first_token).await)
}

/// Filters, ranks and formats candidates for the synthesis prompt.
///
/// Drops non-positive scores, sorts descending (stable, so ties keep their
/// API order), keeps the top five and renders the numbered block list.
fn rank_and_format(candidates: Vec<SearchCandidate>) -> Option<String> {
    let mut kept: Vec<SearchCandidate> = candidates.into_iter().filter(|c| c.score > 0).collect();
    if kept.is_empty() {
        return None;
    }

    kept.sort_by_key(|c| std::cmp::Reverse(c.score));
    kept.truncate(TOP_RESULTS);

    let mut out = String::new();
    for (i, result) in kept.iter().enumerate() {
        out.push_str(&format!("Result #{} (score: {}):\n", i + 1, result.score));
        out.push_str(&format!("Title: {}\n", result.title));
        out.push_str(&format!("URL: {}\n", result.link));
        out.push_str(&format!("Description: {}\n\n", result.snippet));
    }
    Some(out)
}

/// Synthesis with its own fallback tier: on completion failure, scan the
/// formatted list for the first URL and reuse the heading.
async fn best_result_block(
    cfg: &AssistantConfig,
    question: &str,
    formatted_results: &str,
    language: &str,
) -> String {
    match conversation::synthesize_best_result(&cfg.svc, question, formatted_results, language)
        .await
    {
        Ok(analysis) => analysis,
        Err(err) => {
            warn!(error = %err, "best-result synthesis failed, using first URL");
            fallback_best_result(formatted_results, language)
        }
    }
}

/// Degraded best-result block: heading plus the first `URL:` line of the
/// formatted list, or its first line when no URL line exists.
fn fallback_best_result(formatted_results: &str, language: &str) -> String {
    let heading = prompts::relevant_page_heading(language);

    for line in formatted_results.lines() {
        if let Some(url) = line.strip_prefix("URL: ") {
            return format!("{heading}\n{}", url.trim());
        }
    }

    let first_line = formatted_results.lines().next().unwrap_or_default();
    format!("{heading}\n{first_line}")
}

/// Assembles the final answer from the optional portal block and the
/// optional analysis block, blank-line separated.
fn assemble(plan: &QueryPlan, analysis: Option<&str>) -> String {
    let is_georgian = plan.language == "ka";
    let mut response = String::new();

    if let Some(url) = portals::portal_url(&plan.topic) {
        info!(topic = %plan.topic, "adding portal recommendation");

        response.push_str(if is_georgian {
            "📊 **რეკომენდებული პორტალი**: "
        } else {
            "📊 **Recommended portal**: "
        });
        response.push_str(&plan.topic.to_uppercase());
        response.push_str("\n\n");

        response.push_str(url);
        response.push_str("\n\n");

        match portals::portal_description(&plan.topic) {
            Some(desc) => response.push_str(if is_georgian {
                desc.georgian
            } else {
                desc.english
            }),
            None => response.push_str(if is_georgian {
                "ინტერაქტიული ვიზუალიზაცია და მონაცემები."
            } else {
                "Interactive visualisations and data."
            }),
        }
        response.push_str("\n\n");
    }

    if let Some(analysis) = analysis {
        let trimmed = analysis.trim();
        if !trimmed.is_empty() {
            response.push_str(trimmed);
        }
    }

    response.trim().to_string()
}

/// Canned, language-selected reply for the "nothing found, no portal" case.
fn no_results_message(language: &str) -> String {
    if language == "ka" {
        "ვერ მოიძებნა შესაბამისი გვერდები.\n\nსცადეთ:\n- მთავარი კატეგორიები: https://www.geostat.ge/ka/modules/categories\n- მონაცემთა პორტალები: https://www.geostat.ge/ka/page/data-portals"
            .to_string()
    } else {
        "Couldn't find relevant pages.\n\nTry:\n- Main categories: https://www.geostat.ge/en/modules/categories\n- Data portals: https://www.geostat.ge/en/page/data-portals"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, link: &str, score: i32) -> SearchCandidate {
        SearchCandidate {
            title: title.to_string(),
            link: link.to_string(),
            snippet: String::new(),
            score,
        }
    }

    #[test]
    fn rank_and_format_keeps_only_the_top_five_descending() {
        let candidates = vec![
            candidate("a", "https://geostat.ge/a", 120),
            candidate("b", "https://geostat.ge/b", 195),
            candidate("c", "https://geostat.ge/c", 30),
            candidate("d", "https://geostat.ge/d", 160),
            candidate("e", "https://geostat.ge/e", 150),
            candidate("f", "https://geostat.ge/f", 100),
            candidate("g", "https://geostat.ge/g", 130),
        ];

        let formatted = rank_and_format(candidates).unwrap();

        // Top five of the seven distinct scores: 195, 160, 150, 130, 120.
        let urls: Vec<&str> = formatted
            .lines()
            .filter_map(|l| l.strip_prefix("URL: "))
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://geostat.ge/b",
                "https://geostat.ge/d",
                "https://geostat.ge/e",
                "https://geostat.ge/g",
                "https://geostat.ge/a",
            ]
        );
        // 30 and 100 fell off the end; nothing below rank five survives.
        assert!(!formatted.contains("https://geostat.ge/c"));
        assert!(!formatted.contains("https://geostat.ge/f"));
    }

    #[test]
    fn rank_and_format_discards_non_positive_scores() {
        let candidates = vec![
            candidate("zero", "https://geostat.ge/zero", 0),
            candidate("neg", "https://geostat.ge/neg", -10),
            candidate("off", "https://example.com", -10000),
        ];
        assert!(rank_and_format(candidates).is_none());
    }

    #[test]
    fn rank_and_format_ties_keep_original_order() {
        let candidates = vec![
            candidate("first", "https://geostat.ge/first", 150),
            candidate("second", "https://geostat.ge/second", 150),
            candidate("third", "https://geostat.ge/third", 150),
        ];

        let formatted = rank_and_format(candidates).unwrap();
        let urls: Vec<&str> = formatted
            .lines()
            .filter_map(|l| l.strip_prefix("URL: "))
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://geostat.ge/first",
                "https://geostat.ge/second",
                "https://geostat.ge/third",
            ]
        );
    }

    #[test]
    fn formatted_block_carries_rank_score_and_snippet() {
        let mut c = candidate("Consumer prices", "https://kaleidoscope.geostat.ge/", 190);
        c.snippet = "CPI portal".to_string();

        let formatted = rank_and_format(vec![c]).unwrap();
        assert!(formatted.starts_with("Result #1 (score: 190):\n"));
        assert!(formatted.contains("Title: Consumer prices\n"));
        assert!(formatted.contains("URL: https://kaleidoscope.geostat.ge/\n"));
        assert!(formatted.contains("Description: CPI portal\n"));
    }

    #[test]
    fn no_results_message_is_verbatim_per_language() {
        assert_eq!(
            no_results_message("ka"),
            "ვერ მოიძებნა შესაბამისი გვერდები.\n\nსცადეთ:\n- მთავარი კატეგორიები: https://www.geostat.ge/ka/modules/categories\n- მონაცემთა პორტალები: https://www.geostat.ge/ka/page/data-portals"
        );
        assert_eq!(
            no_results_message("en"),
            "Couldn't find relevant pages.\n\nTry:\n- Main categories: https://www.geostat.ge/en/modules/categories\n- Data portals: https://www.geostat.ge/en/page/data-portals"
        );
    }

    #[test]
    fn portal_topic_without_results_yields_portal_block_only() {
        let plan = QueryPlan {
            language: "en".into(),
            intent: "navigation".into(),
            topic: "wages".into(),
            search_queries: vec!["salary".into()],
        };

        let response = assemble(&plan, None);

        assert!(response.starts_with("📊 **Recommended portal**: WAGES"));
        assert!(response.contains("https://salarium.geostat.ge/"));
        assert!(response.contains("Salary calculator and labor market analysis"));
        // No explanation block was produced.
        assert!(!response.contains("Relevant Page"));
    }

    #[test]
    fn topic_without_specific_description_gets_the_generic_sentence() {
        let plan = QueryPlan {
            language: "ka".into(),
            intent: "navigation".into(),
            topic: "economy".into(),
            search_queries: vec!["მშპ".into()],
        };

        let response = assemble(&plan, None);
        assert!(response.contains("https://eap.geostat.ge"));
        assert!(response.contains("ინტერაქტიული ვიზუალიზაცია და მონაცემები."));
    }

    #[test]
    fn analysis_block_is_appended_after_the_portal_block() {
        let plan = QueryPlan {
            language: "en".into(),
            intent: "navigation".into(),
            topic: "gis".into(),
            search_queries: vec!["maps".into()],
        };

        let analysis = "📄 **Relevant Page:**\nhttps://gis.geostat.ge/geomap/index.html\n\nInteractive maps.";
        let response = assemble(&plan, Some(analysis));

        let portal_pos = response.find("Recommended portal").unwrap();
        let analysis_pos = response.find("Relevant Page").unwrap();
        assert!(portal_pos < analysis_pos);
    }

    #[test]
    fn blank_analysis_is_skipped() {
        let plan = QueryPlan {
            language: "en".into(),
            intent: "navigation".into(),
            topic: "energy".into(),
            search_queries: vec!["electricity".into()],
        };

        let with_blank = assemble(&plan, Some("  \n"));
        let without = assemble(&plan, None);
        assert_eq!(with_blank, without);
    }

    #[test]
    fn fallback_scans_for_the_first_url_line() {
        let formatted = "Result #1 (score: 190):\nTitle: Prices\nURL: https://kaleidoscope.geostat.ge/\nDescription: CPI\n\n";

        assert_eq!(
            fallback_best_result(formatted, "en"),
            "📄 **Relevant Page:**\nhttps://kaleidoscope.geostat.ge/"
        );
        assert_eq!(
            fallback_best_result(formatted, "ka"),
            "📄 **შესაბამისი გვერდი:**\nhttps://kaleidoscope.geostat.ge/"
        );
    }

    #[test]
    fn fallback_without_url_line_uses_the_first_line() {
        let out = fallback_best_result("nothing structured here", "en");
        assert_eq!(out, "📄 **Relevant Page:**\nnothing structured here");
    }
}
