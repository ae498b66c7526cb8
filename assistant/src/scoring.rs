//! Deterministic relevance scoring for search candidates.
//!
//! One pure function, [`score`], applied exactly once per candidate at
//! construction time. A base score is adjusted by a fixed, ordered table of
//! (predicate, delta) rules; every delta is additive, so rule order never
//! changes the result. Links outside the target domain are excluded with a
//! sentinel low score so that any in-domain page outranks them.

use std::sync::LazyLock;

use regex::Regex;

/// The only domain results may come from.
pub const SITE_DOMAIN: &str = "geostat.ge";

/// Starting score for any in-domain link.
pub const BASE_SCORE: i32 = 100;

/// Sentinel for links outside [`SITE_DOMAIN`]; guarantees they rank below
/// every in-domain candidate that survives filtering.
pub const OFF_DOMAIN_SCORE: i32 = -10000;

static SUBDOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://[A-Za-z0-9.-]+\.geostat\.ge").expect("subdomain pattern")
});

static CANONICAL_PAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://www\.geostat\.ge/[a-z]{2}/[a-zA-Z-]+/?$").expect("canonical page pattern")
});

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"202[0-4]").expect("year pattern"));

static MONTH_KA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "(იანვარი|თებერვალი|მარტი|აპრილი|მაისი|ივნისი|ივლისი|აგვისტო|სექტემბერი|ოქტომბერი|ნოემბერი|დეკემბერი)",
    )
    .expect("georgian month pattern")
});

static MONTH_EN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "(January|February|March|April|May|June|July|August|September|October|November|December)",
    )
    .expect("english month pattern")
});

/// One scoring rule: a named predicate over (title, link) and the delta it
/// contributes when it matches.
pub struct ScoreRule {
    pub name: &'static str,
    pub delta: i32,
    applies: fn(title: &str, link: &str) -> bool,
}

/// The static rule set applied on top of [`BASE_SCORE`].
///
/// Boosts favor category pages, dedicated subdomain portals and short
/// canonical URLs; penalties push down PDFs and dated report titles. The
/// media-PDF rule intentionally stacks with the plain PDF rule, as do the
/// two month rules for a bilingual dated title.
pub static RULES: &[ScoreRule] = &[
    ScoreRule {
        name: "category-path",
        delta: 30,
        applies: |_, link| link.contains("/modules/categories/"),
    },
    ScoreRule {
        name: "page-path",
        delta: 30,
        applies: |_, link| link.contains("/page/"),
    },
    ScoreRule {
        name: "portal-subdomain",
        delta: 40,
        applies: |_, link| SUBDOMAIN_RE.is_match(link),
    },
    ScoreRule {
        name: "canonical-page",
        delta: 35,
        applies: |_, link| CANONICAL_PAGE_RE.is_match(link),
    },
    ScoreRule {
        name: "short-link",
        delta: 20,
        applies: |_, link| link.len() < 80,
    },
    ScoreRule {
        name: "pdf",
        delta: -70,
        applies: |_, link| link.contains(".pdf"),
    },
    ScoreRule {
        name: "media-pdf",
        delta: -40,
        applies: |_, link| link.contains("/media/") && link.contains(".pdf"),
    },
    ScoreRule {
        name: "dated-title-year",
        delta: -25,
        applies: |title, _| YEAR_RE.is_match(title),
    },
    ScoreRule {
        name: "dated-title-month-ka",
        delta: -30,
        applies: |title, _| MONTH_KA_RE.is_match(title),
    },
    ScoreRule {
        name: "dated-title-month-en",
        delta: -30,
        applies: |title, _| MONTH_EN_RE.is_match(title),
    },
];

/// Computes the relevance score of one candidate. Pure and deterministic.
pub fn score(title: &str, link: &str) -> i32 {
    if !link.contains(SITE_DOMAIN) {
        return OFF_DOMAIN_SCORE;
    }

    BASE_SCORE
        + RULES
            .iter()
            .filter(|rule| (rule.applies)(title, link))
            .map(|rule| rule.delta)
            .sum::<i32>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_domain_links_get_the_sentinel() {
        assert_eq!(score("Anything", "https://example.com/statistics"), OFF_DOMAIN_SCORE);
    }

    #[test]
    fn off_domain_always_below_any_in_domain_candidate() {
        // Worst realistic in-domain case: every penalty fires at once.
        let worst = score(
            "January 2024 იანვარი report",
            "https://www.geostat.ge/media/archive/some-very-long-path-to-an-old-document/report-2024.pdf",
        );
        assert!(worst > OFF_DOMAIN_SCORE);
    }

    #[test]
    fn base_score_for_a_plain_long_domain_link() {
        // No boost or penalty applies: http (not https) kills the subdomain
        // boost, length >= 80 kills the short-link boost.
        let link = format!(
            "http://old.geostat.ge/some/deep/path/{}",
            "x".repeat(60)
        );
        assert_eq!(score("Statistics", &link), BASE_SCORE);
    }

    /// Pads a link with path filler so the short-link boost never fires.
    fn long_link(prefix: &str) -> String {
        format!("{prefix}{}", "x".repeat(80))
    }

    #[test]
    fn category_and_page_boosts_are_additive() {
        let plain = score("Data", &long_link("http://www.geostat.ge/"));
        assert_eq!(plain, BASE_SCORE);

        let with_categories = score("Data", &long_link("http://www.geostat.ge/modules/categories/"));
        assert_eq!(with_categories, BASE_SCORE + 30);

        let with_both = score(
            "Data",
            &long_link("http://www.geostat.ge/modules/categories/page/"),
        );
        assert_eq!(with_both, BASE_SCORE + 30 + 30);
    }

    #[test]
    fn subdomain_portal_gets_boosted() {
        // https subdomain + short link.
        assert_eq!(
            score("Energy portal", "https://energy.geostat.ge"),
            BASE_SCORE + 40 + 20
        );
    }

    #[test]
    fn canonical_www_page_gets_boosted() {
        // Canonical short page: subdomain pattern also matches www, plus
        // the short-link boost.
        assert_eq!(
            score("Categories", "https://www.geostat.ge/ka/categories"),
            BASE_SCORE + 40 + 35 + 20
        );
    }

    #[test]
    fn pdf_penalty_is_exactly_seventy() {
        let base_link = format!("http://www.geostat.ge/files/{}", "x".repeat(60));
        let pdf_link = format!("http://www.geostat.ge/files/{}.pdf", "x".repeat(56));
        assert_eq!(pdf_link.len(), base_link.len());

        assert_eq!(score("Doc", &base_link) - score("Doc", &pdf_link), 70);
    }

    #[test]
    fn media_pdf_stacks_on_top_of_pdf() {
        let pdf = score("Report", &format!("http://www.geostat.ge/files/{}.pdf", "x".repeat(60)));
        let media_pdf = score("Report", &format!("http://www.geostat.ge/media/{}.pdf", "x".repeat(60)));
        assert_eq!(pdf - media_pdf, 40);
    }

    #[test]
    fn dated_titles_are_penalized() {
        let link = format!("http://www.geostat.ge/path/{}", "x".repeat(60));
        let neutral = score("Employment", &link);

        assert_eq!(score("Employment 2023", &link), neutral - 25);
        assert_eq!(score("Employment January", &link), neutral - 30);
        assert_eq!(score("Employment იანვარი", &link), neutral - 30);
        // Year outside the penalized range is untouched.
        assert_eq!(score("Employment 2019", &link), neutral);
    }

    #[test]
    fn dated_pdf_report_double_penalty_is_preserved() {
        // A dated PDF collects year, month and both PDF penalties at once.
        // Intentional or not in the rule set, this down-ranking is the
        // documented behavior.
        let link = format!("https://www.geostat.ge/media/{}.pdf", "x".repeat(70));
        let got = score("CPI January 2024", &link);
        assert_eq!(got, BASE_SCORE + 40 - 70 - 40 - 25 - 30);
    }

    #[test]
    fn bilingual_dated_title_stacks_both_month_penalties() {
        let link = format!("http://www.geostat.ge/path/{}", "x".repeat(60));
        let neutral = score("Employment", &link);
        assert_eq!(score("Employment January იანვარი", &link), neutral - 60);
    }
}
