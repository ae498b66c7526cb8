//! Static topic → portal lookup tables.
//!
//! Built once at first use and never mutated; safe for unsynchronized
//! concurrent reads across requests.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Bilingual one-line description of a portal.
pub struct PortalDescription {
    pub georgian: &'static str,
    pub english: &'static str,
}

static PORTAL_MAP: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("economy", "https://eap.geostat.ge"),
        ("prices", "https://kaleidoscope.geostat.ge/"),
        ("population", "https://census2024.geostat.ge/ka"),
        ("gis", "https://gis.geostat.ge/geomap/index.html"),
        ("gender", "https://gender.geostat.ge/gender/index.php"),
        ("environment", "https://environment.geostat.ge/"),
        ("regions", "https://regions.geostat.ge/regions/"),
        ("youth", "https://youth.geostat.ge/index.php?lang=ka"),
        ("automobile", "https://automobile.geostat.ge/ka/"),
        ("agriculture", "https://agriculture.geostat.ge/"),
        ("tourism", "https://tourism.geostat.ge/"),
        ("disability", "https://disability.geostat.ge/shshm/index.php?lang=ka"),
        ("fdi", "https://fdi.geostat.ge/"),
        ("energy", "https://energy.geostat.ge"),
        ("international", "https://i-rating.geostat.ge/"),
        ("taxes", "https://mytaxes.geostat.ge/mytaxes/"),
        ("trade", "https://ex-trade.geostat.ge/"),
        ("wages", "https://salarium.geostat.ge/"),
    ])
});

static PORTAL_DESCRIPTIONS: LazyLock<HashMap<&'static str, PortalDescription>> =
    LazyLock::new(|| {
        HashMap::from([
            (
                "international",
                PortalDescription {
                    georgian: "საერთაშორისო შედარებები და გლობალური რეიტინგები",
                    english: "International comparisons and global rankings",
                },
            ),
            (
                "gis",
                PortalDescription {
                    georgian: "გეოგრაფიული ინფორმაციული სისტემა და რუქები",
                    english: "Geographic Information System and maps",
                },
            ),
            (
                "wages",
                PortalDescription {
                    georgian: "ხელფასების კალკულატორი და შრომის ბაზრის ანალიზი",
                    english: "Salary calculator and labor market analysis",
                },
            ),
        ])
    });

/// Canonical portal URL for a topic, if one exists.
pub fn portal_url(topic: &str) -> Option<&'static str> {
    PORTAL_MAP.get(topic).copied()
}

/// Specific bilingual description for a topic's portal, if one exists.
pub fn portal_description(topic: &str) -> Option<&'static PortalDescription> {
    PORTAL_DESCRIPTIONS.get(topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_topics_resolve() {
        assert_eq!(portal_url("economy"), Some("https://eap.geostat.ge"));
        assert_eq!(portal_url("wages"), Some("https://salarium.geostat.ge/"));
        assert_eq!(portal_url("quantum"), None);
    }

    #[test]
    fn only_some_topics_have_specific_descriptions() {
        assert!(portal_description("gis").is_some());
        assert!(portal_description("economy").is_none());
    }
}
