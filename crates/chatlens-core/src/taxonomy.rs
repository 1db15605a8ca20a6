//! Static two-level topic taxonomy.
//!
//! Reference vocabulary for display and authoring: a fixed mapping from
//! primary category to an ordered list of secondary labels. The pipeline
//! never validates remote output against this table; a classifier may
//! legitimately emit a secondary label outside the documented list.

/// Primary → ordered secondaries, in authoring order.
pub const TOPIC_HIERARCHY: &[(&str, &[&str])] = &[
    ("Politics", &["India", "UK", "USA", "China", "Russia", "Global"]),
    (
        "Sports",
        &["Cricket", "Football", "Basketball", "Tennis", "Olympics"],
    ),
    (
        "Technology",
        &[
            "Artificial Intelligence",
            "Machine Learning",
            "Software Development",
            "Cybersecurity",
            "Blockchain",
        ],
    ),
    (
        "Business",
        &["Startups", "Finance", "Stock Market", "Economy", "E-commerce"],
    ),
    (
        "Entertainment",
        &["Movies", "TV Shows", "Music", "Celebrities", "OTT Platforms"],
    ),
    (
        "Science",
        &["Physics", "Biology", "Space", "Climate", "Research"],
    ),
    (
        "Health",
        &["Fitness", "Nutrition", "Mental Health", "Diseases", "Medicine"],
    ),
    (
        "Education",
        &["Exams", "Universities", "Online Courses", "Careers", "Research"],
    ),
    (
        "General",
        &["Chitchat", "Greetings", "Meta", "Clarification", "Other"],
    ),
];

/// All primary categories, in authoring order.
pub fn primaries() -> impl Iterator<Item = &'static str> {
    TOPIC_HIERARCHY.iter().map(|(primary, _)| *primary)
}

/// Secondary labels documented for a primary category.
pub fn secondaries_for(primary: &str) -> Option<&'static [&'static str]> {
    TOPIC_HIERARCHY
        .iter()
        .find(|(p, _)| *p == primary)
        .map(|(_, secondaries)| *secondaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    #[test]
    fn test_every_primary_has_secondaries() {
        for (primary, secondaries) in TOPIC_HIERARCHY {
            assert!(
                !secondaries.is_empty(),
                "primary {} has no secondaries",
                primary
            );
        }
    }

    #[test]
    fn test_default_topic_is_documented() {
        let secondaries = secondaries_for(defaults::DEFAULT_TOPIC_PRIMARY).unwrap();
        assert!(secondaries.contains(&defaults::DEFAULT_TOPIC_SECONDARY));
    }

    #[test]
    fn test_general_contains_chitchat() {
        let secondaries = secondaries_for("General").unwrap();
        assert!(secondaries.contains(&"Chitchat"));
    }

    #[test]
    fn test_unknown_primary_is_none() {
        assert!(secondaries_for("Gardening").is_none());
    }

    #[test]
    fn test_primaries_preserve_authoring_order() {
        let all: Vec<_> = primaries().collect();
        assert_eq!(all.first(), Some(&"Politics"));
        assert_eq!(all.last(), Some(&"General"));
        assert_eq!(all.len(), 9);
    }

    #[test]
    fn test_no_duplicate_primaries() {
        let mut seen = std::collections::HashSet::new();
        for primary in primaries() {
            assert!(seen.insert(primary), "duplicate primary {}", primary);
        }
    }
}
