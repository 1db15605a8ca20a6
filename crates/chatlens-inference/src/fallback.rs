//! Deterministic local fallback classifier.
//!
//! Used when the remote annotation service is reachable but misbehaving.
//! Classification is a hard-coded decision list over the latest user
//! message: an ordered sequence of keyword-set → topic rules evaluated
//! first-match-wins. The ordering is a behavioral contract: a message
//! matching several rules resolves to the earliest one.
//!
//! No real query expansion happens here: the expanded query is always the
//! verbatim latest content.

use chatlens_core::{Topic, Turn};

/// Result of local fallback analysis. Total and deterministic: identical
/// input always yields identical output.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackAnalysis {
    pub expanded_query: String,
    pub topic: Topic,
}

/// Ordered keyword rules. Keywords match by lower-cased substring
/// containment; the first rule with any matching keyword wins.
const KEYWORD_RULES: &[(&[&str], (&str, &str))] = &[
    (&["movie", "film", "actor"], ("Entertainment", "Movies")),
    (
        &["football", "soccer", "goal", "cricket"],
        ("Sports", "Football"),
    ),
    (
        &["code", "programming", "software"],
        ("Technology", "Software Development"),
    ),
    (&["health", "doctor", "medicine"], ("Health", "Medicine")),
    (
        &["pm", "minister", "election", "government"],
        ("Politics", "India"),
    ),
    (
        &["ai", "machine learning", "technology"],
        ("Technology", "Artificial Intelligence"),
    ),
];

/// Topic when no rule matches.
const NO_MATCH_TOPIC: (&str, &str) = ("General", "Chitchat");

/// Classify the conversation locally.
///
/// Only the latest turn's content is inspected. Empty history yields an
/// empty expansion and the General/Other default.
pub fn classify_fallback(history: &[Turn]) -> FallbackAnalysis {
    let Some(latest) = history.last() else {
        return FallbackAnalysis {
            expanded_query: String::new(),
            topic: Topic::general_other(),
        };
    };

    // The pipeline only classifies on user turns; if the latest turn is
    // not one, fail closed with the chitchat default instead of searching
    // backwards through the history.
    if !latest.role.is_user() {
        return FallbackAnalysis {
            expanded_query: latest.content.clone(),
            topic: Topic::new(NO_MATCH_TOPIC.0, NO_MATCH_TOPIC.1),
        };
    }

    let lowered = latest.content.to_lowercase();
    let (level_1, level_2) = KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(_, topic)| *topic)
        .unwrap_or(NO_MATCH_TOPIC);

    FallbackAnalysis {
        expanded_query: latest.content.clone(),
        topic: Topic::new(level_1, level_2),
    }
}
