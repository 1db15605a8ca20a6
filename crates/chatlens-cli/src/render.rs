//! Terminal rendering for annotations and replies.
//!
//! Mirrors the display gating of the chat front end: an error suppresses
//! topic and expansion entirely, a warning is shown above best-effort
//! values, and empty fields render nothing.

use chatlens_core::Annotation;

/// Banner lines to print above a user turn, in order.
pub fn annotation_banners(annotation: &Annotation) -> Vec<String> {
    let mut banners = Vec::new();
    if let Some(error) = &annotation.error {
        banners.push(format!("[error] {}", error));
    }
    if let Some(warning) = &annotation.warning {
        banners.push(format!("[warn] {}", warning));
        if let Some(raw) = &annotation.raw_output {
            banners.push(format!("        raw output: {}...", raw));
        }
    }
    banners
}

/// Topic tag line, when a topic is present.
pub fn topic_tag(annotation: &Annotation) -> Option<String> {
    annotation
        .topic
        .as_ref()
        .map(|topic| format!("[topic] {}", topic))
}

/// Expanded-query panel, when a non-empty expansion is present.
pub fn expanded_query_panel(annotation: &Annotation) -> Option<String> {
    if annotation.expanded_query.is_empty() {
        None
    } else {
        Some(format!("[expanded] {}", annotation.expanded_query))
    }
}
