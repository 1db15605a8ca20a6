//! Annotation reconciliation.
//!
//! One invocation per new user turn: call the remote annotation service,
//! interpret its result, and decide between trusting the remote output,
//! substituting the local fallback, or surfacing a hard error with no
//! annotation at all. The three-way split is observable product behavior:
//!
//! - service unreachable → error banner, annotation suppressed entirely;
//! - service reachable but misbehaving → warning banner plus a locally
//!   computed best-effort annotation;
//! - minor field gaps in an otherwise good payload → silently defaulted.

use std::sync::Arc;

use tracing::{debug, error, instrument, warn};

use chatlens_core::{
    defaults, Annotation, AnnotationBackend, RemoteAnnotation, RemoteTopic, Topic, Turn,
};

use crate::fallback::classify_fallback;

/// Substrings marking an error as connectivity-flavored: the service is
/// unreachable or absent rather than returning a substantive response.
const CONNECTIVITY_MARKERS: &[&str] = &["not running", "not found", "connection"];

/// Decides how much to trust each remote annotation outcome.
///
/// Holds the service handle resolved once at startup; `None` models a
/// handle that could not be resolved. `annotate` is total: every failure
/// class is converted to fields on the returned [`Annotation`].
pub struct AnnotationPipeline {
    remote: Option<Arc<dyn AnnotationBackend>>,
}

impl AnnotationPipeline {
    pub fn new(remote: Option<Arc<dyn AnnotationBackend>>) -> Self {
        Self { remote }
    }

    pub fn with_backend(remote: Arc<dyn AnnotationBackend>) -> Self {
        Self::new(Some(remote))
    }

    /// Pipeline whose service handle could not be resolved: every turn
    /// takes the hard-error path, and the fallback is deliberately unused.
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    pub fn has_backend(&self) -> bool {
        self.remote.is_some()
    }

    /// Produce the annotation for the newest user turn.
    #[instrument(skip(self, history), fields(subsystem = "inference", component = "reconciler", op = "annotate", history_len = history.len()))]
    pub async fn annotate(&self, history: &[Turn]) -> Annotation {
        let Some(remote) = &self.remote else {
            error!(outcome = "unavailable", "Annotation service handle not resolved");
            return Annotation::unavailable(defaults::ANNOTATION_UNAVAILABLE_MSG);
        };

        match remote.analyze(history).await {
            Err(e) => self.reconcile_call_error(history, &e.to_string()),
            Ok(payload) => match payload.error.clone() {
                Some(service_error) => {
                    self.reconcile_service_error(history, &service_error, payload.raw_output)
                }
                None => self.reconcile_payload(history, payload),
            },
        }
    }

    /// The call itself raised: transport failure, bad status, or an
    /// undecodable body. Connectivity-flavored messages (including
    /// timeouts) suppress annotation; anything else degrades to fallback.
    fn reconcile_call_error(&self, history: &[Turn], message: &str) -> Annotation {
        if is_connectivity_error(message, true) {
            error!(outcome = "unavailable", error = %message, "Annotation call failed");
            return Annotation::unavailable(defaults::ANNOTATION_UNAVAILABLE_MSG);
        }

        warn!(outcome = "fallback", error = %message, "Annotation call failed, using fallback");
        let analysis = classify_fallback(history);
        Annotation::degraded(
            analysis.expanded_query,
            analysis.topic,
            format!("Error calling annotation service: {}", message),
        )
    }

    /// The call succeeded but the service reported an error of its own.
    /// Timeout wording in a reported error is not a connectivity signal:
    /// the service was reachable enough to answer.
    fn reconcile_service_error(
        &self,
        history: &[Turn],
        service_error: &str,
        raw_output: Option<String>,
    ) -> Annotation {
        if is_connectivity_error(service_error, false) {
            error!(outcome = "unavailable", error = %service_error, "Service reports it is unavailable");
            return Annotation::unavailable(defaults::ANNOTATION_UNAVAILABLE_MSG);
        }

        warn!(outcome = "fallback", error = %service_error, "Service reported an error, using fallback");
        let analysis = classify_fallback(history);
        let mut annotation = Annotation::degraded(
            analysis.expanded_query,
            analysis.topic,
            format!("Annotation service error: {}", service_error),
        );
        if let Some(raw) = raw_output {
            annotation = annotation.with_raw_output(excerpt(&raw));
        }
        annotation
    }

    /// The call succeeded with a non-error payload. A payload with no
    /// recognizable annotation structure degrades to fallback; field gaps
    /// inside a recognizable one are silently defaulted.
    fn reconcile_payload(&self, history: &[Turn], payload: RemoteAnnotation) -> Annotation {
        let Some(labels) = payload.effective_labels() else {
            warn!(outcome = "fallback", "Payload has no recognizable annotation structure");
            let analysis = classify_fallback(history);
            return Annotation::degraded(
                analysis.expanded_query,
                analysis.topic,
                "Annotation service returned unexpected format",
            );
        };

        let expanded_query = match labels.expanded_query {
            Some(q) if !q.is_empty() => q,
            _ => {
                debug!(outcome = "defaulted", "Empty expansion, substituting latest content");
                history
                    .last()
                    .map(|turn| turn.content.clone())
                    .unwrap_or_default()
            }
        };

        let topic = resolve_topic(labels.topic);
        debug!(outcome = "clean", "Annotation reconciled");
        Annotation::clean(expanded_query, topic)
    }
}

/// Classify an error message as connectivity-flavored.
///
/// "timeout" counts only for raised call errors (`from_call`), never for
/// errors reported inside a service payload.
fn is_connectivity_error(message: &str, from_call: bool) -> bool {
    let lowered = message.to_lowercase();
    CONNECTIVITY_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
        || (from_call && lowered.contains("timeout"))
}

/// Default topic gaps: a missing or level_1-less topic becomes
/// General/Other wholesale; a missing level_2 under a usable level_1
/// becomes "Other" so the topic is never partially populated.
fn resolve_topic(remote: Option<RemoteTopic>) -> Topic {
    match remote {
        Some(topic) => match topic.level_1 {
            Some(level_1) if !level_1.is_empty() => {
                let level_2 = topic
                    .level_2
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| defaults::DEFAULT_TOPIC_SECONDARY.to_string());
                Topic::new(level_1, level_2)
            }
            _ => Topic::general_other(),
        },
        None => Topic::general_other(),
    }
}

/// First `RAW_OUTPUT_EXCERPT_CHARS` characters of a diagnostic blob.
fn excerpt(raw: &str) -> String {
    raw.chars().take(defaults::RAW_OUTPUT_EXCERPT_CHARS).collect()
}
