//! Mock backends for deterministic testing.
//!
//! Scripted implementations of the annotation and generation traits with
//! call logging, so tests can assert both outcomes and interactions
//! without a live service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use chatlens_core::{AnnotationBackend, Error, RemoteAnnotation, ResponseBackend, Result, Turn};

// =============================================================================
// MOCK ANNOTATOR
// =============================================================================

#[derive(Debug, Clone)]
enum AnalyzeOutcome {
    Payload(RemoteAnnotation),
    CallError(String),
}

/// One logged analyze call.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Number of turns in the history the backend received.
    pub history_len: usize,
    /// Content of the latest turn, if any.
    pub latest: Option<String>,
}

/// Scripted annotation backend.
#[derive(Clone)]
pub struct MockAnnotator {
    outcome: AnalyzeOutcome,
    healthy: bool,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockAnnotator {
    /// Backend that answers every call with the given payload.
    pub fn with_payload(payload: RemoteAnnotation) -> Self {
        Self {
            outcome: AnalyzeOutcome::Payload(payload),
            healthy: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Backend that answers with the payload parsed from a JSON literal.
    ///
    /// Panics on malformed JSON. Test scripting only.
    pub fn with_payload_json(json: &str) -> Self {
        Self::with_payload(serde_json::from_str(json).expect("valid mock payload JSON"))
    }

    /// Backend whose every call raises the given error message.
    pub fn failing_with(message: impl Into<String>) -> Self {
        Self {
            outcome: AnalyzeOutcome::CallError(message.into()),
            healthy: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Override the health check result.
    pub fn with_health(mut self, healthy: bool) -> Self {
        self.healthy = healthy;
        self
    }

    /// All logged calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AnnotationBackend for MockAnnotator {
    async fn analyze(&self, history: &[Turn]) -> Result<RemoteAnnotation> {
        self.calls.lock().unwrap().push(MockCall {
            history_len: history.len(),
            latest: history.last().map(|turn| turn.content.clone()),
        });

        match &self.outcome {
            AnalyzeOutcome::Payload(payload) => Ok(payload.clone()),
            AnalyzeOutcome::CallError(message) => Err(Error::Annotation(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.healthy)
    }

    fn service_name(&self) -> &str {
        "mock-annotator"
    }
}

// =============================================================================
// MOCK RESPONDER
// =============================================================================

#[derive(Debug, Clone)]
enum RespondOutcome {
    Reply(String),
    Failure(String),
}

/// Scripted response generation backend.
///
/// Logs a full clone of every history it receives, so tests can assert
/// the exact turns (including attached annotations) seen at respond time.
#[derive(Clone)]
pub struct MockResponder {
    outcome: RespondOutcome,
    histories: Arc<Mutex<Vec<Vec<Turn>>>>,
}

impl MockResponder {
    /// Backend that answers every call with the given reply.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            outcome: RespondOutcome::Reply(reply.into()),
            histories: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Backend whose every call fails with the given message.
    pub fn failing_with(message: impl Into<String>) -> Self {
        Self {
            outcome: RespondOutcome::Failure(message.into()),
            histories: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Histories received per call, in order.
    pub fn histories(&self) -> Vec<Vec<Turn>> {
        self.histories.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.histories.lock().unwrap().len()
    }
}

#[async_trait]
impl ResponseBackend for MockResponder {
    async fn respond(&self, history: &[Turn]) -> Result<String> {
        self.histories.lock().unwrap().push(history.to_vec());

        match &self.outcome {
            RespondOutcome::Reply(reply) => Ok(reply.clone()),
            RespondOutcome::Failure(message) => Err(Error::Generation(message.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
