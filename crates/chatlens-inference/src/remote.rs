//! Remote annotation service client.
//!
//! Wraps the single HTTP call that sends the full role-tagged conversation
//! history to the annotation service and returns its payload. No retries:
//! one call per invocation either produces a structured payload or an
//! error. Transport failures are normalized so the reconciler can classify
//! connectivity-flavored errors by message.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use chatlens_core::{AnnotationBackend, Error, RemoteAnnotation, Result, Turn};

use crate::config::AnnotationConfig;

/// Wall-clock threshold above which an analyze call is logged as slow.
const SLOW_ANALYZE_MS: u64 = 10_000;

/// HTTP client for the annotation service.
pub struct RemoteAnnotator {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl RemoteAnnotator {
    /// Create a client with default settings.
    pub fn new() -> Self {
        Self::with_config(&AnnotationConfig::default())
    }

    /// Create a client for the given configuration.
    pub fn with_config(config: &AnnotationConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        }
    }

    /// Resolve a service handle from configuration.
    ///
    /// Returns `None` when the configuration cannot back a usable handle
    /// (empty or non-HTTP URL). Resolution happens once per process; the
    /// handle is reused across turns and sessions, and a handle that later
    /// goes stale surfaces through the normal call-error path.
    pub fn resolve(config: &AnnotationConfig) -> Option<Self> {
        if !config.is_resolvable() {
            warn!(
                subsystem = "inference",
                component = "remote",
                base_url = %config.base_url,
                "Annotation service handle could not be resolved"
            );
            return None;
        }
        Some(Self::with_config(config))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for RemoteAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

/// One role-tagged message of the analyze request.
#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Request payload for the annotation service `/infer` endpoint.
#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    messages: Vec<WireMessage<'a>>,
}

impl<'a> AnalyzeRequest<'a> {
    fn from_history(history: &'a [Turn]) -> Self {
        Self {
            messages: history
                .iter()
                .map(|turn| WireMessage {
                    role: turn.role.as_str(),
                    content: &turn.content,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl AnnotationBackend for RemoteAnnotator {
    #[instrument(skip(self, history), fields(subsystem = "inference", component = "remote", op = "analyze", history_len = history.len()))]
    async fn analyze(&self, history: &[Turn]) -> Result<RemoteAnnotation> {
        let start = Instant::now();
        let request = AnalyzeRequest::from_history(history);

        let response = self
            .client
            .post(format!("{}/infer", self.base_url))
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Annotation(format!("annotation request timeout: {}", e))
                } else if e.is_connect() {
                    Error::Annotation(format!("connection to annotation service failed: {}", e))
                } else {
                    Error::Annotation(format!("request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Annotation(format!(
                "annotation service returned {}: {}",
                status, body
            )));
        }

        let payload: RemoteAnnotation = response
            .json()
            .await
            .map_err(|e| Error::Annotation(format!("failed to parse annotation response: {}", e)))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(duration_ms = elapsed, "Analyze complete");
        if elapsed > SLOW_ANALYZE_MS {
            warn!(duration_ms = elapsed, slow = true, "Slow analyze operation");
        }
        Ok(payload)
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/healthz", self.base_url))
            .send()
            .await;
        match response {
            Ok(r) => Ok(r.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn service_name(&self) -> &str {
        "annotation-service"
    }
}
