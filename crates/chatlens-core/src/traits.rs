//! Core traits for chatlens abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{RemoteAnnotation, Turn};

// =============================================================================
// ANNOTATION TRAITS
// =============================================================================

/// Backend for remote query expansion and topic classification.
///
/// A single call per invocation: the full ordered history is sent,
/// role-tagged and content-preserving, and either a structured payload or
/// an error comes back. Retry and backoff are explicitly out of scope.
#[async_trait]
pub trait AnnotationBackend: Send + Sync {
    /// Analyze the conversation and return the raw service payload.
    ///
    /// `Err` means the call itself failed (transport, decode, non-2xx).
    /// `Ok` payloads may still carry a service-reported `error` field;
    /// interpreting that is the reconciler's job, not this backend's.
    async fn analyze(&self, history: &[Turn]) -> Result<RemoteAnnotation>;

    /// Check if the backend is available and responding.
    async fn health_check(&self) -> Result<bool>;

    /// Human-readable name of the service.
    fn service_name(&self) -> &str;
}

// =============================================================================
// GENERATION TRAITS
// =============================================================================

/// Backend for generating the assistant reply.
#[async_trait]
pub trait ResponseBackend: Send + Sync {
    /// Generate a reply to the conversation so far.
    ///
    /// Only role and content are consumed; annotations are never sent.
    async fn respond(&self, history: &[Turn]) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Arc;

    struct StaticAnnotator;

    #[async_trait]
    impl AnnotationBackend for StaticAnnotator {
        async fn analyze(&self, _history: &[Turn]) -> Result<RemoteAnnotation> {
            Ok(RemoteAnnotation::default())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn service_name(&self) -> &str {
            "static"
        }
    }

    struct FailingResponder;

    #[async_trait]
    impl ResponseBackend for FailingResponder {
        async fn respond(&self, _history: &[Turn]) -> Result<String> {
            Err(Error::Generation("no model".to_string()))
        }

        fn model_name(&self) -> &str {
            "none"
        }
    }

    #[tokio::test]
    async fn test_annotation_backend_is_object_safe() {
        let backend: Arc<dyn AnnotationBackend> = Arc::new(StaticAnnotator);
        let payload = backend.analyze(&[]).await.unwrap();
        assert!(payload.effective_labels().is_none());
        assert!(backend.health_check().await.unwrap());
        assert_eq!(backend.service_name(), "static");
    }

    #[tokio::test]
    async fn test_response_backend_is_object_safe() {
        let backend: Arc<dyn ResponseBackend> = Arc::new(FailingResponder);
        let err = backend.respond(&[]).await.unwrap_err();
        assert!(err.to_string().contains("Generation error"));
    }
}
