//! # chatlens-inference
//!
//! The chatlens turn annotation pipeline and inference backends.
//!
//! This crate provides:
//! - Remote annotation client for query expansion and topic tagging
//! - Deterministic keyword fallback classifier
//! - Annotation reconciler deciding between remote output, local
//!   fallback, and hard-error suppression
//! - Ollama-backed response generation
//! - Environment-driven configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chatlens_core::Turn;
//! use chatlens_inference::{AnnotationConfig, AnnotationPipeline, RemoteAnnotator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let remote = RemoteAnnotator::resolve(&AnnotationConfig::default())
//!         .map(|r| Arc::new(r) as Arc<dyn chatlens_core::AnnotationBackend>);
//!     let pipeline = AnnotationPipeline::new(remote);
//!     let annotation = pipeline.annotate(&[Turn::user("hello")]).await;
//!     println!("{:?}", annotation.topic);
//! }
//! ```

pub mod config;
pub mod fallback;
pub mod generation;
pub mod reconcile;
pub mod remote;

// Mock backends for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use chatlens_core::*;

pub use config::{AnnotationConfig, GenerationConfig, InferenceConfig};
pub use fallback::{classify_fallback, FallbackAnalysis};
pub use generation::OllamaResponder;
pub use reconcile::AnnotationPipeline;
pub use remote::RemoteAnnotator;
