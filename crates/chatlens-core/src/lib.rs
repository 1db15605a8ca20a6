//! # chatlens-core
//!
//! Core types, traits, and abstractions for the chatlens conversational
//! front end.
//!
//! This crate provides the foundational data structures and trait
//! definitions that the other chatlens crates depend on: the conversation
//! data model, the remote annotation wire contract, backend traits, the
//! static topic taxonomy, and shared defaults.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod taxonomy;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{Annotation, RemoteAnnotation, RemoteLabels, RemoteTopic, Role, Topic, Turn};
pub use traits::{AnnotationBackend, ResponseBackend};
