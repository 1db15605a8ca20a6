//! # chatlens-session
//!
//! Conversation state and turn processing for chatlens.
//!
//! A [`Session`] owns the ordered turn history, runs each submission
//! through the annotation pipeline, and appends the generated reply, or
//! a recorded error in its place. Templates seed a session with a prior
//! conversation and an optional pending suggestion.

pub mod conversation;
pub mod session;
pub mod templates;

pub use conversation::Conversation;
pub use session::{Exchange, Session};
pub use templates::{load_templates, parse_templates, Template, TemplateMessage};
