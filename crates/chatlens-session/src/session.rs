//! Turn processing orchestration.
//!
//! One submission at a time: append the user turn, annotate it (always,
//! and always before generation), then generate the assistant reply over
//! the full history. Failures never abort the sequence: a generation
//! error becomes the assistant turn's content, so the conversation log
//! keeps a visible entry for every attempted exchange.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument, warn};

use chatlens_core::{Annotation, ResponseBackend};
use chatlens_inference::AnnotationPipeline;

use crate::conversation::Conversation;
use crate::templates::Template;

/// Outcome of one submitted user turn, for rendering.
#[derive(Debug, Clone)]
pub struct Exchange {
    /// Annotation attached to the user turn.
    pub annotation: Annotation,
    /// Assistant reply, or the prefixed error text recorded in its place.
    pub reply: String,
    /// False when the reply is a recorded generation failure.
    pub reply_ok: bool,
}

/// One interactive conversation with its backends.
///
/// `&mut self` on [`Session::submit`] is the single-submission guarantee:
/// a new turn cannot start until the prior pipeline run has finished.
pub struct Session {
    conversation: Conversation,
    pipeline: AnnotationPipeline,
    responder: Arc<dyn ResponseBackend>,
}

impl Session {
    pub fn new(pipeline: AnnotationPipeline, responder: Arc<dyn ResponseBackend>) -> Self {
        Self {
            conversation: Conversation::new(),
            pipeline,
            responder,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Process one user submission end to end.
    #[instrument(skip(self, text), fields(subsystem = "session", component = "session", op = "submit"))]
    pub async fn submit(&mut self, text: impl Into<String>) -> Exchange {
        let start = Instant::now();
        self.conversation.push_user(text);

        // Annotation strictly precedes response generation.
        let annotation = self.pipeline.annotate(self.conversation.turns()).await;
        if let Err(e) = self.conversation.attach_annotation(annotation.clone()) {
            warn!(error = %e, "Failed to attach annotation");
        }

        let (reply, reply_ok) = match self.responder.respond(self.conversation.turns()).await {
            Ok(reply) => (reply, true),
            Err(e) => {
                warn!(error = %e, "Generation failed, recording error as reply");
                (format!("Error: {}", e), false)
            }
        };
        self.conversation.push_assistant(reply.clone());

        info!(
            turn_index = self.conversation.len() - 2,
            duration_ms = start.elapsed().as_millis() as u64,
            success = reply_ok,
            "Exchange complete"
        );

        Exchange {
            annotation,
            reply,
            reply_ok,
        }
    }

    /// Replace the conversation with a template's seed history; a
    /// trailing user message becomes the pending suggestion.
    pub fn load_template(&mut self, template: Template) {
        self.conversation.reset();
        let (turns, suggestion) = template.into_parts();
        for turn in turns {
            self.conversation.push(turn);
        }
        self.conversation.set_suggestion(suggestion);
        info!(
            subsystem = "session",
            turns = self.conversation.len(),
            has_suggestion = self.conversation.suggestion().is_some(),
            "Template loaded"
        );
    }

    /// Submit the pending suggestion, if any.
    pub async fn accept_suggestion(&mut self) -> Option<Exchange> {
        let text = self.conversation.take_suggestion()?;
        Some(self.submit(text).await)
    }

    /// Drop the pending suggestion without submitting it.
    pub fn dismiss_suggestion(&mut self) {
        self.conversation.set_suggestion(None);
    }

    /// Discard the whole conversation and any pending suggestion.
    pub fn reset(&mut self) {
        self.conversation.reset();
        info!(subsystem = "session", "Conversation reset");
    }
}
