//! Conversation state.
//!
//! An ordered sequence of turns plus an optional pending suggestion,
//! owned by the session and alive only for the process lifetime. Turns
//! are immutable once created except for the one-time attachment of an
//! annotation to the newest user turn.

use chatlens_core::{Annotation, Error, Result, Role, Turn};

/// Ordered turn history for one session.
#[derive(Debug, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
    suggestion: Option<String>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn latest(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Append an already-built turn (template seeding).
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Append a new user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    /// Append a new assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    /// Attach an annotation to the newest turn.
    ///
    /// The newest turn must be an unannotated user turn: annotations are
    /// computed exactly once, immediately after the turn is created, and
    /// assistant turns never carry one.
    pub fn attach_annotation(&mut self, annotation: Annotation) -> Result<()> {
        let Some(turn) = self.turns.last_mut() else {
            return Err(Error::InvalidInput(
                "no turn to attach an annotation to".to_string(),
            ));
        };

        if turn.role != Role::User {
            return Err(Error::InvalidInput(
                "annotations attach only to user turns".to_string(),
            ));
        }

        if turn.annotation.is_some() {
            return Err(Error::InvalidInput(
                "turn already carries an annotation".to_string(),
            ));
        }

        turn.annotation = Some(annotation);
        Ok(())
    }

    /// Discard all turns and any pending suggestion.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.suggestion = None;
    }

    // ─── Pending suggestion ────────────────────────────────────────────

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn set_suggestion(&mut self, suggestion: Option<String>) {
        self.suggestion = suggestion;
    }

    /// Remove and return the pending suggestion.
    pub fn take_suggestion(&mut self) -> Option<String> {
        self.suggestion.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlens_core::Topic;

    #[test]
    fn test_new_conversation_is_empty() {
        let conversation = Conversation::new();
        assert!(conversation.is_empty());
        assert_eq!(conversation.len(), 0);
        assert!(conversation.latest().is_none());
        assert!(conversation.suggestion().is_none());
    }

    #[test]
    fn test_push_preserves_order() {
        let mut conversation = Conversation::new();
        conversation.push_user("first");
        conversation.push_assistant("second");
        conversation.push_user("third");

        let contents: Vec<_> = conversation
            .turns()
            .iter()
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_attach_annotation_to_user_turn() {
        let mut conversation = Conversation::new();
        conversation.push_user("tell me about cricket");

        let annotation = Annotation::clean("expanded", Topic::new("Sports", "Football"));
        conversation.attach_annotation(annotation).unwrap();

        assert!(conversation.latest().unwrap().annotation.is_some());
    }

    #[test]
    fn test_attach_annotation_requires_a_turn() {
        let mut conversation = Conversation::new();
        let err = conversation
            .attach_annotation(Annotation::clean("q", Topic::general_other()))
            .unwrap_err();
        assert!(err.to_string().contains("no turn"));
    }

    #[test]
    fn test_attach_annotation_rejects_assistant_turn() {
        let mut conversation = Conversation::new();
        conversation.push_assistant("hello");

        let err = conversation
            .attach_annotation(Annotation::clean("q", Topic::general_other()))
            .unwrap_err();
        assert!(err.to_string().contains("user turns"));
    }

    #[test]
    fn test_attach_annotation_is_one_time() {
        let mut conversation = Conversation::new();
        conversation.push_user("hi");

        conversation
            .attach_annotation(Annotation::clean("q", Topic::general_other()))
            .unwrap();
        let err = conversation
            .attach_annotation(Annotation::clean("q2", Topic::general_other()))
            .unwrap_err();
        assert!(err.to_string().contains("already"));
    }

    #[test]
    fn test_reset_discards_turns_and_suggestion() {
        let mut conversation = Conversation::new();
        conversation.push_user("hi");
        conversation.set_suggestion(Some("ask about cricket".to_string()));

        conversation.reset();
        assert!(conversation.is_empty());
        assert!(conversation.suggestion().is_none());
    }

    #[test]
    fn test_take_suggestion_clears_it() {
        let mut conversation = Conversation::new();
        conversation.set_suggestion(Some("ask me".to_string()));

        assert_eq!(conversation.take_suggestion().as_deref(), Some("ask me"));
        assert!(conversation.suggestion().is_none());
        assert!(conversation.take_suggestion().is_none());
    }
}
