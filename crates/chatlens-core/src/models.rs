//! Core data model for chatlens.
//!
//! A conversation is an ordered sequence of [`Turn`]s. Each user turn may
//! carry exactly one [`Annotation`]: the derived query expansion and topic
//! classification attached immediately after the turn is created. Assistant
//! turns never carry an annotation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;

// =============================================================================
// ROLE
// =============================================================================

/// Speaker role for a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Returns the wire-format string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Role::User)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// TOPIC
// =============================================================================

/// A fully-populated two-level topic classification.
///
/// A topic is never partially populated: both levels are present or the
/// annotation carries no topic at all (`Option<Topic>::None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Primary category (e.g. "Sports").
    pub level_1: String,
    /// Secondary category (e.g. "Football").
    pub level_2: String,
}

impl Topic {
    pub fn new(level_1: impl Into<String>, level_2: impl Into<String>) -> Self {
        Self {
            level_1: level_1.into(),
            level_2: level_2.into(),
        }
    }

    /// The default topic substituted when a payload lacks one.
    pub fn general_other() -> Self {
        Self::new(
            defaults::DEFAULT_TOPIC_PRIMARY,
            defaults::DEFAULT_TOPIC_SECONDARY,
        )
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} › {}", self.level_1, self.level_2)
    }
}

// =============================================================================
// ANNOTATION
// =============================================================================

/// Derived metadata attached to a user turn by the annotation pipeline.
///
/// Exactly one of three shapes per reconciliation outcome:
/// - hard error: `error` set, empty expansion, no topic;
/// - degraded: `warning` set, fallback-derived expansion and topic present;
/// - clean: expansion and topic present, no error or warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Context-resolved rewrite of the user message. Empty only in the
    /// hard-error case; the verbatim message in fallback mode.
    pub expanded_query: String,
    /// Two-level topic, or `None` when annotation was suppressed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
    /// Hard error: the remote service was unreachable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Soft degradation: the remote misbehaved and a fallback was used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Truncated diagnostic excerpt from the remote service, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
}

impl Annotation {
    /// Hard-error annotation: no expansion, no topic, error banner only.
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            expanded_query: String::new(),
            topic: None,
            error: Some(error.into()),
            warning: None,
            raw_output: None,
        }
    }

    /// Degraded annotation: fallback-derived values plus a warning.
    pub fn degraded(
        expanded_query: impl Into<String>,
        topic: Topic,
        warning: impl Into<String>,
    ) -> Self {
        Self {
            expanded_query: expanded_query.into(),
            topic: Some(topic),
            error: None,
            warning: Some(warning.into()),
            raw_output: None,
        }
    }

    /// Clean annotation from a trusted remote payload.
    pub fn clean(expanded_query: impl Into<String>, topic: Topic) -> Self {
        Self {
            expanded_query: expanded_query.into(),
            topic: Some(topic),
            error: None,
            warning: None,
            raw_output: None,
        }
    }

    /// Attach a truncated diagnostic excerpt.
    pub fn with_raw_output(mut self, raw_output: impl Into<String>) -> Self {
        self.raw_output = Some(raw_output.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}

// =============================================================================
// TURN
// =============================================================================

/// One message in a conversation, in arrival order.
///
/// Immutable once created, except for the one-time attachment of an
/// annotation to a user turn (enforced by the conversation owner).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Time-ordered turn identifier.
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Annotation>,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role,
            content: content.into(),
            created_at: Utc::now(),
            annotation: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

// =============================================================================
// REMOTE ANNOTATION CONTRACT
// =============================================================================

/// Topic block as returned by the remote annotation service.
///
/// Unlike [`Topic`], either level may be missing; the reconciler is
/// responsible for defaulting gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteTopic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_2: Option<String>,
}

/// Label block carrying the expansion and topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteLabels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<RemoteTopic>,
}

impl RemoteLabels {
    /// True when the block carries neither an expansion nor a topic.
    pub fn is_empty(&self) -> bool {
        self.expanded_query.is_none() && self.topic.is_none()
    }
}

/// Payload returned by the remote annotation service.
///
/// The service may nest the labels under `labels` or flatten them to the
/// top level, and may instead report a structured error. No fields beyond
/// these are contractually read; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<RemoteLabels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<RemoteTopic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
}

impl RemoteAnnotation {
    /// Resolve the effective label block.
    ///
    /// Prefers a non-empty nested `labels` block; falls back to the
    /// flattened top-level fields when a top-level `expanded_query` is
    /// present. `None` means the payload has no recognizable annotation
    /// structure.
    pub fn effective_labels(&self) -> Option<RemoteLabels> {
        match &self.labels {
            Some(labels) if !labels.is_empty() => Some(labels.clone()),
            _ => {
                if self.expanded_query.is_some() {
                    Some(RemoteLabels {
                        expanded_query: self.expanded_query.clone(),
                        topic: self.topic.clone(),
                    })
                } else {
                    None
                }
            }
        }
    }
}
