//! Conversation template ingestion.
//!
//! Templates are line-delimited JSON: each non-blank line is one
//! `{"messages": [{"role", "content"}, ...]}` record. Loading a template
//! into a session seeds every message as a turn, except a trailing user
//! message, which becomes the pending suggestion instead.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use chatlens_core::{Error, Result, Role, Turn};

/// One message of a template record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateMessage {
    pub role: Role,
    pub content: String,
}

/// One template: a seed conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub messages: Vec<TemplateMessage>,
}

impl Template {
    /// Split into seed turns and a pending suggestion.
    ///
    /// A trailing user message becomes the suggestion; everything else
    /// becomes an unannotated turn in order.
    pub fn into_parts(self) -> (Vec<Turn>, Option<String>) {
        let mut messages = self.messages;

        let suggestion = match messages.last() {
            Some(message) if message.role == Role::User => {
                messages.pop().map(|message| message.content)
            }
            _ => None,
        };

        let turns = messages
            .into_iter()
            .map(|message| Turn::new(message.role, message.content))
            .collect();

        (turns, suggestion)
    }
}

/// Parse templates from JSONL text. Blank lines are skipped; a malformed
/// line fails the whole load.
pub fn parse_templates(input: &str) -> Result<Vec<Template>> {
    let mut templates = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let template: Template = serde_json::from_str(line)
            .map_err(|e| Error::Template(format!("line {}: {}", index + 1, e)))?;
        templates.push(template);
    }
    debug!(
        subsystem = "session",
        component = "templates",
        count = templates.len(),
        "Parsed templates"
    );
    Ok(templates)
}

/// Load templates from a JSONL file.
pub fn load_templates(path: &Path) -> Result<Vec<Template>> {
    let contents = fs::read_to_string(path)?;
    parse_templates(&contents)
}
