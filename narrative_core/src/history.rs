//! The narrator conversation.
//!
//! The rules core stores the conversation as opaque JSON values in
//! `GameState::message_history`; this module is the only code that reads
//! or writes them.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One message of the conversation sent to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    fn to_value(&self) -> Value {
        json!({ "role": self.role.as_str(), "content": self.content })
    }
}

/// Keep a leading system message plus the `max` most recent messages.
pub fn trim_history(messages: &[ChatMessage], max: usize) -> Vec<ChatMessage> {
    let (system, rest) = match messages.split_first() {
        Some((first, rest)) if first.role == Role::System => (Some(first), rest),
        _ => (None, messages),
    };
    let skip = rest.len().saturating_sub(max);
    system.into_iter().chain(&rest[skip..]).cloned().collect()
}

/// Decode a stored conversation, dropping entries that are not messages.
pub fn load_history(stored: &[Value]) -> Vec<ChatMessage> {
    let messages: Vec<ChatMessage> = stored
        .iter()
        .filter_map(|value| serde_json::from_value(value.clone()).ok())
        .collect();
    if messages.len() != stored.len() {
        warn!(
            "dropped {} malformed history entries",
            stored.len() - messages.len()
        );
    }
    messages
}

/// Replace a stored conversation with `messages`.
pub fn store_history(stored: &mut Vec<Value>, messages: &[ChatMessage]) {
    stored.clear();
    stored.extend(messages.iter().map(ChatMessage::to_value));
}
