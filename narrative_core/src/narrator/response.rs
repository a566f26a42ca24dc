//! Validation of generator replies.

use serde_json::Value;

use crate::error::{NarrationError, NarrationResult};

/// The two fields read from a generator reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationResponse {
    pub description: String,
    /// Empty when the generator had nothing to add.
    pub message: String,
}

impl NarrationResponse {
    /// Parse a reply that must be a JSON object with `description` and
    /// `message` keys. `message` may be null.
    pub fn parse(reply: &str, description_max_chars: usize) -> NarrationResult<Self> {
        let value: Value = serde_json::from_str(reply.trim())
            .map_err(|err| NarrationError::Malformed(err.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| NarrationError::Malformed("reply is not a JSON object".into()))?;

        let description = object
            .get("description")
            .and_then(Value::as_str)
            .ok_or(NarrationError::MissingField("description"))?;
        let message = match object.get("message") {
            Some(Value::String(text)) => text.trim().to_string(),
            Some(Value::Null) => String::new(),
            _ => return Err(NarrationError::MissingField("message")),
        };

        Ok(Self {
            description: truncate_chars(description.trim(), description_max_chars),
            message,
        })
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].trim_end().to_string(),
        None => text.to_string(),
    }
}

/// Combine the rules engine's message with the narrated one.
///
/// The deterministic message is never replaced, only extended.
pub fn merge_message(deterministic: &str, narrated: &str) -> String {
    let deterministic = deterministic.trim();
    let narrated = narrated.trim();
    if deterministic.is_empty() {
        narrated.to_string()
    } else if narrated.is_empty() || narrated == deterministic {
        deterministic.to_string()
    } else {
        format!("{deterministic} {narrated}")
    }
}
