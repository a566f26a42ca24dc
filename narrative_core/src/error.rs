//! Error types for the narration boundary.

use game_rules::RulesError;
use thiserror::Error;

/// Result type for narration operations.
pub type NarrationResult<T> = Result<T, NarrationError>;

/// Failures talking to, or understanding, the text generator.
///
/// None of these touch game state. A turn whose narration failed is
/// already committed and can be narrated again later.
#[derive(Debug, Error)]
pub enum NarrationError {
    /// The generator did not answer in time.
    #[error("narration timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    /// The generator could not be reached or refused the request.
    #[error("narrator unavailable: {0}")]
    Unavailable(String),

    /// The reply was not a JSON object.
    #[error("malformed narration reply: {0}")]
    Malformed(String),

    /// The reply lacked a required key or gave it the wrong type.
    #[error("narration reply is missing \"{0}\"")]
    MissingField(&'static str),

    /// Narration settings failed validation.
    #[error("invalid narration settings: {0}")]
    InvalidSettings(String),
}

impl NarrationError {
    /// Whether asking the generator again could succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, NarrationError::InvalidSettings(_))
    }
}

/// Failures of a full pipeline turn.
///
/// Narration failures are not here: they come back inside
/// [`crate::NarratedTurn::Unnarrated`] next to the committed turn.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The rules core rejected the turn; the state must be discarded.
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// The resolved state could not be persisted.
    #[error("failed to persist turn: {0}")]
    Persist(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(NarrationError::Timeout { after_ms: 60_000 }.is_retryable());
        assert!(NarrationError::Unavailable("connection refused".into()).is_retryable());
        assert!(NarrationError::Malformed("expected value".into()).is_retryable());
        assert!(NarrationError::MissingField("message").is_retryable());
        assert!(!NarrationError::InvalidSettings("timeout_ms".into()).is_retryable());
    }

    #[test]
    fn test_error_messages() {
        let err = NarrationError::MissingField("description");
        assert_eq!(err.to_string(), "narration reply is missing \"description\"");
        let err = PipelineError::from(RulesError::UnknownRoom("void".into()));
        assert_eq!(err.to_string(), "unknown room id \"void\"");
    }
}
