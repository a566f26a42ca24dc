//! Narration settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NarrationError, NarrationResult};

/// Accepted range for `timeout_ms`.
pub const TIMEOUT_RANGE_MS: std::ops::RangeInclusive<u64> = 1_000..=300_000;

/// How the narration layer talks to its generator.
///
/// Every field has a default, so an empty TOML table is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationSettings {
    pub model: String,
    pub base_url: String,
    pub timeout_ms: u64,
    /// Total attempts per turn, including the first.
    pub max_attempts: u32,
    /// Conversation messages kept besides the system prompt.
    pub max_history_messages: usize,
    pub description_max_chars: usize,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for NarrationSettings {
    fn default() -> Self {
        Self {
            model: "qwen3-coder:30b".to_string(),
            base_url: "http://localhost:11434".to_string(),
            timeout_ms: 60_000,
            max_attempts: 2,
            max_history_messages: 40,
            description_max_chars: 500,
            temperature: 0.6,
            max_tokens: 900,
        }
    }
}

/// The per-call generator options taken from [`NarrationSettings`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl NarrationSettings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(text: &str) -> NarrationResult<Self> {
        let settings: NarrationSettings =
            toml::from_str(text).map_err(|err| NarrationError::InvalidSettings(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub fn validate(&self) -> NarrationResult<()> {
        let invalid = |msg: String| Err(NarrationError::InvalidSettings(msg));

        if self.model.trim().is_empty() {
            return invalid("model must not be empty".into());
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return invalid(format!("base_url \"{}\" must be an http(s) url", self.base_url));
        }
        if !TIMEOUT_RANGE_MS.contains(&self.timeout_ms) {
            return invalid(format!(
                "timeout_ms {} outside {}..={}",
                self.timeout_ms,
                TIMEOUT_RANGE_MS.start(),
                TIMEOUT_RANGE_MS.end()
            ));
        }
        if self.max_attempts == 0 {
            return invalid("max_attempts must be at least 1".into());
        }
        if self.max_history_messages == 0 {
            return invalid("max_history_messages must be at least 1".into());
        }
        if self.description_max_chars == 0 {
            return invalid("description_max_chars must be at least 1".into());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return invalid(format!("temperature {} outside 0..=2", self.temperature));
        }
        if self.max_tokens == 0 {
            return invalid("max_tokens must be at least 1".into());
        }
        Ok(())
    }
}
