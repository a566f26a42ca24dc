//! The seam between the game and its text generator.
//!
//! A [`Narrator`] receives the full conversation and the configured
//! [`ChatOptions`] and returns the raw reply text. The implementor owns
//! the transport and must honor the options, including the timeout;
//! [`TurnPipeline`] handles validation, retries and history.

mod pipeline;
mod response;

pub use pipeline::*;
pub use response::*;

use serde::{Deserialize, Serialize};

use crate::context_assembler::NarrationRequestId;
use crate::error::NarrationResult;
use crate::history::ChatMessage;
use crate::settings::ChatOptions;

/// A text generator.
pub trait Narrator {
    /// Produce a reply to `messages`, the last of which is the turn prompt.
    ///
    /// Calls for the same turn share `request_id`. A call that exceeds
    /// `options.timeout` should fail with [`crate::NarrationError::Timeout`].
    fn narrate(
        &mut self,
        request_id: NarrationRequestId,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> NarrationResult<String>;
}

impl<N: Narrator + ?Sized> Narrator for &mut N {
    fn narrate(
        &mut self,
        request_id: NarrationRequestId,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> NarrationResult<String> {
        (**self).narrate(request_id, messages, options)
    }
}

impl<N: Narrator + ?Sized> Narrator for Box<N> {
    fn narrate(
        &mut self,
        request_id: NarrationRequestId,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> NarrationResult<String> {
        (**self).narrate(request_id, messages, options)
    }
}

/// Validated narration for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narration {
    pub request_id: NarrationRequestId,
    pub description: String,
    /// The deterministic message merged with the narrated one.
    pub message: String,
}
