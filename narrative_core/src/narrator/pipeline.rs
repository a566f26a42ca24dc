//! Commit, persist, then narrate.
//!
//! Rules resolution runs exactly once per input. Narration happens after
//! the resolved state has been handed to the persistence callback, so a
//! narration failure can only cost prose, never progress.

use std::error::Error;

use game_rules::{GameState, PlayerInput, RulesEngine, TurnResult, WorldConfig};
use log::{debug, warn};
use serde_json::Value;

use super::{merge_message, Narration, NarrationResponse, Narrator};
use crate::context_assembler::{NarrationAssembler, NarrationRequest};
use crate::error::{NarrationError, NarrationResult, PipelineError};
use crate::history::{load_history, store_history, trim_history, ChatMessage, Role};
use crate::settings::{ChatOptions, NarrationSettings};

/// A committed turn, with or without its narration.
#[derive(Debug)]
pub enum NarratedTurn {
    Narrated {
        turn: TurnResult,
        narration: Narration,
    },
    /// Every attempt failed. The turn is committed; pass this value to
    /// [`TurnPipeline::retry_narration`] to try again under the same id.
    Unnarrated {
        turn: TurnResult,
        request: NarrationRequest,
        error: NarrationError,
    },
}

impl NarratedTurn {
    pub fn turn(&self) -> &TurnResult {
        match self {
            NarratedTurn::Narrated { turn, .. } | NarratedTurn::Unnarrated { turn, .. } => turn,
        }
    }

    pub fn is_narrated(&self) -> bool {
        matches!(self, NarratedTurn::Narrated { .. })
    }

    /// Scene text: the narrated description, or the authored room text.
    pub fn description(&self) -> &str {
        match self {
            NarratedTurn::Narrated { narration, .. } => &narration.description,
            NarratedTurn::Unnarrated { turn, .. } => &turn.room.description,
        }
    }

    /// Feedback line: the merged message, or the deterministic one.
    pub fn message(&self) -> &str {
        match self {
            NarratedTurn::Narrated { narration, .. } => &narration.message,
            NarratedTurn::Unnarrated { turn, .. } => &turn.outcome.message,
        }
    }
}

/// Drives one game: the rules engine plus an injected narrator.
pub struct TurnPipeline<'a, N> {
    engine: RulesEngine<'a>,
    assembler: NarrationAssembler,
    settings: NarrationSettings,
    options: ChatOptions,
    narrator: N,
}

impl<'a, N: Narrator> TurnPipeline<'a, N> {
    pub fn new(
        config: &'a WorldConfig,
        settings: NarrationSettings,
        narrator: N,
    ) -> NarrationResult<Self> {
        settings.validate()?;
        Ok(Self {
            engine: RulesEngine::new(config),
            assembler: NarrationAssembler::new(config, &settings),
            options: settings.chat_options(),
            settings,
            narrator,
        })
    }

    pub fn engine(&self) -> RulesEngine<'a> {
        self.engine
    }

    pub fn settings(&self) -> &NarrationSettings {
        &self.settings
    }

    pub fn narrator_mut(&mut self) -> &mut N {
        &mut self.narrator
    }

    /// Resolve `input`, persist the result, then narrate it.
    ///
    /// `Err` means the turn itself failed: either the rules core hit an
    /// integrity error or `persist` refused the new state. Narration
    /// failures come back as [`NarratedTurn::Unnarrated`]. On success the
    /// conversation in `state.message_history` is updated after `persist`
    /// ran, so it is saved with the next commit.
    pub fn play<F, E>(
        &mut self,
        state: &mut GameState,
        input: impl Into<PlayerInput>,
        persist: F,
    ) -> Result<NarratedTurn, PipelineError>
    where
        F: FnOnce(&GameState) -> Result<(), E>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let turn = self.engine.resolve_turn(state, input)?;
        persist(state).map_err(|err| PipelineError::Persist(err.into()))?;

        let request = self.assembler.assemble(&turn);
        Ok(self.narrate(&mut state.message_history, turn, request))
    }

    /// Narrate an already committed turn again.
    ///
    /// The rules engine is not consulted. A turn that is already narrated
    /// is returned unchanged.
    pub fn retry_narration(&mut self, state: &mut GameState, turn: NarratedTurn) -> NarratedTurn {
        match turn {
            NarratedTurn::Unnarrated { turn, request, .. } => {
                self.narrate(&mut state.message_history, turn, request)
            }
            narrated => narrated,
        }
    }

    fn narrate(
        &mut self,
        history: &mut Vec<Value>,
        turn: TurnResult,
        request: NarrationRequest,
    ) -> NarratedTurn {
        match self.narrate_request(history, &request) {
            Ok(response) => {
                let narration = Narration {
                    request_id: request.id,
                    description: response.description,
                    message: merge_message(&turn.outcome.message, &response.message),
                };
                NarratedTurn::Narrated { turn, narration }
            }
            Err(error) => NarratedTurn::Unnarrated {
                turn,
                request,
                error,
            },
        }
    }

    fn narrate_request(
        &mut self,
        history: &mut Vec<Value>,
        request: &NarrationRequest,
    ) -> NarrationResult<NarrationResponse> {
        let mut messages = load_history(history);
        if messages.first().map(|m| m.role) != Some(Role::System) {
            messages.insert(0, ChatMessage::system(self.assembler.system_prompt()));
        }
        let mut messages = trim_history(&messages, self.settings.max_history_messages);
        messages.push(ChatMessage::user(request.to_prompt_string()));

        let max_attempts = self.settings.max_attempts;
        let max_chars = self.settings.description_max_chars;
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = self
                .narrator
                .narrate(request.id, &messages, &self.options)
                .and_then(|reply| {
                    let response = NarrationResponse::parse(&reply, max_chars)?;
                    Ok((reply, response))
                });

            match result {
                Ok((reply, response)) => {
                    debug!(
                        "narrated turn {} (request {}) on attempt {attempt}",
                        request.turn, request.id
                    );
                    messages.push(ChatMessage::assistant(reply));
                    store_history(history, &messages);
                    return Ok(response);
                }
                Err(err) => {
                    warn!(
                        "narration attempt {attempt}/{max_attempts} for turn {} (request {}) failed: {err}",
                        request.turn, request.id
                    );
                    if !err.is_retryable() || attempt >= max_attempts {
                        return Err(err);
                    }
                }
            }
        }
    }
}
