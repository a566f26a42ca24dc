//! # Narrative Core
//!
//! The narration boundary of the adventure. This crate consumes the
//! committed [`game_rules::TurnResult`] of each turn and turns it into
//! prose through an injected [`Narrator`], without ever changing game
//! state.
//!
//! ## Core Components
//!
//! - **context_assembler**: Builds the outbound narration request and system prompt
//! - **narrator**: The generator trait, reply validation, and the turn pipeline
//! - **history**: The conversation stored opaquely in the game state
//! - **settings**: Generator settings loaded from TOML
//!
//! ## Design Philosophy
//!
//! - **Rules First**: The rules engine decides what happened; narration only describes it
//! - **Commit Before Narrate**: A failed narration never rolls back or re-runs a turn
//! - **Pluggable**: Any generator works behind the [`Narrator`] trait

pub mod context_assembler;
pub mod error;
pub mod history;
pub mod narrator;
pub mod settings;

pub use context_assembler::*;
pub use error::{NarrationError, NarrationResult, PipelineError};
pub use history::{load_history, store_history, trim_history, ChatMessage, Role};
pub use narrator::*;
pub use settings::{ChatOptions, NarrationSettings};
