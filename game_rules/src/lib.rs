//! # Game Rules
//!
//! The deterministic rules core of the adventure. It owns the world
//! configuration, the game state and every rule that changes it: action
//! parsing, seeded skill checks, combat, quest and faction tracking and
//! pacing. It contains no narration or I/O; the narrative crate consumes
//! the [`TurnResult`] each call produces.
//!
//! ```
//! use game_rules::{RulesEngine, WorldConfig};
//!
//! let config = WorldConfig::builtin();
//! let engine = RulesEngine::new(&config);
//! let mut state = engine.new_game();
//! let turn = engine.resolve_turn(&mut state, "").unwrap();
//! assert_eq!(turn.turn, 1);
//! ```

pub mod action;
pub mod config;
pub mod director;
pub mod engine;
pub mod entities;
pub mod error;
pub mod mechanics;
pub mod outcome;
pub mod state;
pub mod world_state;

pub use action::{classify_action, parse_action, Action, ActionKind, ActionTag, ParsedAction, PlayerInput};
pub use config::WorldConfig;
pub use director::{Beat, Director, Style};
pub use engine::RulesEngine;
pub use entities::*;
pub use error::{ConfigError, ConfigResult, RulesError, RulesResult};
pub use mechanics::*;
pub use outcome::*;
pub use state::{create_initial_state, load_snapshot, normalize_state, GameState};
pub use world_state::*;
