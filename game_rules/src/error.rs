//! Error types for the rules core.
//!
//! Only corrupted static data is an error here. Player mistakes are
//! reported through [`crate::Outcome`] with a failing status, and
//! malformed save documents are absorbed by normalization.

use thiserror::Error;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for turn resolution.
pub type RulesResult<T> = Result<T, RulesError>;

/// Problems found while loading or validating a world configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed into a world configuration.
    #[error("failed to parse world config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Action-count bounds are empty or inverted.
    #[error("invalid action count bounds: min {min}, max {max}")]
    ActionCountBounds { min: usize, max: usize },

    /// A numeric range has its minimum above its maximum.
    #[error("invalid bounds for {name}: min {min} exceeds max {max}")]
    InvertedBounds { name: &'static str, min: i32, max: i32 },

    /// The starting room does not exist.
    #[error("initial room \"{0}\" does not exist")]
    UnknownInitialRoom(String),

    /// A room exit leads nowhere.
    #[error("room \"{room}\" has invalid exit \"{target}\"")]
    InvalidExit { room: String, target: String },

    /// Something references a room that is not defined.
    #[error("{owner} references unknown room \"{room}\"")]
    UnknownRoom { owner: String, room: String },

    /// Something references a quest that is not defined.
    #[error("{owner} references unknown quest \"{quest}\"")]
    UnknownQuest { owner: String, quest: String },

    /// Something references an encounter that is not defined.
    #[error("{owner} references unknown encounter \"{encounter}\"")]
    UnknownEncounter { owner: String, encounter: String },

    /// Something references an NPC that is not defined.
    #[error("{owner} references unknown npc \"{npc}\"")]
    UnknownNpc { owner: String, npc: String },

    /// Something references a faction missing from the faction list.
    #[error("{owner} references unknown faction \"{faction}\"")]
    UnknownFaction { owner: String, faction: String },

    /// An encounter cannot be fought.
    #[error("encounter \"{0}\" has invalid max_hp")]
    InvalidMaxHp(String),

    /// Two definitions share an id.
    #[error("duplicate {kind} id \"{id}\"")]
    DuplicateId { kind: &'static str, id: String },

    /// The clock needs at least one phase.
    #[error("time_phases must not be empty")]
    NoTimePhases,
}

/// Integrity failures hit while resolving a turn.
///
/// These mean the static world data and the game state disagree about an
/// id. They are fatal for the session and should never be shown to the
/// player verbatim.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("unknown room id \"{0}\"")]
    UnknownRoom(String),

    #[error("unknown encounter id \"{0}\"")]
    UnknownEncounter(String),

    #[error("unknown quest id \"{0}\"")]
    UnknownQuest(String),

    #[error("unknown npc id \"{0}\"")]
    UnknownNpc(String),
}
