//! Context Assembler - turns a committed turn into a narration request.
//!
//! The request carries everything the generator may describe and nothing
//! it may decide. It is built from a [`TurnResult`] alone, so a request
//! for an old turn can be rebuilt without touching the game state.

mod system_prompt;

pub use system_prompt::*;

use std::fmt::{self, Write};

use game_rules::{
    ActionKind, Beat, EncounterSnapshot, HealthSnapshot, RoomSummary, Status, Style, TurnResult,
    WorldConfig,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::settings::NarrationSettings;

/// Identifies one outbound narration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NarrationRequestId(pub Uuid);

impl NarrationRequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NarrationRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NarrationRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionContext {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeContext {
    pub status: Status,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorContext {
    pub style: Style,
    pub beat: Beat,
    pub tension: i32,
}

/// The outbound payload for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationRequest {
    pub id: NarrationRequestId,
    pub turn: u32,
    pub phase: String,
    pub room: RoomSummary,
    pub items_here: Vec<String>,
    pub action: ActionContext,
    pub outcome: OutcomeContext,
    pub actions: Vec<String>,
    pub player: HealthSnapshot,
    pub active_encounter: Option<EncounterSnapshot>,
    pub director: DirectorContext,
    pub game_over: bool,
}

/// Builds narration requests for one world.
#[derive(Debug, Clone)]
pub struct NarrationAssembler {
    system_prompt: String,
}

impl NarrationAssembler {
    pub fn new(config: &WorldConfig, settings: &NarrationSettings) -> Self {
        Self {
            system_prompt: system_prompt(config, settings.description_max_chars),
        }
    }

    /// The first message of every conversation.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Assemble a request with a fresh id.
    pub fn assemble(&self, turn: &TurnResult) -> NarrationRequest {
        NarrationRequest {
            id: NarrationRequestId::new(),
            turn: turn.turn,
            phase: turn.phase.clone(),
            room: turn.room.clone(),
            items_here: turn.items_here.clone(),
            action: ActionContext {
                kind: turn.action.kind(),
                raw: turn.action.raw.clone(),
            },
            outcome: OutcomeContext {
                status: turn.outcome.status,
                message: turn.outcome.message.clone(),
            },
            actions: turn.actions.clone(),
            player: turn.player,
            active_encounter: turn.active_encounter.clone(),
            director: DirectorContext {
                style: turn.director.style,
                beat: turn.director.last_beat,
                tension: turn.director.tension(),
            },
            game_over: turn.game_over,
        }
    }
}

impl NarrationRequest {
    /// Format the request as the user message for the generator.
    pub fn to_prompt_string(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str("## Current Turn\n");
        let _ = writeln!(prompt, "Turn {} ({})", self.turn, self.phase);
        prompt.push('\n');

        prompt.push_str("## Location\n");
        let _ = writeln!(prompt, "{}: {}", self.room.name, self.room.description);
        if self.items_here.is_empty() {
            prompt.push_str("Items here: none\n");
        } else {
            let _ = writeln!(prompt, "Items here: {}", self.items_here.join(", "));
        }
        prompt.push('\n');

        prompt.push_str("## Player Action\n");
        match self.action.kind {
            ActionKind::Start => prompt.push_str("The adventure begins.\n"),
            ActionKind::Custom => {
                let _ = writeln!(prompt, "Free-form: \"{}\"", self.action.raw);
            }
            kind => {
                let _ = writeln!(prompt, "{}: \"{}\"", kind.as_str(), self.action.raw);
            }
        }
        if self.outcome.message.is_empty() {
            let _ = writeln!(prompt, "Outcome: {}", self.outcome.status);
        } else {
            let _ = writeln!(
                prompt,
                "Outcome: {} - {}",
                self.outcome.status, self.outcome.message
            );
        }
        prompt.push('\n');

        prompt.push_str("## Player\n");
        let _ = writeln!(
            prompt,
            "Health: {}/{}",
            self.player.health, self.player.max_health
        );
        prompt.push('\n');

        if let Some(encounter) = &self.active_encounter {
            prompt.push_str("## Threat\n");
            let _ = writeln!(
                prompt,
                "{}: {}/{} HP",
                encounter.name, encounter.current_hp, encounter.max_hp
            );
            prompt.push('\n');
        }

        prompt.push_str("## Pacing\n");
        let _ = writeln!(
            prompt,
            "Style: {}, Beat: {}, Tension: {}",
            self.director.style.as_str(),
            self.director.beat.as_str(),
            self.director.tension
        );
        prompt.push('\n');

        if self.game_over {
            prompt.push_str("## Ending\nThe game is over. Close the story.\n\n");
        } else if !self.actions.is_empty() {
            prompt.push_str("## Available Actions\n");
            for action in &self.actions {
                let _ = writeln!(prompt, "- {action}");
            }
            prompt.push('\n');
        }

        prompt
    }

    /// True for the synthetic opening turn.
    pub fn is_opening(&self) -> bool {
        self.action.kind == ActionKind::Start
    }
}
