//! Game state - the per-session aggregate root.
//!
//! A [`GameState`] is created once per new game, mutated in place by the
//! rules engine exactly once per resolved turn, and serialized between
//! turns. Loading goes through [`normalize_state`], which repairs partial
//! or stale documents instead of failing.

mod normalize;

pub use normalize::{load_snapshot, normalize_state};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::WorldConfig;
use crate::entities::Player;
use crate::outcome::InventoryUpdate;
use crate::world_state::WorldState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub current_room: String,
    /// Held items in pickup order, without duplicates.
    pub inventory: Vec<String>,
    pub visited_rooms: BTreeSet<String>,
    pub moves: u32,
    /// Conversation log owned by the narration layer; opaque here.
    pub message_history: Vec<serde_json::Value>,
    pub is_first_turn: bool,
    pub player: Player,
    pub world_state: WorldState,
}

impl GameState {
    /// Fresh state at the configured starting point.
    pub fn new(config: &WorldConfig) -> Self {
        let tuning = config.player;
        Self {
            current_room: config.initial_room.clone(),
            inventory: Vec::new(),
            visited_rooms: BTreeSet::from([config.initial_room.clone()]),
            moves: 0,
            message_history: Vec::new(),
            is_first_turn: true,
            player: Player::new(
                tuning.initial_health,
                tuning.max_health,
                config.initial_skill_score,
            ),
            world_state: WorldState::new(config),
        }
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|held| held == item)
    }

    pub fn has_all(&self, items: &[String]) -> bool {
        items.iter().all(|item| self.has_item(item))
    }

    /// Add new items, skipping ones already held, then drop the removals.
    pub fn apply_inventory_update(&mut self, update: &InventoryUpdate) {
        for item in &update.add {
            if !self.has_item(item) {
                self.inventory.push(item.clone());
            }
        }
        if !update.remove.is_empty() {
            self.inventory.retain(|item| !update.remove.contains(item));
        }
    }

    /// Serialize to the persisted JSON document.
    pub fn to_snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Factory for a new game.
pub fn create_initial_state(config: &WorldConfig) -> GameState {
    GameState::new(config)
}
