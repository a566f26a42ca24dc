//! What a turn produced: the handler outcome and the full turn summary
//! handed to the narration layer and the UI.

use serde::{Deserialize, Serialize};

use crate::action::ParsedAction;
use crate::director::Director;
use crate::mechanics::{CheckResult, Status};

/// Items to add to and then remove from the inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryUpdate {
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

impl InventoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Summary of one combat exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatReport {
    pub encounter_id: String,
    pub defeated: bool,
    pub damage_to_enemy: i32,
    pub counter_damage: i32,
    pub enemy_hp: i32,
    pub enemy_max_hp: i32,
}

/// Result of dispatching one action to its handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub status: Status,
    /// Deterministic message. Empty means the narration layer owns the text.
    pub message: String,
    pub check: Option<CheckResult>,
    pub inventory_update: InventoryUpdate,
    pub combat: Option<CombatReport>,
    pub game_over: bool,
}

impl Outcome {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            check: None,
            inventory_update: InventoryUpdate::default(),
            combat: None,
            game_over: false,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Status::Success, message)
    }

    pub fn partial(message: impl Into<String>) -> Self {
        Self::new(Status::Partial, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(Status::Fail, message)
    }

    pub fn with_check(mut self, check: CheckResult) -> Self {
        self.check = Some(check);
        self
    }

    pub fn with_added(mut self, items: impl IntoIterator<Item = String>) -> Self {
        self.inventory_update.add.extend(items);
        self
    }

    pub fn with_combat(mut self, report: CombatReport) -> Self {
        self.combat = Some(report);
        self
    }

    pub fn ending_game(mut self, game_over: bool) -> Self {
        self.game_over = game_over;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub health: i32,
    pub max_health: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSnapshot {
    pub id: String,
    pub name: String,
    pub current_hp: i32,
    pub max_hp: i32,
}

/// Everything downstream consumers need to know about a resolved turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResult {
    pub action: ParsedAction,
    pub outcome: Outcome,
    pub room: RoomSummary,
    pub items_here: Vec<String>,
    pub actions: Vec<String>,
    pub director: Director,
    pub game_over: bool,
    pub turn: u32,
    pub phase: String,
    pub player: HealthSnapshot,
    pub active_encounter: Option<EncounterSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_builders() {
        let outcome = Outcome::success("Found it.")
            .with_added(vec!["torch".to_string()])
            .ending_game(true);
        assert_eq!(outcome.status, Status::Success);
        assert_eq!(outcome.inventory_update.add, vec!["torch"]);
        assert!(outcome.inventory_update.remove.is_empty());
        assert!(outcome.game_over);
        assert!(outcome.check.is_none());
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let outcome = Outcome::fail("No path leads up from here.");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "fail");
        assert_eq!(json["gameOver"], false);
        assert!(json["inventoryUpdate"]["add"].as_array().unwrap().is_empty());
        assert!(json["combat"].is_null());
    }
}
