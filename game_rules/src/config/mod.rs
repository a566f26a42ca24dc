//! World configuration - the immutable static data every turn reads.
//!
//! A [`WorldConfig`] is built once, validated, and then passed by reference
//! to every component. Nothing in the rules core mutates it.

mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::director::Style;
use crate::entities::QuestStatus;
use crate::error::{ConfigError, ConfigResult, RulesError, RulesResult};
use crate::mechanics::{Difficulty, Status};

/// A directed exit out of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitDef {
    pub direction: String,
    pub to: String,
}

/// A room as authored. Item presence during play lives in the game state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDef {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub exits: Vec<ExitDef>,
    #[serde(default)]
    pub items: Vec<String>,
}

impl RoomDef {
    /// Target room for `direction`, if there is an exit that way.
    pub fn exit(&self, direction: &str) -> Option<&str> {
        self.exits
            .iter()
            .find(|e| e.direction == direction)
            .map(|e| e.to.as_str())
    }
}

/// A quest and the data-driven rules that advance it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestDef {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Room where the quest is resolved.
    pub room: String,
    #[serde(default = "default_quest_status")]
    pub initial_status: QuestStatus,
    /// NPC whose conversation completes the quest when the check holds.
    #[serde(default)]
    pub giver_npc: Option<String>,
    /// Room item whose pickup is gated by this quest and completes it.
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub required_items: Vec<String>,
    #[serde(default)]
    pub required_encounter_defeated: Option<String>,
    #[serde(default)]
    pub reward_items: Vec<String>,
    /// Quest promoted from locked to active when this one completes.
    #[serde(default)]
    pub unlocks_when_completed: Option<String>,
    /// Progress floor applied when the required encounter falls.
    #[serde(default)]
    pub progress_on_encounter_defeat: Option<u8>,
    /// Progress floor applied when the player walks into the quest room.
    #[serde(default)]
    pub progress_on_arrival: Option<u8>,
    /// Menu label offered once the quest can be claimed in its room.
    #[serde(default)]
    pub claim_label: Option<String>,
    #[serde(default)]
    pub ends_game: bool,
    #[serde(default)]
    pub messages: QuestMessages,
}

fn default_quest_status() -> QuestStatus {
    QuestStatus::Locked
}

/// Player-facing text for a quest's refusals and its completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestMessages {
    pub wrong_room: String,
    pub not_active: String,
    pub encounter_standing: String,
    pub missing_items: String,
    pub completed: String,
}

impl Default for QuestMessages {
    fn default() -> Self {
        Self {
            wrong_room: "This objective cannot be resolved here.".into(),
            not_active: "This quest is not yet active.".into(),
            encounter_standing: "An enemy still stands in your way. Defeat it first.".into(),
            missing_items: "You are missing the items this objective requires.".into(),
            completed: "You complete the objective.".into(),
        }
    }
}

/// A hostile bound to a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterDef {
    pub id: String,
    pub room: String,
    pub name: String,
    pub difficulty: i32,
    pub max_hp: i32,
    #[serde(default)]
    pub drops: Vec<String>,
    /// Faction id -> reputation delta applied on defeat.
    #[serde(default)]
    pub faction_impact: BTreeMap<String, i32>,
}

/// A non-player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcDef {
    pub id: String,
    pub name: String,
    pub room: String,
    pub faction: String,
}

/// A location-specific effect of using a held item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemUseDef {
    pub item: String,
    pub room: String,
    pub status: Status,
    pub message: String,
    /// Menu label offered while the item is held in the room.
    #[serde(default)]
    pub label: Option<String>,
}

/// Player health bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: i32,
    pub initial_health: i32,
    pub min_health: i32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 20,
            initial_health: 20,
            min_health: 1,
        }
    }
}

/// Numeric targets for the named difficulty bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyBands {
    pub easy: i32,
    pub normal: i32,
    pub hard: i32,
}

impl Default for DifficultyBands {
    fn default() -> Self {
        Self {
            easy: 8,
            normal: 11,
            hard: 14,
        }
    }
}

impl DifficultyBands {
    pub fn target(&self, difficulty: Difficulty) -> i32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Damage the enemy deals back, by the player's check status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterDamage {
    pub success: i32,
    pub partial: i32,
    pub fail: i32,
}

impl Default for CounterDamage {
    fn default() -> Self {
        Self {
            success: 1,
            partial: 2,
            fail: 4,
        }
    }
}

impl CounterDamage {
    pub fn for_status(&self, status: Status) -> i32 {
        match status {
            Status::Success => self.success,
            Status::Partial => self.partial,
            Status::Fail => self.fail,
        }
    }
}

/// Combat damage table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub base_damage: i32,
    pub defend_damage: i32,
    pub critical_bonus: i32,
    pub counter_damage: CounterDamage,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            base_damage: 2,
            defend_damage: 1,
            critical_bonus: 2,
            counter_damage: CounterDamage::default(),
        }
    }
}

/// An inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: i32,
    pub max: i32,
}

impl Bounds {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

/// Tension range for the pacing director.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingTuning {
    pub min_tension: i32,
    pub max_tension: i32,
    pub initial_tension: i32,
}

impl Default for PacingTuning {
    fn default() -> Self {
        Self {
            min_tension: 0,
            max_tension: 100,
            initial_tension: 25,
        }
    }
}

impl PacingTuning {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.min_tension, self.max_tension)
    }
}

/// How many menu actions a turn offers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActionCountBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for ActionCountBounds {
    fn default() -> Self {
        Self { min: 4, max: 6 }
    }
}

fn default_faction_bounds() -> Bounds {
    Bounds::new(-100, 100)
}

fn default_initial_skill_score() -> i32 {
    2
}

fn default_time_phases() -> Vec<String> {
    ["dawn", "morning", "afternoon", "dusk", "night"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// The complete static description of a world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub initial_room: String,
    #[serde(default)]
    pub intro_message: String,
    #[serde(default)]
    pub generic_actions: Vec<String>,
    #[serde(default = "default_time_phases")]
    pub time_phases: Vec<String>,
    #[serde(default)]
    pub player: PlayerTuning,
    #[serde(default = "default_initial_skill_score")]
    pub initial_skill_score: i32,
    #[serde(default)]
    pub difficulty: DifficultyBands,
    #[serde(default)]
    pub combat: CombatTuning,
    #[serde(default)]
    pub factions: Vec<String>,
    #[serde(default = "default_faction_bounds")]
    pub faction_bounds: Bounds,
    #[serde(default)]
    pub pacing: PacingTuning,
    #[serde(default)]
    pub default_style: Style,
    #[serde(default)]
    pub action_count: ActionCountBounds,
    pub rooms: Vec<RoomDef>,
    #[serde(default)]
    pub quests: Vec<QuestDef>,
    #[serde(default)]
    pub encounters: Vec<EncounterDef>,
    #[serde(default)]
    pub npcs: Vec<NpcDef>,
    #[serde(default)]
    pub item_uses: Vec<ItemUseDef>,
}

impl WorldConfig {
    /// The shipped world: village, forest, cave, meadow, temple and vault.
    pub fn builtin() -> Self {
        builtin::world()
    }

    /// Parse and validate a world from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: WorldConfig = toml::from_str(text)?;
        config.validate()?;
        log::info!(
            "world config loaded: {} rooms, {} quests, {} encounters, {} npcs",
            config.rooms.len(),
            config.quests.len(),
            config.encounters.len(),
            config.npcs.len()
        );
        Ok(config)
    }

    pub fn room(&self, id: &str) -> Option<&RoomDef> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn require_room(&self, id: &str) -> RulesResult<&RoomDef> {
        self.room(id)
            .ok_or_else(|| RulesError::UnknownRoom(id.to_string()))
    }

    pub fn quest(&self, id: &str) -> Option<&QuestDef> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn require_quest(&self, id: &str) -> RulesResult<&QuestDef> {
        self.quest(id)
            .ok_or_else(|| RulesError::UnknownQuest(id.to_string()))
    }

    pub fn encounter(&self, id: &str) -> Option<&EncounterDef> {
        self.encounters.iter().find(|e| e.id == id)
    }

    pub fn require_encounter(&self, id: &str) -> RulesResult<&EncounterDef> {
        self.encounter(id)
            .ok_or_else(|| RulesError::UnknownEncounter(id.to_string()))
    }

    pub fn npc(&self, id: &str) -> Option<&NpcDef> {
        self.npcs.iter().find(|n| n.id == id)
    }

    /// Quest gated by picking up `item`, if any.
    pub fn quest_for_item(&self, item: &str) -> Option<&QuestDef> {
        self.quests.iter().find(|q| q.item.as_deref() == Some(item))
    }

    /// Location-specific use of `item` in `room`, if one is declared.
    pub fn item_use(&self, item: &str, room: &str) -> Option<&ItemUseDef> {
        self.item_uses
            .iter()
            .find(|u| u.item == item && u.room == room)
    }

    /// Health range the player is clamped into.
    pub fn health_bounds(&self, max_health: i32) -> Bounds {
        Bounds::new(self.player.min_health, max_health)
    }

    /// Clock phase for a turn number; phases cycle.
    pub fn phase_for_turn(&self, turn: u32) -> &str {
        if self.time_phases.is_empty() {
            return "";
        }
        &self.time_phases[turn as usize % self.time_phases.len()]
    }

    /// Check every internal reference and numeric range.
    pub fn validate(&self) -> ConfigResult<()> {
        let bounds = self.action_count;
        if bounds.min < 1 || bounds.min > bounds.max {
            return Err(ConfigError::ActionCountBounds {
                min: bounds.min,
                max: bounds.max,
            });
        }
        check_bounds("player health", self.player.min_health, self.player.max_health)?;
        check_bounds("faction", self.faction_bounds.min, self.faction_bounds.max)?;
        check_bounds("tension", self.pacing.min_tension, self.pacing.max_tension)?;
        if self.time_phases.is_empty() {
            return Err(ConfigError::NoTimePhases);
        }

        let room_ids = unique_ids("room", self.rooms.iter().map(|r| r.id.as_str()))?;
        let quest_ids = unique_ids("quest", self.quests.iter().map(|q| q.id.as_str()))?;
        let encounter_ids =
            unique_ids("encounter", self.encounters.iter().map(|e| e.id.as_str()))?;
        let npc_ids = unique_ids("npc", self.npcs.iter().map(|n| n.id.as_str()))?;
        let faction_ids: HashSet<&str> = self.factions.iter().map(String::as_str).collect();

        if !room_ids.contains(self.initial_room.as_str()) {
            return Err(ConfigError::UnknownInitialRoom(self.initial_room.clone()));
        }

        for room in &self.rooms {
            for exit in &room.exits {
                if !room_ids.contains(exit.to.as_str()) {
                    return Err(ConfigError::InvalidExit {
                        room: room.id.clone(),
                        target: exit.to.clone(),
                    });
                }
            }
        }

        for quest in &self.quests {
            let owner = || format!("quest \"{}\"", quest.id);
            if !room_ids.contains(quest.room.as_str()) {
                return Err(ConfigError::UnknownRoom {
                    owner: owner(),
                    room: quest.room.clone(),
                });
            }
            if let Some(next) = &quest.unlocks_when_completed {
                if !quest_ids.contains(next.as_str()) {
                    return Err(ConfigError::UnknownQuest {
                        owner: owner(),
                        quest: next.clone(),
                    });
                }
            }
            if let Some(encounter) = &quest.required_encounter_defeated {
                if !encounter_ids.contains(encounter.as_str()) {
                    return Err(ConfigError::UnknownEncounter {
                        owner: owner(),
                        encounter: encounter.clone(),
                    });
                }
            }
            if let Some(npc) = &quest.giver_npc {
                if !npc_ids.contains(npc.as_str()) {
                    return Err(ConfigError::UnknownNpc {
                        owner: owner(),
                        npc: npc.clone(),
                    });
                }
            }
        }

        for encounter in &self.encounters {
            let owner = || format!("encounter \"{}\"", encounter.id);
            if !room_ids.contains(encounter.room.as_str()) {
                return Err(ConfigError::UnknownRoom {
                    owner: owner(),
                    room: encounter.room.clone(),
                });
            }
            if encounter.max_hp < 1 {
                return Err(ConfigError::InvalidMaxHp(encounter.id.clone()));
            }
            for faction in encounter.faction_impact.keys() {
                if !faction_ids.contains(faction.as_str()) {
                    return Err(ConfigError::UnknownFaction {
                        owner: owner(),
                        faction: faction.clone(),
                    });
                }
            }
        }

        for npc in &self.npcs {
            let owner = || format!("npc \"{}\"", npc.id);
            if !room_ids.contains(npc.room.as_str()) {
                return Err(ConfigError::UnknownRoom {
                    owner: owner(),
                    room: npc.room.clone(),
                });
            }
            if !faction_ids.contains(npc.faction.as_str()) {
                return Err(ConfigError::UnknownFaction {
                    owner: owner(),
                    faction: npc.faction.clone(),
                });
            }
        }

        for item_use in &self.item_uses {
            if !room_ids.contains(item_use.room.as_str()) {
                return Err(ConfigError::UnknownRoom {
                    owner: format!("item use \"{}\"", item_use.item),
                    room: item_use.room.clone(),
                });
            }
        }

        Ok(())
    }
}

fn check_bounds(name: &'static str, min: i32, max: i32) -> ConfigResult<()> {
    if min > max {
        return Err(ConfigError::InvertedBounds { name, min, max });
    }
    Ok(())
}

fn unique_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> ConfigResult<HashSet<&'a str>> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(seen)
}
