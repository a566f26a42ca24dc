//! World state - the mutable per-playthrough bag beside the player.

mod metrics;

pub use metrics::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{Bounds, WorldConfig};
use crate::director::Director;
use crate::entities::{Encounter, Npc, Quest};

/// Turn counter and the derived time-of-day phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldClock {
    pub turn: u32,
    pub phase: String,
}

impl WorldClock {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            turn: 0,
            phase: config.phase_for_turn(0).to_string(),
        }
    }

    /// Advance one turn and recompute the phase.
    pub fn tick(&mut self, config: &WorldConfig) {
        self.turn = self.turn.saturating_add(1);
        self.phase = config.phase_for_turn(self.turn).to_string();
    }
}

/// Faction id -> reputation score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactionLedger(BTreeMap<String, i32>);

impl FactionLedger {
    pub fn new(config: &WorldConfig) -> Self {
        Self(config.factions.iter().map(|f| (f.clone(), 0)).collect())
    }

    pub fn score(&self, faction: &str) -> i32 {
        self.0.get(faction).copied().unwrap_or(0)
    }

    /// Shift a faction score, clamped to `bounds`. Returns the new score.
    pub fn adjust(&mut self, faction: &str, delta: i32, bounds: Bounds) -> i32 {
        let entry = self.0.entry(faction.to_string()).or_insert(0);
        *entry = bounds.clamp(*entry + delta);
        *entry
    }

    pub(crate) fn set(&mut self, faction: &str, score: i32, bounds: Bounds) {
        self.0.insert(faction.to_string(), bounds.clamp(score));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Everything about the world that changes during play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldState {
    /// Items still lying in each room.
    pub room_items: BTreeMap<String, Vec<String>>,
    pub quests: BTreeMap<String, Quest>,
    pub encounters: BTreeMap<String, Encounter>,
    pub factions: FactionLedger,
    pub npcs: BTreeMap<String, Npc>,
    pub time: WorldClock,
    pub director: Director,
    pub metrics: Metrics,
}

impl WorldState {
    /// Fresh world state with every entity at its configured default.
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            room_items: config
                .rooms
                .iter()
                .map(|r| (r.id.clone(), r.items.clone()))
                .collect(),
            quests: config
                .quests
                .iter()
                .map(|q| {
                    let quest = Quest::new(&q.id, &q.title, &q.description, q.initial_status);
                    (q.id.clone(), quest)
                })
                .collect(),
            encounters: config
                .encounters
                .iter()
                .map(|e| {
                    let encounter = Encounter::new(&e.id, &e.room, &e.name, e.max_hp);
                    (e.id.clone(), encounter)
                })
                .collect(),
            factions: FactionLedger::new(config),
            npcs: config
                .npcs
                .iter()
                .map(|n| (n.id.clone(), Npc::new(&n.id, &n.name, &n.room, &n.faction)))
                .collect(),
            time: WorldClock::new(config),
            director: Director::new(config.default_style, config.pacing.initial_tension),
            metrics: Metrics::default(),
        }
    }

    /// Items lying in a room, creating the list if it is missing.
    pub fn room_items_mut(&mut self, room_id: &str) -> &mut Vec<String> {
        self.room_items.entry(room_id.to_string()).or_default()
    }

    pub fn room_items(&self, room_id: &str) -> &[String] {
        self.room_items
            .get(room_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First undefeated encounter in a room, in config order.
    pub fn active_encounter<'a>(
        &'a self,
        config: &WorldConfig,
        room_id: &str,
    ) -> Option<&'a Encounter> {
        config
            .encounters
            .iter()
            .filter_map(|def| self.encounters.get(&def.id))
            .find(|e| e.is_active_in(room_id))
    }

    pub fn is_encounter_defeated(&self, encounter_id: &str) -> bool {
        self.encounters
            .get(encounter_id)
            .is_some_and(Encounter::is_defeated)
    }

    /// NPCs present in a room, in config order.
    pub fn npcs_in_room<'a>(
        &'a self,
        config: &'a WorldConfig,
        room_id: &'a str,
    ) -> impl Iterator<Item = &'a Npc> + 'a {
        config
            .npcs
            .iter()
            .filter_map(move |def| self.npcs.get(&def.id))
            .filter(move |npc| npc.room_id == room_id)
    }

    /// First active quest, in config order.
    pub fn first_active_quest<'a>(&'a self, config: &WorldConfig) -> Option<&'a Quest> {
        config
            .quests
            .iter()
            .filter_map(|def| self.quests.get(&def.id))
            .find(|q| q.is_active())
    }

    /// Adjust a faction score and count the reputation change.
    pub fn adjust_faction(&mut self, config: &WorldConfig, faction: &str, delta: i32) -> i32 {
        self.metrics.reputation_changes = self.metrics.reputation_changes.saturating_add(1);
        self.factions.adjust(faction, delta, config.faction_bounds)
    }
}
