//! Rebuilding a valid [`GameState`] from a persisted document.
//!
//! Every field starts at its factory default and is overwritten only by a
//! document value of the right shape. Numbers are clamped through the
//! entity setters, ids unknown to the world config are dropped, and ids
//! missing from the document keep their defaults.

use log::warn;
use serde_json::{Map, Value};

use super::GameState;
use crate::config::WorldConfig;
use crate::director::{Beat, Style};
use crate::entities::{EncounterOutcome, QuestStatus};
use crate::mechanics::Skill;
use crate::world_state::{Metrics, WorldState};

/// Parse persisted JSON text. Text that is not JSON yields a new game.
pub fn load_snapshot(config: &WorldConfig, text: &str) -> GameState {
    match serde_json::from_str::<Value>(text) {
        Ok(document) => normalize_state(config, &document),
        Err(err) => {
            warn!("discarding unreadable save document: {err}");
            GameState::new(config)
        }
    }
}

/// Build a schema-valid state from a possibly partial document.
pub fn normalize_state(config: &WorldConfig, document: &Value) -> GameState {
    let mut state = GameState::new(config);
    let Some(doc) = document.as_object() else {
        warn!("save document is not an object, starting a new game");
        return state;
    };

    match doc.get("currentRoom").and_then(Value::as_str) {
        Some(room) if config.room(room).is_some() => state.current_room = room.to_string(),
        Some(room) => warn!("unknown current room {room:?}, resetting to {}", config.initial_room),
        None => {}
    }

    if let Some(items) = doc.get("inventory").and_then(Value::as_array) {
        state.inventory.clear();
        for item in items.iter().filter_map(Value::as_str) {
            if !state.has_item(item) {
                state.inventory.push(item.to_string());
            }
        }
    }

    if let Some(rooms) = doc.get("visitedRooms").and_then(Value::as_array) {
        state.visited_rooms = rooms
            .iter()
            .filter_map(Value::as_str)
            .filter(|room| config.room(room).is_some())
            .map(String::from)
            .collect();
    }
    state.visited_rooms.insert(state.current_room.clone());

    if let Some(moves) = doc.get("moves").and_then(as_integer) {
        state.moves = to_u32(moves);
    }
    if let Some(history) = doc.get("messageHistory").and_then(Value::as_array) {
        state.message_history = history.clone();
    }
    state.is_first_turn = match doc.get("isFirstTurn").and_then(Value::as_bool) {
        Some(first) => first,
        None => state.moves == 0,
    };

    if let Some(player) = doc.get("player").and_then(Value::as_object) {
        restore_player(config, &mut state, player);
    }
    if let Some(world) = doc.get("worldState").and_then(Value::as_object) {
        restore_world(config, &mut state.world_state, world);
    }

    state
}

fn restore_player(config: &WorldConfig, state: &mut GameState, doc: &Map<String, Value>) {
    let player = &mut state.player;
    if let Some(max) = doc.get("maxHealth").and_then(as_integer) {
        player.set_max_health(
            to_i32(max).clamp(config.player.min_health, config.player.max_health),
        );
    }
    let bounds = config.health_bounds(player.max_health());
    let health = doc
        .get("health")
        .and_then(as_integer)
        .map(to_i32)
        .unwrap_or(player.health());
    player.set_health(health, bounds);

    if let Some(skills) = doc.get("skills").and_then(Value::as_object) {
        for (name, score) in skills {
            match (Skill::from_name(name), as_integer(score)) {
                (Some(skill), Some(score)) => player.set_skill(skill, to_i32(score)),
                _ => warn!("dropping invalid skill entry {name:?}"),
            }
        }
    }
}

fn restore_world(config: &WorldConfig, world: &mut WorldState, doc: &Map<String, Value>) {
    if let Some(rooms) = doc.get("roomItems").and_then(Value::as_object) {
        for room in &config.rooms {
            if let Some(items) = rooms.get(&room.id).and_then(Value::as_array) {
                *world.room_items_mut(&room.id) = items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect();
            }
        }
    }

    if let Some(quests) = doc.get("quests").and_then(Value::as_object) {
        warn_unknown("quest", quests, |id| config.quest(id).is_some());
        for (id, quest) in world.quests.iter_mut() {
            let Some(saved) = quests.get(id).and_then(Value::as_object) else {
                continue;
            };
            let status = saved
                .get("status")
                .and_then(Value::as_str)
                .and_then(QuestStatus::from_name)
                .unwrap_or(quest.status());
            let progress = saved
                .get("progress")
                .and_then(as_integer)
                .unwrap_or(i64::from(quest.progress()));
            let updated = saved
                .get("updatedAtTurn")
                .and_then(as_integer)
                .map(to_u32)
                .unwrap_or(quest.updated_at_turn);
            quest.restore(status, progress, updated);
        }
    }

    if let Some(encounters) = doc.get("encounters").and_then(Value::as_object) {
        warn_unknown("encounter", encounters, |id| config.encounter(id).is_some());
        for (id, encounter) in world.encounters.iter_mut() {
            let Some(saved) = encounters.get(id).and_then(Value::as_object) else {
                continue;
            };
            if let Some(hp) = saved.get("currentHp").and_then(as_integer) {
                encounter.set_current_hp(to_i32(hp));
            }
            let defeated = saved.get("defeated").and_then(Value::as_bool) == Some(true);
            if defeated || encounter.current_hp() == 0 {
                encounter.set_current_hp(0);
                encounter.mark_defeated();
            }
            encounter.last_outcome = saved
                .get("lastOutcome")
                .and_then(|v| serde_json::from_value::<EncounterOutcome>(v.clone()).ok());
        }
    }

    if let Some(factions) = doc.get("factions").and_then(Value::as_object) {
        warn_unknown("faction", factions, |id| config.factions.iter().any(|f| f == id));
        for faction in &config.factions {
            if let Some(score) = factions.get(faction).and_then(as_integer) {
                world.factions.set(faction, to_i32(score), config.faction_bounds);
            }
        }
    }

    if let Some(npcs) = doc.get("npcs").and_then(Value::as_object) {
        warn_unknown("npc", npcs, |id| config.npc(id).is_some());
        for (id, npc) in world.npcs.iter_mut() {
            let Some(saved) = npcs.get(id).and_then(Value::as_object) else {
                continue;
            };
            if let Some(trust) = saved.get("trust").and_then(as_integer) {
                npc.set_trust(to_i32(trust));
            }
            if let Some(memory) = saved.get("memory").and_then(Value::as_array) {
                for entry in memory.iter().filter_map(Value::as_str) {
                    npc.remember(entry);
                }
            }
        }
    }

    if let Some(time) = doc.get("time").and_then(Value::as_object) {
        if let Some(turn) = time.get("turn").and_then(as_integer) {
            world.time.turn = to_u32(turn);
            world.time.phase = config.phase_for_turn(world.time.turn).to_string();
        }
    }

    if let Some(director) = doc.get("director").and_then(Value::as_object) {
        let current = &mut world.director;
        if let Some(style) = director.get("style").and_then(Value::as_str) {
            current.style = Style::from_name(style).unwrap_or(config.default_style);
        }
        if let Some(tension) = director.get("tension").and_then(as_integer) {
            current.set_tension(to_i32(tension), config.pacing.bounds());
        }
        if let Some(beat) = director.get("lastBeat").and_then(Value::as_str) {
            current.last_beat = Beat::from_name(beat).unwrap_or_default();
        }
    }

    if let Some(metrics) = doc.get("metrics").and_then(Value::as_object) {
        restore_metrics(&mut world.metrics, metrics);
    }
}

fn restore_metrics(metrics: &mut Metrics, doc: &Map<String, Value>) {
    if let Some(saved) = doc.get("actionCounts").and_then(Value::as_object) {
        let counts = &mut metrics.action_counts;
        restore_counters(
            "actionCounts",
            saved,
            [
                ("start", &mut counts.start),
                ("move", &mut counts.moves),
                ("take", &mut counts.take),
                ("investigate", &mut counts.investigate),
                ("talk", &mut counts.talk),
                ("combat", &mut counts.combat),
                ("use", &mut counts.uses),
                ("wait", &mut counts.wait),
                ("quest", &mut counts.quest),
                ("unknown", &mut counts.unknown),
                ("custom", &mut counts.custom),
            ],
        );
    }
    if let Some(saved) = doc.get("checks").and_then(Value::as_object) {
        let checks = &mut metrics.checks;
        restore_counters(
            "checks",
            saved,
            [
                ("passed", &mut checks.passed),
                ("partial", &mut checks.partial),
                ("failed", &mut checks.failed),
            ],
        );
    }
    restore_counters(
        "metrics",
        doc,
        [
            ("reputationChanges", &mut metrics.reputation_changes),
            ("questCompletions", &mut metrics.quest_completions),
            ("inventoryPeak", &mut metrics.inventory_peak),
            ("combatVictories", &mut metrics.combat_victories),
            ("damageDealt", &mut metrics.damage_dealt),
            ("damageTaken", &mut metrics.damage_taken),
        ],
    );
}

/// Overwrite each counter whose key holds a number; negatives become zero.
fn restore_counters<const N: usize>(
    section: &str,
    doc: &Map<String, Value>,
    fields: [(&str, &mut u32); N],
) {
    for (key, counter) in fields {
        let Some(value) = doc.get(key) else {
            continue;
        };
        match as_integer(value) {
            Some(count) => *counter = to_u32(count),
            None => warn!("keeping default for unreadable counter {section}.{key}"),
        }
    }
}

fn warn_unknown(kind: &str, saved: &Map<String, Value>, known: impl Fn(&str) -> bool) {
    for id in saved.keys().filter(|id| !known(id)) {
        warn!("dropping unknown {kind} {id:?} from save document");
    }
}

/// Whole-number view of a JSON number; fractional values are truncated.
fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
    })
}

fn to_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn to_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
