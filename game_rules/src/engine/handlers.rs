//! Per-action handlers. Each one reads the state, may mutate it, and
//! returns the [`Outcome`] the orchestrator applies.

use log::info;

use super::RulesEngine;
use crate::action::{contains_normalized, is_question};
use crate::error::{RulesError, RulesResult};
use crate::mechanics::{Difficulty, Skill, Status};
use crate::outcome::Outcome;
use crate::state::GameState;

/// Pick an item out of `items` for a possibly empty, loosely typed name.
///
/// An empty name only resolves when exactly one item is there.
pub(super) fn resolve_item_target<'s>(items: &'s [String], candidate: &str) -> Option<&'s String> {
    if candidate.is_empty() {
        return match items {
            [only] => Some(only),
            _ => None,
        };
    }
    items.iter().find(|item| contains_normalized(item, candidate))
}

pub(super) fn handle_wait() -> Outcome {
    Outcome::success("You pause, reassess your surroundings, and steady your focus.")
}

/// Free-form input has no rules effect; the narration layer answers it.
pub(super) fn handle_custom() -> Outcome {
    Outcome::success("")
}

impl RulesEngine<'_> {
    pub(super) fn handle_start(&self, state: &mut GameState) -> Outcome {
        state.is_first_turn = false;
        Outcome::success(self.config.intro_message.clone())
    }

    pub(super) fn handle_move(&self, state: &mut GameState, direction: &str) -> RulesResult<Outcome> {
        let room = self.config.require_room(&state.current_room)?;
        let Some(target) = room.exit(direction) else {
            return Ok(Outcome::fail(format!("No path leads {direction} from here.")));
        };
        let target = self.config.require_room(target)?;

        state.current_room = target.id.clone();
        state.visited_rooms.insert(target.id.clone());

        let message = match state.world_state.active_encounter(self.config, &target.id) {
            Some(encounter) => format!("You move {direction} and confront {}.", encounter.name),
            None => format!("You move {direction} and enter a new area."),
        };
        Ok(Outcome::success(message))
    }

    pub(super) fn handle_take(&self, state: &mut GameState, item: &str) -> RulesResult<Outcome> {
        let room_id = state.current_room.clone();
        let Some(target) =
            resolve_item_target(state.world_state.room_items(&room_id), item).cloned()
        else {
            return Ok(Outcome::fail("That item is not available here."));
        };

        let gate = self.config.quest_for_item(&target);
        if let Some(def) = gate {
            let quest = state
                .world_state
                .quests
                .get(&def.id)
                .ok_or_else(|| RulesError::UnknownQuest(def.id.clone()))?;
            if !quest.is_active() {
                return Ok(Outcome::fail(def.messages.not_active.clone()));
            }
            if !state.has_all(&def.required_items) {
                return Ok(Outcome::fail(def.messages.missing_items.clone()));
            }
            if let Some(encounter) = &def.required_encounter_defeated {
                if !state.world_state.is_encounter_defeated(encounter) {
                    return Ok(Outcome::fail(def.messages.encounter_standing.clone()));
                }
            }
        }

        let difficulty = if gate.is_some() {
            Difficulty::Hard
        } else {
            Difficulty::Normal
        };
        let check = self.check(
            state,
            Skill::Perception,
            self.config.difficulty.target(difficulty),
            &format!("{room_id}:{target}:take"),
        );
        if check.status == Status::Fail {
            return Ok(
                Outcome::fail(format!("You reach for the {target} but fail to secure it."))
                    .with_check(check),
            );
        }

        let items = state.world_state.room_items_mut(&room_id);
        if let Some(index) = items.iter().position(|i| *i == target) {
            items.remove(index);
        }
        Ok(Outcome::new(
            check.status,
            format!("You secure the {target} and add it to your inventory."),
        )
        .with_check(check)
        .with_added([target]))
    }

    pub(super) fn handle_investigate(&self, state: &GameState, raw: &str) -> Outcome {
        let room_id = &state.current_room;
        let check = self.check(
            state,
            Skill::Lore,
            self.config.difficulty.target(Difficulty::Easy),
            &format!("{room_id}:investigate:{raw}"),
        );
        if check.status == Status::Fail {
            return Outcome::fail("You scan the area but fail to uncover anything useful.")
                .with_check(check);
        }

        let world = &state.world_state;
        let quest_hint = match world.first_active_quest(self.config) {
            Some(quest) => format!("Active objective: {}.", quest.title),
            None => "No active objective remains.".to_string(),
        };
        let threat = match world.active_encounter(self.config, room_id) {
            Some(e) => format!(
                " Threat present: {} ({}/{} HP).",
                e.name,
                e.current_hp(),
                e.max_hp()
            ),
            None => String::new(),
        };
        Outcome::new(
            check.status,
            format!("You uncover useful clues. {quest_hint}{threat}"),
        )
        .with_check(check)
    }

    pub(super) fn handle_talk(&self, state: &mut GameState, raw: &str) -> RulesResult<Outcome> {
        let Some(npc_id) = self.npc_in_room(state, &state.current_room, raw) else {
            return Ok(Outcome::fail("No one here is available to speak with you."));
        };

        let check = self.check(
            state,
            Skill::Charisma,
            self.config.difficulty.target(Difficulty::Normal),
            &format!("{npc_id}:talk:{raw}"),
        );
        let trust_delta = match check.status {
            Status::Success => 2,
            Status::Partial => 1,
            Status::Fail => -1,
        };
        let resolving_turn = state.world_state.time.turn.saturating_add(1);

        let world = &mut state.world_state;
        let npc = world
            .npcs
            .get_mut(&npc_id)
            .ok_or_else(|| RulesError::UnknownNpc(npc_id.clone()))?;
        npc.adjust_trust(trust_delta);
        npc.remember(format!("Turn {resolving_turn}: {raw}"));
        let name = npc.name.clone();
        let faction = npc.faction.clone();
        world.adjust_faction(self.config, &faction, trust_delta);

        let mut outcome = Outcome::new(
            check.status,
            format!("{name} shares guidance about the path ahead."),
        )
        .with_check(check);

        if check.status == Status::Fail {
            return Ok(outcome);
        }
        let given = self.config.quests.iter().find(|def| {
            def.giver_npc.as_deref() == Some(npc_id.as_str())
                && world.quests.get(&def.id).is_some_and(|q| q.is_active())
        });
        if let Some(def) = given {
            self.complete_quest(state, &def.id, resolving_turn)?;
            let rewards = def
                .reward_items
                .iter()
                .filter(|item| !state.has_item(item))
                .cloned()
                .collect::<Vec<_>>();
            outcome = outcome.with_added(rewards);
            outcome.message = def.messages.completed.clone();
        }
        Ok(outcome)
    }

    pub(super) fn handle_use(&self, state: &GameState, item: &str) -> Outcome {
        let Some(item) = resolve_item_target(&state.inventory, item) else {
            return Outcome::fail("You do not have that item available.");
        };
        match self.config.item_use(item, &state.current_room) {
            Some(effect) => Outcome::new(effect.status, effect.message.clone()),
            None => Outcome::partial(format!(
                "You use the {item}, but it creates no immediate breakthrough."
            )),
        }
    }

    pub(super) fn handle_quest(&self, state: &mut GameState, target: &str) -> RulesResult<Outcome> {
        let Some(def) = self
            .config
            .quest(target)
            .filter(|def| def.claim_label.is_some())
        else {
            return Ok(Outcome::fail("That objective is not available."));
        };

        if state.current_room != def.room {
            return Ok(Outcome::fail(def.messages.wrong_room.clone()));
        }
        let quest = state
            .world_state
            .quests
            .get(&def.id)
            .ok_or_else(|| RulesError::UnknownQuest(def.id.clone()))?;
        if !quest.is_active() {
            return Ok(Outcome::fail(def.messages.not_active.clone()));
        }
        if let Some(encounter) = &def.required_encounter_defeated {
            if !state.world_state.is_encounter_defeated(encounter) {
                return Ok(Outcome::fail(def.messages.encounter_standing.clone()));
            }
        }
        if !state.has_all(&def.required_items) {
            return Ok(Outcome::fail(def.messages.missing_items.clone()));
        }

        let resolving_turn = state.world_state.time.turn.saturating_add(1);
        self.complete_quest(state, &def.id, resolving_turn)?;
        if def.ends_game {
            info!("quest {} ends the game", def.id);
        }
        Ok(Outcome::success(def.messages.completed.clone())
            .with_added(def.reward_items.iter().cloned())
            .ending_game(def.ends_game))
    }

    pub(super) fn handle_unknown(&self, state: &GameState, raw: &str) -> Outcome {
        if is_question(raw) {
            return Outcome::success("");
        }
        let check = self.check(
            state,
            Skill::Perception,
            self.config.difficulty.target(Difficulty::Normal),
            &format!("{}:improvise:{raw}", state.current_room),
        );
        Outcome::new(
            check.status,
            "You improvise and probe the environment for a useful opening.",
        )
        .with_check(check)
    }

    /// Id of the NPC addressed by `raw`, else the first one in the room.
    fn npc_in_room(&self, state: &GameState, room_id: &str, raw: &str) -> Option<String> {
        let present: Vec<_> = state.world_state.npcs_in_room(self.config, room_id).collect();
        present
            .iter()
            .find(|npc| contains_normalized(raw, &npc.name))
            .or_else(|| present.first())
            .map(|npc| npc.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_item_target() {
        let room = items(&["torch", "map"]);
        assert_eq!(resolve_item_target(&room, "torch").map(String::as_str), Some("torch"));
        assert_eq!(resolve_item_target(&room, "TORCH").map(String::as_str), Some("torch"));
        assert_eq!(resolve_item_target(&room, ""), None);
        assert_eq!(resolve_item_target(&room, "sword"), None);

        let single = items(&["amulet"]);
        assert_eq!(resolve_item_target(&single, "").map(String::as_str), Some("amulet"));

        let held = items(&["elder_seal"]);
        assert_eq!(resolve_item_target(&held, "elder").map(String::as_str), Some("elder_seal"));
    }

    #[test]
    fn test_npc_selection_prefers_named() {
        let config = WorldConfig::builtin();
        let engine = RulesEngine::new(&config);
        let state = GameState::new(&config);
        assert_eq!(
            engine.npc_in_room(&state, "start", "talk to anyone"),
            Some("village_elder".to_string())
        );
        assert_eq!(
            engine.npc_in_room(&state, "temple", "Talk to Temple Keeper"),
            Some("temple_keeper".to_string())
        );
        assert_eq!(engine.npc_in_room(&state, "meadow", "hello"), None);
    }

    #[test]
    fn test_move_without_exit_fails() {
        let config = WorldConfig::builtin();
        let engine = RulesEngine::new(&config);
        let mut state = GameState::new(&config);
        let outcome = engine.handle_move(&mut state, "up").unwrap();
        assert_eq!(outcome.status, Status::Fail);
        assert_eq!(outcome.message, "No path leads up from here.");
        assert_eq!(state.current_room, "start");
    }

    #[test]
    fn test_move_mentions_encounter() {
        let config = WorldConfig::builtin();
        let engine = RulesEngine::new(&config);
        let mut state = GameState::new(&config);
        let outcome = engine.handle_move(&mut state, "north").unwrap();
        assert_eq!(outcome.message, "You move north and confront Shadow Wolf.");
        assert!(state.visited_rooms.contains("forest"));

        let outcome = engine.handle_move(&mut state, "south").unwrap();
        assert_eq!(outcome.message, "You move south and enter a new area.");
    }

    #[test]
    fn test_use_default_and_configured_effects() {
        let config = WorldConfig::builtin();
        let engine = RulesEngine::new(&config);
        let mut state = GameState::new(&config);
        assert_eq!(engine.handle_use(&state, "seal").status, Status::Fail);

        state.inventory = items(&["elder_seal", "torch"]);
        let outcome = engine.handle_use(&state, "torch");
        assert_eq!(outcome.status, Status::Partial);
        assert_eq!(
            outcome.message,
            "You use the torch, but it creates no immediate breakthrough."
        );

        state.current_room = "temple".into();
        let outcome = engine.handle_use(&state, "elder");
        assert_eq!(outcome.status, Status::Success);
        assert!(outcome.message.starts_with("The Elder Seal resonates"));
    }

    #[test]
    fn test_quest_unknown_target() {
        let config = WorldConfig::builtin();
        let engine = RulesEngine::new(&config);
        let mut state = GameState::new(&config);
        let outcome = engine.handle_quest(&mut state, "prove_worth").unwrap();
        assert_eq!(outcome.message, "That objective is not available.");
        let outcome = engine.handle_quest(&mut state, "slay_dragon").unwrap();
        assert_eq!(outcome.status, Status::Fail);
    }

    #[test]
    fn test_claim_refusals_in_order() {
        let config = WorldConfig::builtin();
        let engine = RulesEngine::new(&config);
        let mut state = GameState::new(&config);

        let outcome = engine.handle_quest(&mut state, "claim_treasure").unwrap();
        assert_eq!(
            outcome.message,
            "The treasure can only be claimed in the treasure chamber."
        );

        state.current_room = "treasure".into();
        let outcome = engine.handle_quest(&mut state, "claim_treasure").unwrap();
        assert_eq!(outcome.message, "This quest is not yet active.");

        state.world_state.quests.get_mut("claim_treasure").unwrap().unlock(1);
        let outcome = engine.handle_quest(&mut state, "claim_treasure").unwrap();
        assert_eq!(outcome.message, "A sentinel still guards the vault. Defeat it first.");

        state
            .world_state
            .encounters
            .get_mut("treasure_sentinel")
            .unwrap()
            .mark_defeated();
        let outcome = engine.handle_quest(&mut state, "claim_treasure").unwrap();
        assert_eq!(
            outcome.message,
            "You are missing the required relics to claim the treasure."
        );
        assert!(!outcome.game_over);
    }

    #[test]
    fn test_question_fallback_has_no_check() {
        let config = WorldConfig::builtin();
        let engine = RulesEngine::new(&config);
        let state = GameState::new(&config);
        let outcome = engine.handle_unknown(&state, "the runes glow?");
        assert_eq!(outcome.status, Status::Success);
        assert!(outcome.message.is_empty());
        assert!(outcome.check.is_none());

        let outcome = engine.handle_unknown(&state, "dance wildly");
        assert!(outcome.check.is_some());
    }
}
