//! The action menu offered after each turn.

use super::RulesEngine;
use crate::error::RulesResult;
use crate::state::GameState;

/// How many room items get a "Take" entry.
const TAKE_SUGGESTIONS: usize = 2;

/// Ordered, de-duplicated menu with a hard cap.
struct Menu {
    entries: Vec<String>,
    max: usize,
}

impl Menu {
    fn with_max(max: usize) -> Self {
        Self {
            entries: Vec::with_capacity(max),
            max,
        }
    }

    fn push(&mut self, label: impl Into<String>) {
        let label = label.into();
        if label.is_empty() || self.entries.len() >= self.max || self.entries.contains(&label) {
            return;
        }
        self.entries.push(label);
    }
}

impl RulesEngine<'_> {
    /// Menu for the player's current room.
    ///
    /// Exits come first, then combat, item pickups, one NPC, the special
    /// item and quest actions, and finally the generic actions, padded
    /// with numbered placeholders up to the minimum.
    pub(super) fn available_actions(&self, state: &GameState) -> RulesResult<Vec<String>> {
        let bounds = self.config.action_count;
        let room = self.config.require_room(&state.current_room)?;
        let world = &state.world_state;
        let encounter = world.active_encounter(self.config, &room.id);
        let mut menu = Menu::with_max(bounds.max);

        for exit in &room.exits {
            menu.push(format!("Go {}", exit.direction));
        }

        if let Some(encounter) = encounter {
            menu.push(format!("Attack {}", encounter.name));
            menu.push(format!("Defend against {}", encounter.name));
        }

        for item in world.room_items(&room.id).iter().take(TAKE_SUGGESTIONS) {
            menu.push(format!("Take {item}"));
        }

        if let Some(npc) = world.npcs_in_room(self.config, &room.id).next() {
            menu.push(format!("Talk to {}", npc.name));
        }

        for effect in &self.config.item_uses {
            if effect.room == room.id && state.has_item(&effect.item) {
                if let Some(label) = &effect.label {
                    menu.push(label.as_str());
                }
            }
        }

        if encounter.is_none() {
            for def in &self.config.quests {
                let claimable = def.room == room.id
                    && world.quests.get(&def.id).is_some_and(|q| q.is_active());
                if let (true, Some(label)) = (claimable, &def.claim_label) {
                    menu.push(label.as_str());
                }
            }
        }

        for label in &self.config.generic_actions {
            menu.push(label.as_str());
        }

        // Placeholder numbers already taken by other labels are skipped.
        let target = bounds.min.min(bounds.max);
        let mut placeholder = menu.entries.len() + 1;
        while menu.entries.len() < target {
            menu.push(format!("Review objective {placeholder}"));
            placeholder += 1;
        }

        Ok(menu.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ActionCountBounds, WorldConfig};

    #[test]
    fn test_start_room_menu() {
        let config = WorldConfig::builtin();
        let engine = RulesEngine::new(&config);
        let state = GameState::new(&config);
        let actions = engine.available_actions(&state).unwrap();
        assert_eq!(
            actions,
            vec!["Go north", "Go east", "Go south", "Take torch", "Take map", "Talk to Village Elder"]
        );
    }

    #[test]
    fn test_encounter_room_menu() {
        let config = WorldConfig::builtin();
        let engine = RulesEngine::new(&config);
        let mut state = GameState::new(&config);
        state.current_room = "temple".into();
        state.inventory.push("elder_seal".into());
        let actions = engine.available_actions(&state).unwrap();
        assert_eq!(
            actions,
            vec![
                "Go west",
                "Attack Runic Guardian",
                "Defend against Runic Guardian",
                "Take amulet",
                "Talk to Temple Keeper",
                "Use elder_seal at altar",
            ]
        );
    }

    #[test]
    fn test_claim_offered_once_vault_is_clear() {
        let config = WorldConfig::builtin();
        let engine = RulesEngine::new(&config);
        let mut state = GameState::new(&config);
        state.current_room = "treasure".into();
        state.world_state.room_items_mut("treasure").clear();
        state.world_state.quests.get_mut("claim_treasure").unwrap().unlock(1);

        let actions = engine.available_actions(&state).unwrap();
        assert!(!actions.iter().any(|a| a == "Claim the treasure"));

        state
            .world_state
            .encounters
            .get_mut("treasure_sentinel")
            .unwrap()
            .mark_defeated();
        let actions = engine.available_actions(&state).unwrap();
        assert_eq!(actions[0], "Go south");
        assert_eq!(actions[1], "Claim the treasure");
    }

    #[test]
    fn test_padding_reaches_minimum() {
        let mut config = WorldConfig::builtin();
        config.generic_actions.clear();
        config.action_count = ActionCountBounds { min: 4, max: 6 };
        let engine = RulesEngine::new(&config);
        let mut state = GameState::new(&config);
        state.current_room = "meadow".into();
        state.world_state.room_items_mut("meadow").clear();

        let actions = engine.available_actions(&state).unwrap();
        assert_eq!(
            actions,
            vec!["Go north", "Review objective 2", "Review objective 3", "Review objective 4"]
        );
    }

    #[test]
    fn test_padding_skips_taken_labels() {
        let mut config = WorldConfig::builtin();
        config.generic_actions = vec!["Review objective 3".into(), "Review objective 4".into()];
        config.action_count = ActionCountBounds { min: 5, max: 6 };
        let engine = RulesEngine::new(&config);
        let mut state = GameState::new(&config);
        state.current_room = "meadow".into();
        state.world_state.room_items_mut("meadow").clear();

        let actions = engine.available_actions(&state).unwrap();
        assert_eq!(
            actions,
            vec![
                "Go north",
                "Review objective 3",
                "Review objective 4",
                "Review objective 5",
                "Review objective 6",
            ]
        );
    }

    #[test]
    fn test_generic_actions_fill_quiet_rooms() {
        let config = WorldConfig::builtin();
        let engine = RulesEngine::new(&config);
        let mut state = GameState::new(&config);
        state.current_room = "meadow".into();
        let actions = engine.available_actions(&state).unwrap();
        assert_eq!(
            actions,
            vec![
                "Go north",
                "Take flower",
                "Take herbs",
                "Investigate surroundings",
                "Wait and assess",
                "Review objectives",
            ]
        );
    }
}
