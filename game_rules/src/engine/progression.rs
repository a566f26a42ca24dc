//! Quest progression: completion, unlocking, and the post-action hooks
//! that react to pickups, defeats and arrivals.

use log::info;

use super::RulesEngine;
use crate::action::{ActionKind, ParsedAction};
use crate::error::{RulesError, RulesResult};
use crate::outcome::Outcome;
use crate::state::GameState;

impl RulesEngine<'_> {
    /// Complete a quest and promote whatever it unlocks.
    ///
    /// Returns false when the quest was already completed.
    pub(super) fn complete_quest(
        &self,
        state: &mut GameState,
        quest_id: &str,
        turn: u32,
    ) -> RulesResult<bool> {
        let def = self.config.require_quest(quest_id)?;
        let quest = state
            .world_state
            .quests
            .get_mut(quest_id)
            .ok_or_else(|| RulesError::UnknownQuest(quest_id.to_string()))?;
        if !quest.complete(turn) {
            return Ok(false);
        }
        info!("quest {quest_id} completed on turn {turn}");

        if let Some(next) = &def.unlocks_when_completed {
            self.unlock_quest(state, next, turn)?;
        }
        Ok(true)
    }

    /// Promote a locked quest to active. Active and completed quests are left alone.
    pub(super) fn unlock_quest(
        &self,
        state: &mut GameState,
        quest_id: &str,
        turn: u32,
    ) -> RulesResult<()> {
        let quest = state
            .world_state
            .quests
            .get_mut(quest_id)
            .ok_or_else(|| RulesError::UnknownQuest(quest_id.to_string()))?;
        if quest.unlock(turn) {
            info!("quest {quest_id} unlocked on turn {turn}");
        }
        Ok(())
    }

    /// Runs after the clock ticks, so `turn` is the turn just resolved.
    pub(super) fn update_quest_progress(
        &self,
        state: &mut GameState,
        action: &ParsedAction,
        outcome: &Outcome,
    ) -> RulesResult<()> {
        let turn = state.world_state.time.turn;

        for def in &self.config.quests {
            let picked_up = def
                .item
                .as_ref()
                .is_some_and(|item| outcome.inventory_update.add.contains(item));
            if picked_up {
                self.complete_quest(state, &def.id, turn)?;
            }
        }

        if let Some(combat) = outcome.combat.as_ref().filter(|c| c.defeated) {
            for def in &self.config.quests {
                if def.required_encounter_defeated.as_deref() != Some(combat.encounter_id.as_str()) {
                    continue;
                }
                if let Some(floor) = def.progress_on_encounter_defeat {
                    raise_active(state, &def.id, floor);
                }
            }
        }

        if action.kind() == ActionKind::Move {
            for def in &self.config.quests {
                if def.room != state.current_room {
                    continue;
                }
                if let Some(floor) = def.progress_on_arrival {
                    raise_active(state, &def.id, floor);
                }
            }
        }

        Ok(())
    }
}

fn raise_active(state: &mut GameState, quest_id: &str, floor: u8) {
    if let Some(quest) = state.world_state.quests.get_mut(quest_id) {
        if quest.is_active() {
            quest.raise_progress(floor);
        }
    }
}
