//! Combat resolution against the active encounter in the player's room.

use log::info;

use super::RulesEngine;
use crate::error::{RulesError, RulesResult};
use crate::mechanics::{counter_damage, player_damage, CombatMode, Status};
use crate::outcome::{CombatReport, Outcome};
use crate::state::GameState;

impl RulesEngine<'_> {
    pub(super) fn resolve_combat(
        &self,
        state: &mut GameState,
        mode: CombatMode,
    ) -> RulesResult<Outcome> {
        let Some(encounter_id) = state
            .world_state
            .active_encounter(self.config, &state.current_room)
            .map(|e| e.id.clone())
        else {
            return Ok(Outcome::fail("There is no immediate threat to fight here."));
        };
        let def = self.config.require_encounter(&encounter_id)?;

        let difficulty = match mode {
            CombatMode::Attack => def.difficulty,
            CombatMode::Defend => def.difficulty - 1,
        };
        let turn = state.world_state.time.turn;
        let check = self.check(
            state,
            mode.skill(),
            difficulty,
            &format!("{encounter_id}:{mode}:{turn}"),
        );
        let damage = player_damage(&self.config.combat, check.status, mode);

        let encounter = state
            .world_state
            .encounters
            .get_mut(&encounter_id)
            .ok_or_else(|| RulesError::UnknownEncounter(encounter_id.clone()))?;
        let defeated = encounter.take_damage(damage);
        let name = encounter.name.clone();
        let (enemy_hp, enemy_max_hp) = (encounter.current_hp(), encounter.max_hp());

        let mut counter = 0;
        let message = if defeated {
            info!("encounter {encounter_id} defeated on turn {}", turn.saturating_add(1));
            for (faction, delta) in &def.faction_impact {
                state.world_state.adjust_faction(self.config, faction, *delta);
            }
            format!("You defeat {name} and secure the area.")
        } else {
            encounter.last_outcome = Some(check.status.into());
            counter = counter_damage(&self.config.combat, check.status, mode);
            let bounds = self.config.health_bounds(state.player.max_health());
            let health = state.player.take_damage(counter, bounds);
            let barely = if health == self.config.player.min_health {
                " You are barely standing."
            } else {
                ""
            };
            format!(
                "You strike {name} for {damage} damage. It remains at \
                 {enemy_hp}/{enemy_max_hp} HP and counters for {counter}.{barely}"
            )
        };

        let status = if defeated { Status::Success } else { check.status };
        let drops = if defeated { def.drops.clone() } else { Vec::new() };
        Ok(Outcome::new(status, message)
            .with_check(check)
            .with_added(drops)
            .with_combat(CombatReport {
                encounter_id,
                defeated,
                damage_to_enemy: damage,
                counter_damage: counter,
                enemy_hp,
                enemy_max_hp,
            }))
    }
}
