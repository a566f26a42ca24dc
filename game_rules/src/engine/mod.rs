//! Turn orchestrator.
//!
//! [`RulesEngine::resolve_turn`] is the single entry point that mutates a
//! [`GameState`]. One call parses the input, dispatches it to a handler,
//! applies the inventory change, advances the clock, runs the quest
//! progression hooks, updates the director and metrics, and summarizes the
//! result. Nothing here performs I/O.

mod combat;
mod handlers;
mod menu;
mod progression;

use log::{debug, info};

use crate::action::{parse_action, Action, ActionKind, ParsedAction, PlayerInput};
use crate::config::WorldConfig;
use crate::error::RulesResult;
use crate::mechanics::{run_check, CheckResult, Skill, Status};
use crate::outcome::{EncounterSnapshot, HealthSnapshot, Outcome, RoomSummary, TurnResult};
use crate::state::GameState;

/// Resolves turns against one immutable world configuration.
#[derive(Debug, Clone, Copy)]
pub struct RulesEngine<'a> {
    config: &'a WorldConfig,
}

impl<'a> RulesEngine<'a> {
    pub fn new(config: &'a WorldConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a WorldConfig {
        self.config
    }

    /// A fresh game for this world.
    pub fn new_game(&self) -> GameState {
        GameState::new(self.config)
    }

    /// Resolve one player input, mutating `state` in place.
    ///
    /// Player mistakes come back as an `Ok` turn with a failing outcome.
    /// An `Err` means the world data and the state disagree about an id;
    /// the state may be partially updated and should be discarded.
    pub fn resolve_turn(
        &self,
        state: &mut GameState,
        input: impl Into<PlayerInput>,
    ) -> RulesResult<TurnResult> {
        let input = input.into();
        let action = parse_action(&input, state);
        let outcome = self.apply_action(&action, state)?;
        state.apply_inventory_update(&outcome.inventory_update);

        state.moves = state.moves.saturating_add(1);
        state.world_state.time.tick(self.config);

        self.update_quest_progress(state, &action, &outcome)?;
        self.update_director(state, action.kind(), &outcome);
        self.update_metrics(state, action.kind(), &outcome);

        debug!(
            "turn {} resolved {:?} as {}",
            state.world_state.time.turn,
            action.kind(),
            outcome.status
        );
        if outcome.game_over {
            info!("game over on turn {}", state.world_state.time.turn);
        }

        self.turn_result(state, action, outcome)
    }

    fn apply_action(&self, action: &ParsedAction, state: &mut GameState) -> RulesResult<Outcome> {
        let raw = action.raw.as_str();
        match &action.action {
            Action::Start => Ok(self.handle_start(state)),
            Action::Move { direction } => self.handle_move(state, direction),
            Action::Take { item } => self.handle_take(state, item),
            Action::Combat { mode } => self.resolve_combat(state, *mode),
            Action::Investigate => Ok(self.handle_investigate(state, raw)),
            Action::Talk => self.handle_talk(state, raw),
            Action::Use { item } => Ok(self.handle_use(state, item)),
            Action::Wait => Ok(handlers::handle_wait()),
            Action::Quest { target } => self.handle_quest(state, target),
            Action::Custom => Ok(handlers::handle_custom()),
            Action::Unknown => Ok(self.handle_unknown(state, raw)),
        }
    }

    /// Skill check using the player's score and the current counters.
    fn check(&self, state: &GameState, skill: Skill, difficulty: i32, seed: &str) -> CheckResult {
        run_check(
            skill,
            state.player.skill(skill),
            difficulty,
            seed,
            state.world_state.time.turn,
            state.moves,
        )
    }

    fn update_director(&self, state: &mut GameState, kind: ActionKind, outcome: &Outcome) {
        let world = &mut state.world_state;
        world.director.advance(
            kind,
            outcome.status,
            &world.metrics,
            self.config.pacing.bounds(),
            self.config.default_style,
        );
    }

    fn update_metrics(&self, state: &mut GameState, kind: ActionKind, outcome: &Outcome) {
        let held = u32::try_from(state.inventory.len()).unwrap_or(u32::MAX);
        let metrics = &mut state.world_state.metrics;
        metrics.action_counts.increment(kind);
        metrics.inventory_peak = metrics.inventory_peak.max(held);

        if let Some(check) = &outcome.check {
            metrics.checks.record(check.status);
        }
        if kind == ActionKind::Quest && outcome.status == Status::Success {
            metrics.quest_completions = metrics.quest_completions.saturating_add(1);
        }
        if let Some(combat) = &outcome.combat {
            metrics.damage_dealt = metrics
                .damage_dealt
                .saturating_add(combat.damage_to_enemy.unsigned_abs());
            metrics.damage_taken = metrics
                .damage_taken
                .saturating_add(combat.counter_damage.unsigned_abs());
            if combat.defeated {
                metrics.combat_victories = metrics.combat_victories.saturating_add(1);
            }
        }
    }

    fn turn_result(
        &self,
        state: &GameState,
        action: ParsedAction,
        outcome: Outcome,
    ) -> RulesResult<TurnResult> {
        let room = self.config.require_room(&state.current_room)?;
        let world = &state.world_state;
        let active_encounter = world
            .active_encounter(self.config, &room.id)
            .map(|e| EncounterSnapshot {
                id: e.id.clone(),
                name: e.name.clone(),
                current_hp: e.current_hp(),
                max_hp: e.max_hp(),
            });

        Ok(TurnResult {
            action,
            game_over: outcome.game_over,
            outcome,
            room: RoomSummary {
                id: room.id.clone(),
                name: room.name.clone(),
                description: room.description.clone(),
            },
            items_here: world.room_items(&room.id).to_vec(),
            actions: self.available_actions(state)?,
            director: world.director,
            turn: world.time.turn,
            phase: world.time.phase.clone(),
            player: HealthSnapshot {
                health: state.player.health(),
                max_health: state.player.max_health(),
            },
            active_encounter,
        })
    }
}
