//! Combat damage tables.

use super::{CombatMode, Status};
use crate::config::CombatTuning;

/// Damage the player deals in one exchange.
///
/// Starts from the mode's base damage; a partial adds one, a success adds
/// the critical bonus, a failure drops one but never below one.
pub fn player_damage(tuning: &CombatTuning, status: Status, mode: CombatMode) -> i32 {
    let base = match mode {
        CombatMode::Attack => tuning.base_damage,
        CombatMode::Defend => tuning.defend_damage,
    };
    match status {
        Status::Success => base + tuning.critical_bonus,
        Status::Partial => base + 1,
        Status::Fail => (base - 1).max(1),
    }
}

/// Damage a surviving enemy deals back. Defending softens it by one,
/// never below one.
pub fn counter_damage(tuning: &CombatTuning, status: Status, mode: CombatMode) -> i32 {
    let counter = tuning.counter_damage.for_status(status);
    match mode {
        CombatMode::Attack => counter,
        CombatMode::Defend => (counter - 1).max(1),
    }
}
