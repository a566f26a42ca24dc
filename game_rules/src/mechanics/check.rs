//! Deterministic d20 skill checks.
//!
//! Rolls are a pure function of a seed string and the turn/move counters,
//! so replaying a turn from the same state always reproduces the result.

use serde::{Deserialize, Serialize};

use super::{Skill, Status};

const HASH_INITIAL: u32 = 17;
const HASH_MULTIPLIER: u32 = 31;
const HASH_MODULUS: u32 = 1_000_003;
const DIE_SIDES: u32 = 20;

/// Roll a d20 from `seed:turn:moves`.
///
/// The input is folded through `hash = (hash * 31 + unit) mod 1_000_003`
/// over its UTF-16 code units, starting from 17.
pub fn roll(seed: &str, turn: u32, moves: u32) -> u32 {
    let input = format!("{seed}:{turn}:{moves}");
    let hash = input.encode_utf16().fold(HASH_INITIAL, |hash, unit| {
        (hash * HASH_MULTIPLIER + u32::from(unit)) % HASH_MODULUS
    });
    hash % DIE_SIDES + 1
}

/// The recorded result of a single skill check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub skill: Skill,
    pub roll: u32,
    pub total: i32,
    pub target: i32,
    pub status: Status,
}

/// Roll `skill` with the given score against `difficulty`.
pub fn run_check(
    skill: Skill,
    score: i32,
    difficulty: i32,
    seed: &str,
    turn: u32,
    moves: u32,
) -> CheckResult {
    let roll = roll(seed, turn, moves);
    // Die faces never exceed 20, the conversion cannot truncate.
    let total = roll as i32 + score;
    CheckResult {
        skill,
        roll,
        total,
        target: difficulty,
        status: Status::grade(total, difficulty),
    }
}
