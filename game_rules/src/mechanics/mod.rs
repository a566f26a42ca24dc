//! Game mechanics: check statuses, skills, difficulty bands and combat modes.

mod check;
mod combat;

pub use check::*;
pub use combat::*;

use serde::{Deserialize, Serialize};

/// Result tier shared by skill checks and turn outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Partial,
    Fail,
}

impl Status {
    /// Grade a check total against a difficulty.
    ///
    /// Beating the difficulty by two or more is a success, meeting it is a
    /// partial, anything lower fails.
    pub fn grade(total: i32, difficulty: i32) -> Self {
        if total >= difficulty + 2 {
            Status::Success
        } else if total >= difficulty {
            Status::Partial
        } else {
            Status::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Partial => "partial",
            Status::Fail => "fail",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player skills. Scores live in `[SKILL_MIN, SKILL_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Combat,
    Lore,
    Stealth,
    Charisma,
    Perception,
}

/// Lowest possible skill score.
pub const SKILL_MIN: i32 = 0;
/// Highest possible skill score.
pub const SKILL_MAX: i32 = 10;

impl Skill {
    pub const ALL: [Skill; 5] = [
        Skill::Combat,
        Skill::Lore,
        Skill::Stealth,
        Skill::Charisma,
        Skill::Perception,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Combat => "combat",
            Skill::Lore => "lore",
            Skill::Stealth => "stealth",
            Skill::Charisma => "charisma",
            Skill::Perception => "perception",
        }
    }

    /// Look up a skill by its persisted name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named difficulty bands; the numeric targets come from the world config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

/// How the player engages an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatMode {
    Attack,
    Defend,
}

impl CombatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombatMode::Attack => "attack",
            CombatMode::Defend => "defend",
        }
    }

    /// The skill tested by this mode.
    pub fn skill(&self) -> Skill {
        match self {
            CombatMode::Attack => Skill::Combat,
            CombatMode::Defend => Skill::Stealth,
        }
    }
}

impl std::fmt::Display for CombatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_grading() {
        assert_eq!(Status::grade(13, 11), Status::Success);
        assert_eq!(Status::grade(12, 11), Status::Partial);
        assert_eq!(Status::grade(11, 11), Status::Partial);
        assert_eq!(Status::grade(10, 11), Status::Fail);
    }

    #[test]
    fn test_skill_names_round_trip() {
        for skill in Skill::ALL {
            assert_eq!(Skill::from_name(skill.as_str()), Some(skill));
        }
        assert_eq!(Skill::from_name("sorcery"), None);
    }

    #[test]
    fn test_combat_mode_skill() {
        assert_eq!(CombatMode::Attack.skill(), Skill::Combat);
        assert_eq!(CombatMode::Defend.skill(), Skill::Stealth);
    }
}
