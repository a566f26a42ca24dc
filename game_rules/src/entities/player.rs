//! The player character.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::Bounds;
use crate::mechanics::{Skill, SKILL_MAX, SKILL_MIN};

/// Health and skill scores of the player.
///
/// Health is kept inside the bounds handed to each mutator; skill scores
/// are always within `[SKILL_MIN, SKILL_MAX]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    health: i32,
    max_health: i32,
    skills: BTreeMap<Skill, i32>,
}

impl Player {
    /// Create a player with every skill at `initial_skill`.
    pub fn new(health: i32, max_health: i32, initial_skill: i32) -> Self {
        let skills = Skill::ALL
            .into_iter()
            .map(|s| (s, initial_skill.clamp(SKILL_MIN, SKILL_MAX)))
            .collect();
        Self {
            health: health.min(max_health),
            max_health,
            skills,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Set health, clamped to `bounds`.
    pub fn set_health(&mut self, health: i32, bounds: Bounds) {
        self.health = bounds.clamp(health);
    }

    /// Subtract damage, clamped to `bounds`. Returns the new health.
    pub fn take_damage(&mut self, damage: i32, bounds: Bounds) -> i32 {
        self.set_health(self.health - damage, bounds);
        self.health
    }

    pub(crate) fn set_max_health(&mut self, max_health: i32) {
        self.max_health = max_health;
    }

    /// Score for `skill`; missing entries read as the lowest score.
    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills.get(&skill).copied().unwrap_or(SKILL_MIN)
    }

    /// Set a skill score, clamped to `[SKILL_MIN, SKILL_MAX]`.
    pub fn set_skill(&mut self, skill: Skill, score: i32) {
        self.skills.insert(skill, score.clamp(SKILL_MIN, SKILL_MAX));
    }

    pub fn skills(&self) -> impl Iterator<Item = (Skill, i32)> + '_ {
        self.skills.iter().map(|(s, v)| (*s, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player() {
        let player = Player::new(20, 20, 2);
        assert_eq!(player.health(), 20);
        assert_eq!(player.max_health(), 20);
        for skill in Skill::ALL {
            assert_eq!(player.skill(skill), 2);
        }
    }

    #[test]
    fn test_damage_floors_at_min_health() {
        let mut player = Player::new(20, 20, 2);
        let bounds = Bounds::new(1, 20);
        assert_eq!(player.take_damage(4, bounds), 16);
        assert_eq!(player.take_damage(100, bounds), 1);
        assert_eq!(player.take_damage(-100, bounds), 20);
    }

    #[test]
    fn test_skill_clamped() {
        let mut player = Player::new(20, 20, 2);
        player.set_skill(Skill::Combat, 15);
        player.set_skill(Skill::Lore, -3);
        assert_eq!(player.skill(Skill::Combat), 10);
        assert_eq!(player.skill(Skill::Lore), 0);
    }

    #[test]
    fn test_skills_serialize_by_name() {
        let player = Player::new(18, 20, 3);
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["maxHealth"], 20);
        assert_eq!(json["skills"]["perception"], 3);
    }
}
