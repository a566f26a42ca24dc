//! Encounter entity - a hostile bound to a room.

use serde::{Deserialize, Serialize};

use crate::mechanics::Status;

/// How the last exchange with an encounter went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncounterOutcome {
    Success,
    Partial,
    Fail,
    Defeated,
}

impl From<Status> for EncounterOutcome {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => EncounterOutcome::Success,
            Status::Partial => EncounterOutcome::Partial,
            Status::Fail => EncounterOutcome::Fail,
        }
    }
}

/// Per-playthrough state of an encounter.
///
/// Hit points stay within `[0, max_hp]` and a defeated encounter stays
/// defeated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    pub id: String,
    pub room_id: String,
    pub name: String,
    max_hp: i32,
    current_hp: i32,
    defeated: bool,
    pub last_outcome: Option<EncounterOutcome>,
}

impl Encounter {
    pub fn new(
        id: impl Into<String>,
        room_id: impl Into<String>,
        name: impl Into<String>,
        max_hp: i32,
    ) -> Self {
        let max_hp = max_hp.max(0);
        Self {
            id: id.into(),
            room_id: room_id.into(),
            name: name.into(),
            max_hp,
            current_hp: max_hp,
            defeated: false,
            last_outcome: None,
        }
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn current_hp(&self) -> i32 {
        self.current_hp
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    /// Undefeated encounters in a room are the ones the player can fight.
    pub fn is_active_in(&self, room_id: &str) -> bool {
        !self.defeated && self.room_id == room_id
    }

    /// Apply damage and clamp. Returns true when this hit defeats it.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        self.current_hp = (self.current_hp - damage).clamp(0, self.max_hp);
        if self.current_hp == 0 && !self.defeated {
            self.defeated = true;
            self.last_outcome = Some(EncounterOutcome::Defeated);
            return true;
        }
        false
    }

    /// Set hit points directly, clamped to `[0, max_hp]`.
    pub fn set_current_hp(&mut self, hp: i32) {
        self.current_hp = hp.clamp(0, self.max_hp);
    }

    /// Mark defeated. There is no way back.
    pub fn mark_defeated(&mut self) {
        self.defeated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wolf() -> Encounter {
        Encounter::new("forest_wolf", "forest", "Shadow Wolf", 8)
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut e = wolf();
        assert!(!e.take_damage(5));
        assert_eq!(e.current_hp(), 3);
        assert!(e.take_damage(10));
        assert_eq!(e.current_hp(), 0);
        assert!(e.is_defeated());
        assert_eq!(e.last_outcome, Some(EncounterOutcome::Defeated));
    }

    #[test]
    fn test_defeat_reported_once() {
        let mut e = wolf();
        assert!(e.take_damage(8));
        assert!(!e.take_damage(1));
        assert!(e.is_defeated());
    }

    #[test]
    fn test_negative_damage_cannot_overheal() {
        let mut e = wolf();
        e.take_damage(-5);
        assert_eq!(e.current_hp(), 8);
    }

    #[test]
    fn test_active_in_room() {
        let mut e = wolf();
        assert!(e.is_active_in("forest"));
        assert!(!e.is_active_in("cave"));
        e.mark_defeated();
        assert!(!e.is_active_in("forest"));
    }
}
