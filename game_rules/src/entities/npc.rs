//! NPC entity with trust and a short interaction memory.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Trust runs from -10 (hostile) to 10 (devoted).
pub const TRUST_MIN: i32 = -10;
pub const TRUST_MAX: i32 = 10;

/// How many interactions an NPC remembers.
pub const MEMORY_CAPACITY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Npc {
    pub id: String,
    pub name: String,
    pub room_id: String,
    pub faction: String,
    trust: i32,
    memory: VecDeque<String>,
}

impl Npc {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        room_id: impl Into<String>,
        faction: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            room_id: room_id.into(),
            faction: faction.into(),
            trust: 0,
            memory: VecDeque::with_capacity(MEMORY_CAPACITY),
        }
    }

    pub fn trust(&self) -> i32 {
        self.trust
    }

    /// Shift trust, clamped to `[TRUST_MIN, TRUST_MAX]`.
    pub fn adjust_trust(&mut self, delta: i32) {
        self.trust = (self.trust + delta).clamp(TRUST_MIN, TRUST_MAX);
    }

    pub(crate) fn set_trust(&mut self, trust: i32) {
        self.trust = trust.clamp(TRUST_MIN, TRUST_MAX);
    }

    /// Record an interaction, evicting the oldest beyond capacity.
    pub fn remember(&mut self, entry: impl Into<String>) {
        self.memory.push_back(entry.into());
        while self.memory.len() > MEMORY_CAPACITY {
            self.memory.pop_front();
        }
    }

    /// Oldest first.
    pub fn memory(&self) -> impl Iterator<Item = &str> {
        self.memory.iter().map(String::as_str)
    }

    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }
}
