//! Observational counters. Gameplay only reads the action counts, and only
//! to pick a director style.

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::mechanics::Status;

/// How many times each action type was resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionCounts {
    pub start: u32,
    #[serde(rename = "move")]
    pub moves: u32,
    pub take: u32,
    pub investigate: u32,
    pub talk: u32,
    pub combat: u32,
    #[serde(rename = "use")]
    pub uses: u32,
    pub wait: u32,
    pub quest: u32,
    pub unknown: u32,
    pub custom: u32,
}

impl ActionCounts {
    pub fn get(&self, kind: ActionKind) -> u32 {
        match kind {
            ActionKind::Start => self.start,
            ActionKind::Move => self.moves,
            ActionKind::Take => self.take,
            ActionKind::Investigate => self.investigate,
            ActionKind::Talk => self.talk,
            ActionKind::Combat => self.combat,
            ActionKind::Use => self.uses,
            ActionKind::Wait => self.wait,
            ActionKind::Quest => self.quest,
            ActionKind::Unknown => self.unknown,
            ActionKind::Custom => self.custom,
        }
    }

    pub fn increment(&mut self, kind: ActionKind) {
        let counter = match kind {
            ActionKind::Start => &mut self.start,
            ActionKind::Move => &mut self.moves,
            ActionKind::Take => &mut self.take,
            ActionKind::Investigate => &mut self.investigate,
            ActionKind::Talk => &mut self.talk,
            ActionKind::Combat => &mut self.combat,
            ActionKind::Use => &mut self.uses,
            ActionKind::Wait => &mut self.wait,
            ActionKind::Quest => &mut self.quest,
            ActionKind::Unknown => &mut self.unknown,
            ActionKind::Custom => &mut self.custom,
        };
        *counter = counter.saturating_add(1);
    }
}

/// Skill check tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckTally {
    pub passed: u32,
    pub partial: u32,
    pub failed: u32,
}

impl CheckTally {
    pub fn record(&mut self, status: Status) {
        let counter = match status {
            Status::Success => &mut self.passed,
            Status::Partial => &mut self.partial,
            Status::Fail => &mut self.failed,
        };
        *counter = counter.saturating_add(1);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metrics {
    pub action_counts: ActionCounts,
    pub checks: CheckTally,
    pub reputation_changes: u32,
    pub quest_completions: u32,
    pub inventory_peak: u32,
    pub combat_victories: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_and_get() {
        let mut counts = ActionCounts::default();
        counts.increment(ActionKind::Move);
        counts.increment(ActionKind::Move);
        counts.increment(ActionKind::Use);
        assert_eq!(counts.get(ActionKind::Move), 2);
        assert_eq!(counts.get(ActionKind::Use), 1);
        assert_eq!(counts.get(ActionKind::Talk), 0);
    }

    #[test]
    fn test_counts_serialize_with_action_names() {
        let mut counts = ActionCounts::default();
        counts.increment(ActionKind::Move);
        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json["move"], 1);
        assert_eq!(json["use"], 0);
    }

    #[test]
    fn test_check_tally() {
        let mut tally = CheckTally::default();
        tally.record(Status::Success);
        tally.record(Status::Fail);
        tally.record(Status::Fail);
        assert_eq!(tally, CheckTally { passed: 1, partial: 0, failed: 2 });
    }
}
