//! Quest progression entity.

use serde::{Deserialize, Serialize};

/// Lifecycle of a quest. Only ever advances locked -> active -> completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    Locked,
    Active,
    Completed,
}

impl QuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestStatus::Locked => "locked",
            QuestStatus::Active => "active",
            QuestStatus::Completed => "completed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "locked" => Some(QuestStatus::Locked),
            "active" => Some(QuestStatus::Active),
            "completed" => Some(QuestStatus::Completed),
            _ => None,
        }
    }
}

/// Progress is a percentage.
pub const PROGRESS_MAX: u8 = 100;

/// Minimum progress of a freshly unlocked quest.
pub const UNLOCK_PROGRESS_FLOOR: u8 = 10;

/// Per-playthrough state of a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    status: QuestStatus,
    progress: u8,
    pub updated_at_turn: u32,
}

impl Quest {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        status: QuestStatus,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            status,
            progress: 0,
            updated_at_turn: 0,
        }
    }

    pub fn status(&self) -> QuestStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_active(&self) -> bool {
        self.status == QuestStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == QuestStatus::Completed
    }

    /// Promote a locked quest to active. Returns whether anything changed.
    pub fn unlock(&mut self, turn: u32) -> bool {
        if self.status != QuestStatus::Locked {
            return false;
        }
        self.status = QuestStatus::Active;
        self.raise_progress(UNLOCK_PROGRESS_FLOOR);
        self.updated_at_turn = turn;
        true
    }

    /// Mark the quest completed. Returns whether anything changed.
    pub fn complete(&mut self, turn: u32) -> bool {
        if self.status == QuestStatus::Completed {
            return false;
        }
        self.status = QuestStatus::Completed;
        self.progress = PROGRESS_MAX;
        self.updated_at_turn = turn;
        true
    }

    /// Raise progress to at least `floor`, never lowering it.
    pub fn raise_progress(&mut self, floor: u8) {
        self.progress = self.progress.max(floor.min(PROGRESS_MAX));
    }

    /// Restore persisted status and progress, refusing to move a status backwards.
    pub(crate) fn restore(&mut self, status: QuestStatus, progress: i64, updated_at_turn: u32) {
        self.status = self.status.max(status);
        self.progress = progress.clamp(0, i64::from(PROGRESS_MAX)) as u8;
        if self.status == QuestStatus::Completed {
            self.progress = PROGRESS_MAX;
        }
        self.updated_at_turn = updated_at_turn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked() -> Quest {
        Quest::new("q", "Quest", "Do the thing", QuestStatus::Locked)
    }

    #[test]
    fn test_unlock_sets_floor() {
        let mut quest = locked();
        assert!(quest.unlock(3));
        assert_eq!(quest.status(), QuestStatus::Active);
        assert_eq!(quest.progress(), 10);
        assert_eq!(quest.updated_at_turn, 3);
    }

    #[test]
    fn test_unlock_only_from_locked() {
        let mut quest = locked();
        quest.complete(1);
        assert!(!quest.unlock(2));
        assert_eq!(quest.status(), QuestStatus::Completed);
    }

    #[test]
    fn test_complete_is_terminal() {
        let mut quest = locked();
        assert!(quest.complete(4));
        assert!(!quest.complete(5));
        assert_eq!(quest.progress(), 100);
        assert_eq!(quest.updated_at_turn, 4);
    }

    #[test]
    fn test_raise_progress_never_lowers() {
        let mut quest = locked();
        quest.raise_progress(70);
        quest.raise_progress(60);
        assert_eq!(quest.progress(), 70);
        quest.raise_progress(250);
        assert_eq!(quest.progress(), 100);
    }

    #[test]
    fn test_status_ordering_matches_lifecycle() {
        assert!(QuestStatus::Locked < QuestStatus::Active);
        assert!(QuestStatus::Active < QuestStatus::Completed);
    }
}
