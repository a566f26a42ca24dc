//! Pacing director - tension, narrative beat and style.
//!
//! Each turn the director moves tension by the action's base delta plus a
//! penalty for how badly the outcome went, then re-derives the beat from
//! tension thresholds and the style from the running action metrics.

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::config::Bounds;
use crate::mechanics::Status;
use crate::world_state::Metrics;

/// Narrative style the narration layer is asked to write in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Balanced,
    Grim,
    Heroic,
    Mystic,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Balanced, Style::Grim, Style::Heroic, Style::Mystic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Balanced => "balanced",
            Style::Grim => "grim",
            Style::Heroic => "heroic",
            Style::Mystic => "mystic",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

/// Current pacing label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Beat {
    #[default]
    Discovery,
    Threat,
    Setback,
    Recovery,
    Reveal,
}

impl Beat {
    pub const ALL: [Beat; 5] = [
        Beat::Discovery,
        Beat::Threat,
        Beat::Setback,
        Beat::Recovery,
        Beat::Reveal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Beat::Discovery => "discovery",
            Beat::Threat => "threat",
            Beat::Setback => "setback",
            Beat::Recovery => "recovery",
            Beat::Reveal => "reveal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == name)
    }

    /// Beat for a tension level.
    ///
    /// The ladder is not monotonic in intensity: `setback` sits between
    /// `discovery` and the `recovery` catch-all.
    pub fn for_tension(tension: i32) -> Self {
        match tension {
            t if t >= 80 => Beat::Reveal,
            t if t >= 60 => Beat::Threat,
            t if t >= 40 => Beat::Discovery,
            t if t >= 20 => Beat::Setback,
            _ => Beat::Recovery,
        }
    }
}

/// Tension threshold at or above which the style turns grim.
const GRIM_TENSION: i32 = 75;

/// Tension change caused by the action type alone.
pub fn base_delta(kind: ActionKind) -> i32 {
    match kind {
        ActionKind::Start => 0,
        ActionKind::Move => 4,
        ActionKind::Take => 3,
        ActionKind::Combat => 6,
        ActionKind::Investigate => 2,
        ActionKind::Talk => -2,
        ActionKind::Use => 2,
        ActionKind::Wait => -4,
        ActionKind::Quest => 8,
        ActionKind::Unknown => 1,
        ActionKind::Custom => 0,
    }
}

/// Extra tension from a bad outcome.
pub fn outcome_penalty(status: Status) -> i32 {
    match status {
        Status::Fail => 3,
        Status::Partial => 1,
        Status::Success => 0,
    }
}

/// Style implied by the running metrics and current tension.
pub fn select_style(metrics: &Metrics, tension: i32, default: Style) -> Style {
    let counts = &metrics.action_counts;
    if tension >= GRIM_TENSION || counts.combat > counts.talk {
        return Style::Grim;
    }
    let sum = |values: &[u32]| values.iter().copied().map(u64::from).sum::<u64>();
    if sum(&[counts.investigate, counts.talk]) > sum(&[counts.moves, counts.take, counts.combat]) {
        return Style::Mystic;
    }
    if metrics.checks.passed > metrics.checks.failed {
        return Style::Heroic;
    }
    default
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Director {
    pub style: Style,
    tension: i32,
    pub last_beat: Beat,
}

impl Director {
    pub fn new(style: Style, tension: i32) -> Self {
        Self {
            style,
            tension,
            last_beat: Beat::Discovery,
        }
    }

    pub fn tension(&self) -> i32 {
        self.tension
    }

    /// Set tension, clamped to `bounds`.
    pub fn set_tension(&mut self, tension: i32, bounds: Bounds) {
        self.tension = bounds.clamp(tension);
    }

    /// Advance the director by one resolved turn.
    pub fn advance(
        &mut self,
        kind: ActionKind,
        status: Status,
        metrics: &Metrics,
        bounds: Bounds,
        default_style: Style,
    ) {
        self.set_tension(self.tension + base_delta(kind) + outcome_penalty(status), bounds);
        self.last_beat = Beat::for_tension(self.tension);
        self.style = select_style(metrics, self.tension, default_style);
    }
}
