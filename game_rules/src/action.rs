//! Player input parsing and action-label classification.
//!
//! Parsing is keyword based: the first matching rule wins, and anything
//! that looks like a question is handed to the narration layer as a
//! custom action.

use serde::{Deserialize, Serialize};

use crate::mechanics::CombatMode;
use crate::state::GameState;

/// What the player submitted.
///
/// Menu picks and typed commands go through the keyword rules. Free text
/// typed into the "ask the game master" prompt always becomes a custom
/// action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum PlayerInput {
    Command(String),
    FreeText(String),
}

impl PlayerInput {
    pub fn text(&self) -> &str {
        match self {
            PlayerInput::Command(text) | PlayerInput::FreeText(text) => text,
        }
    }
}

impl From<&str> for PlayerInput {
    fn from(text: &str) -> Self {
        PlayerInput::Command(text.to_string())
    }
}

impl From<String> for PlayerInput {
    fn from(text: String) -> Self {
        PlayerInput::Command(text)
    }
}

/// Fieldless action type, used for counters and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Start,
    Move,
    Take,
    Combat,
    Investigate,
    Talk,
    Use,
    Wait,
    Quest,
    Custom,
    Unknown,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Start => "start",
            ActionKind::Move => "move",
            ActionKind::Take => "take",
            ActionKind::Combat => "combat",
            ActionKind::Investigate => "investigate",
            ActionKind::Talk => "talk",
            ActionKind::Use => "use",
            ActionKind::Wait => "wait",
            ActionKind::Quest => "quest",
            ActionKind::Custom => "custom",
            ActionKind::Unknown => "unknown",
        }
    }
}

/// A typed player action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Start,
    Move { direction: String },
    Take { item: String },
    Combat { mode: CombatMode },
    Investigate,
    Talk,
    Use { item: String },
    Wait,
    Quest { target: String },
    Custom,
    Unknown,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Start => ActionKind::Start,
            Action::Move { .. } => ActionKind::Move,
            Action::Take { .. } => ActionKind::Take,
            Action::Combat { .. } => ActionKind::Combat,
            Action::Investigate => ActionKind::Investigate,
            Action::Talk => ActionKind::Talk,
            Action::Use { .. } => ActionKind::Use,
            Action::Wait => ActionKind::Wait,
            Action::Quest { .. } => ActionKind::Quest,
            Action::Custom => ActionKind::Custom,
            Action::Unknown => ActionKind::Unknown,
        }
    }
}

/// An action together with the trimmed text it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAction {
    #[serde(flatten)]
    pub action: Action,
    pub raw: String,
}

impl ParsedAction {
    pub fn kind(&self) -> ActionKind {
        self.action.kind()
    }
}

/// Raw text recorded for the opening turn.
pub const START_RAW: &str = "__start__";

const TAKE_VERBS: &[&str] = &["take", "pick up", "pickup", "grab"];
const ATTACK_VERBS: &[&str] = &["attack", "fight", "strike", "engage"];
const DEFEND_VERBS: &[&str] = &["defend", "brace", "guard", "block"];
const LOOK_VERBS: &[&str] = &["look", "investigate", "inspect", "search", "review"];
const TALK_VERBS: &[&str] = &["talk", "speak", "ask"];
const USE_VERBS: &[&str] = &["use", "offer"];
const WAIT_VERBS: &[&str] = &["wait", "rest", "pause"];
const QUESTION_WORDS: &[&str] = &[
    "who", "what", "where", "when", "why", "how", "can", "is", "are", "tell", "describe",
    "narrate",
];
const CLAIM_PHRASES: &[&str] = &["claim the treasure", "claim treasure"];
const CLAIM_TARGET: &str = "claim_treasure";

/// Lowercase, turn everything but ASCII letters and digits into spaces,
/// collapse whitespace.
pub fn normalize_text(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `haystack` contains `needle` once both are normalized.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize_text(haystack).contains(&normalize_text(needle))
}

/// If `text` opens with one of `verbs` as a whole word, the rest of it.
fn strip_verb<'a>(text: &'a str, verbs: &[&str]) -> Option<&'a str> {
    verbs.iter().find_map(|verb| {
        let rest = text.strip_prefix(verb)?;
        if rest.is_empty() || rest.starts_with(' ') {
            Some(rest.trim_start())
        } else {
            None
        }
    })
}

fn strip_article(text: &str) -> &str {
    match text.strip_prefix("the ") {
        Some(rest) => rest.trim_start(),
        None => text,
    }
}

/// Whether the text reads as a question to the game master.
pub fn is_question(raw: &str) -> bool {
    strip_verb(&normalize_text(raw), QUESTION_WORDS).is_some() || raw.trim_end().ends_with('?')
}

/// Turn player input into a typed action.
pub fn parse_action(input: &PlayerInput, state: &GameState) -> ParsedAction {
    if state.is_first_turn {
        return ParsedAction {
            action: Action::Start,
            raw: START_RAW.to_string(),
        };
    }

    let raw = input.text().trim().to_string();
    if let PlayerInput::FreeText(_) = input {
        return ParsedAction {
            action: Action::Custom,
            raw,
        };
    }

    let action = classify_command(&raw);
    log::debug!("parsed {raw:?} as {:?}", action.kind());
    ParsedAction { action, raw }
}

fn classify_command(raw: &str) -> Action {
    let normalized = normalize_text(raw);
    if normalized.is_empty() {
        return Action::Unknown;
    }

    if CLAIM_PHRASES.contains(&normalized.as_str()) {
        return Action::Quest {
            target: CLAIM_TARGET.to_string(),
        };
    }

    if let Some(rest) = normalized.strip_prefix("go ") {
        let direction = rest.split(' ').next().unwrap_or_default();
        return Action::Move {
            direction: direction.to_string(),
        };
    }

    if let Some(rest) = strip_verb(&normalized, TAKE_VERBS) {
        return Action::Take {
            item: strip_article(rest).to_string(),
        };
    }

    if strip_verb(&normalized, ATTACK_VERBS).is_some() {
        return Action::Combat {
            mode: CombatMode::Attack,
        };
    }

    if strip_verb(&normalized, DEFEND_VERBS).is_some() {
        return Action::Combat {
            mode: CombatMode::Defend,
        };
    }

    if strip_verb(&normalized, LOOK_VERBS).is_some() {
        return Action::Investigate;
    }

    if strip_verb(&normalized, TALK_VERBS).is_some() {
        return Action::Talk;
    }

    if let Some(rest) = strip_verb(&normalized, USE_VERBS) {
        let item = rest.split(' ').next().unwrap_or_default();
        return Action::Use {
            item: item.to_string(),
        };
    }

    if strip_verb(&normalized, WAIT_VERBS).is_some() {
        return Action::Wait;
    }

    if is_question(raw) {
        return Action::Custom;
    }

    Action::Unknown
}

/// Coarse display tag for a menu label. Has no effect on gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionTag {
    Move,
    Combat,
    Social,
    Look,
    Use,
    System,
    Custom,
    Action,
}

impl ActionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionTag::Move => "MOVE",
            ActionTag::Combat => "COMBAT",
            ActionTag::Social => "SOCIAL",
            ActionTag::Look => "LOOK",
            ActionTag::Use => "USE",
            ActionTag::System => "SYSTEM",
            ActionTag::Custom => "CUSTOM",
            ActionTag::Action => "ACTION",
        }
    }
}

impl std::fmt::Display for ActionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label of the free-text prompt entry in the action menu.
pub const FREE_TEXT_LABEL: &str = "Ask the Game Master...";

const SYSTEM_WORDS: &[&str] = &["menu", "back", "quit", "exit", "save", "help"];
const COMBAT_WORDS: &[&str] = &[
    "attack", "fight", "strike", "engage", "defend", "brace", "guard", "block",
];
const MOVE_WORDS: &[&str] = &[
    "go", "walk", "run", "head", "enter", "leave", "climb", "north", "south", "east", "west",
];
const SOCIAL_WORDS: &[&str] = &["talk", "speak", "ask", "greet", "offer"];
const LOOK_WORDS: &[&str] = &[
    "look", "investigate", "inspect", "search", "examine", "review", "read",
];
const USE_WORDS: &[&str] = &["use", "take", "grab", "pick", "pickup", "drink", "open", "claim"];

/// Tag a menu label for display.
pub fn classify_action(label: &str) -> ActionTag {
    if label.trim() == FREE_TEXT_LABEL {
        return ActionTag::Custom;
    }
    let normalized = normalize_text(label);
    let words: Vec<&str> = normalized.split(' ').collect();
    let has_any = |keywords: &[&str]| words.iter().any(|w| keywords.contains(w));

    if has_any(SYSTEM_WORDS) {
        ActionTag::System
    } else if has_any(COMBAT_WORDS) {
        ActionTag::Combat
    } else if has_any(MOVE_WORDS) {
        ActionTag::Move
    } else if has_any(SOCIAL_WORDS) {
        ActionTag::Social
    } else if has_any(LOOK_WORDS) {
        ActionTag::Look
    } else if has_any(USE_WORDS) {
        ActionTag::Use
    } else {
        ActionTag::Action
    }
}
