//! The standing instructions sent as the first message of every
//! conversation.

use std::fmt::Write;

use game_rules::WorldConfig;

/// One line per room: name, id, description, items and exits.
pub fn world_seed(config: &WorldConfig) -> String {
    let mut seed = String::new();
    for room in &config.rooms {
        let exits: Vec<String> = room
            .exits
            .iter()
            .map(|exit| format!("{}->{}", exit.direction, exit.to))
            .collect();
        let _ = writeln!(
            seed,
            "- {} ({}): {} [Items: {}] [Exits: {}]",
            room.name,
            room.id,
            room.description,
            room.items.join(", "),
            exits.join(", ")
        );
    }
    seed
}

/// System prompt for a world.
///
/// The generator only writes prose. Rooms, items, actions and the end of
/// the game come from the rules engine and are passed in each turn.
pub fn system_prompt(config: &WorldConfig, description_max_chars: usize) -> String {
    format!(
        r#"You are the Game Master for a fantasy text adventure game.

WORLD SEED (the only locations that exist):
{seed}
RULES:
1. Respond ONLY with valid JSON matching this schema:
{{
  "description": "string - scene description, 2-4 SHORT sentences, max {description_max_chars} chars",
  "message": "string or null - one line of feedback about the last action"
}}
2. Keep descriptions CONCISE. The display is a small terminal (80x24 chars).
3. Every turn states the resolved outcome. Narrate it faithfully; never invent items, exits, damage or quest progress.
4. Match the requested narrative style and beat.
5. When the turn says the game is over, give a closing description.
6. The player may type free-form text instead of choosing an action. Interpret their intent without changing the game state.
7. Never break character. Never include text outside the JSON."#,
        seed = world_seed(config),
    )
}
