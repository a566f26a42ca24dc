//! Entities tracked per playthrough: the player, quests, encounters and NPCs.

mod encounter;
mod npc;
mod player;
mod quest;

pub use encounter::*;
pub use npc::*;
pub use player::*;
pub use quest::*;
