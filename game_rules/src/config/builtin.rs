//! The shipped world.

use std::collections::BTreeMap;

use super::*;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn room(id: &str, name: &str, description: &str, exits: &[(&str, &str)], items: &[&str]) -> RoomDef {
    RoomDef {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        exits: exits
            .iter()
            .map(|(direction, to)| ExitDef {
                direction: direction.to_string(),
                to: to.to_string(),
            })
            .collect(),
        items: strings(items),
    }
}

fn encounter(
    id: &str,
    room: &str,
    name: &str,
    difficulty: i32,
    max_hp: i32,
    drop: &str,
    impact: (&str, i32),
) -> EncounterDef {
    EncounterDef {
        id: id.into(),
        room: room.into(),
        name: name.into(),
        difficulty,
        max_hp,
        drops: vec![drop.to_string()],
        faction_impact: BTreeMap::from([(impact.0.to_string(), impact.1)]),
    }
}

fn npc(id: &str, name: &str, room: &str, faction: &str) -> NpcDef {
    NpcDef {
        id: id.into(),
        name: name.into(),
        room: room.into(),
        faction: faction.into(),
    }
}

pub(super) fn world() -> WorldConfig {
    let rooms = vec![
        room(
            "start",
            "Village Square",
            "You stand in the center of a small village. To the north is a dark forest, to the east a mysterious cave, and to the south a peaceful meadow.",
            &[("north", "forest"), ("east", "cave"), ("south", "meadow")],
            &["torch", "map"],
        ),
        room(
            "forest",
            "Dark Forest",
            "Tall trees surround you, blocking most of the sunlight. You hear strange noises in the distance.",
            &[("south", "start"), ("east", "temple")],
            &["sword", "shield"],
        ),
        room(
            "cave",
            "Mysterious Cave",
            "The cave is damp and dark. You see ancient writings on the walls.",
            &[("west", "start"), ("north", "treasure")],
            &["potion"],
        ),
        room(
            "meadow",
            "Peaceful Meadow",
            "A beautiful meadow with wildflowers. You feel at peace here.",
            &[("north", "start")],
            &["flower", "herbs"],
        ),
        room(
            "temple",
            "Ancient Temple",
            "An ancient temple with mysterious runes. This place holds great power.",
            &[("west", "forest")],
            &["amulet"],
        ),
        room(
            "treasure",
            "Treasure Chamber",
            "You found the legendary treasure! Congratulations, adventurer!",
            &[("south", "cave")],
            &["gold", "crown", "jewels"],
        ),
    ];

    let quests = vec![
        QuestDef {
            id: "prove_worth".into(),
            title: "Earn the Elder Seal".into(),
            description: "Speak with the Village Elder and earn sanction for temple entry.".into(),
            room: "start".into(),
            initial_status: QuestStatus::Active,
            giver_npc: Some("village_elder".into()),
            item: None,
            required_items: Vec::new(),
            required_encounter_defeated: None,
            reward_items: strings(&["elder_seal"]),
            unlocks_when_completed: Some("recover_amulet".into()),
            progress_on_encounter_defeat: None,
            progress_on_arrival: None,
            claim_label: None,
            ends_game: false,
            messages: QuestMessages {
                completed: "The Village Elder grants you the Elder Seal and authorizes your temple expedition.".into(),
                ..QuestMessages::default()
            },
        },
        QuestDef {
            id: "recover_amulet".into(),
            title: "Recover the Temple Amulet".into(),
            description: "Defeat the temple guardian and retrieve the ancient amulet.".into(),
            room: "temple".into(),
            initial_status: QuestStatus::Locked,
            giver_npc: None,
            item: Some("amulet".into()),
            required_items: strings(&["elder_seal"]),
            required_encounter_defeated: Some("temple_guardian".into()),
            reward_items: Vec::new(),
            unlocks_when_completed: Some("claim_treasure".into()),
            progress_on_encounter_defeat: Some(70),
            progress_on_arrival: None,
            claim_label: None,
            ends_game: false,
            messages: QuestMessages {
                not_active: "You are not yet sanctioned to recover the amulet.".into(),
                encounter_standing: "The Runic Guardian still bars your path to the amulet.".into(),
                missing_items: "The temple wards reject you. You need the Elder Seal.".into(),
                ..QuestMessages::default()
            },
        },
        QuestDef {
            id: "claim_treasure".into(),
            title: "Claim the Treasure Chamber".into(),
            description: "Defeat the vault sentinel and claim the relics beyond it.".into(),
            room: "treasure".into(),
            initial_status: QuestStatus::Locked,
            giver_npc: None,
            item: None,
            required_items: strings(&["amulet", "vault_key"]),
            required_encounter_defeated: Some("treasure_sentinel".into()),
            reward_items: strings(&["gold", "crown", "jewels"]),
            unlocks_when_completed: None,
            progress_on_encounter_defeat: Some(85),
            progress_on_arrival: Some(60),
            claim_label: Some("Claim the treasure".into()),
            ends_game: true,
            messages: QuestMessages {
                wrong_room: "The treasure can only be claimed in the treasure chamber.".into(),
                not_active: "This quest is not yet active.".into(),
                encounter_standing: "A sentinel still guards the vault. Defeat it first.".into(),
                missing_items: "You are missing the required relics to claim the treasure.".into(),
                completed: "You claim the treasure and complete your quest.".into(),
            },
        },
    ];

    let encounters = vec![
        encounter("forest_wolf", "forest", "Shadow Wolf", 10, 8, "wolf_pelt", ("forest_clans", 3)),
        encounter("temple_guardian", "temple", "Runic Guardian", 12, 12, "guardian_core", ("temple_order", 6)),
        encounter("treasure_sentinel", "treasure", "Vault Sentinel", 14, 14, "vault_key", ("temple_order", 8)),
    ];

    let npcs = vec![
        npc("village_elder", "Village Elder", "start", "villagers"),
        npc("forest_ranger", "Forest Ranger", "forest", "forest_clans"),
        npc("temple_keeper", "Temple Keeper", "temple", "temple_order"),
    ];

    let item_uses = vec![
        ItemUseDef {
            item: "elder_seal".into(),
            room: "temple".into(),
            status: Status::Success,
            message: "The Elder Seal resonates with temple wards and steadies your resolve.".into(),
            label: Some("Use elder_seal at altar".into()),
        },
        ItemUseDef {
            item: "amulet".into(),
            room: "treasure".into(),
            status: Status::Partial,
            message: "The amulet glows near the vault, but the chamber must still be secured.".into(),
            label: None,
        },
    ];

    WorldConfig {
        initial_room: "start".into(),
        intro_message:
            "Your journey begins. Seek the Village Elder to earn passage toward the temple.".into(),
        generic_actions: strings(&[
            "Investigate surroundings",
            "Wait and assess",
            "Review objectives",
        ]),
        time_phases: default_time_phases(),
        player: PlayerTuning::default(),
        initial_skill_score: default_initial_skill_score(),
        difficulty: DifficultyBands::default(),
        combat: CombatTuning::default(),
        factions: strings(&["villagers", "forest_clans", "temple_order"]),
        faction_bounds: default_faction_bounds(),
        pacing: PacingTuning::default(),
        default_style: Style::Balanced,
        action_count: ActionCountBounds::default(),
        rooms,
        quests,
        encounters,
        npcs,
        item_uses,
    }
}
