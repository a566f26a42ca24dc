use game_rules::{
    load_snapshot, GameState, PlayerInput, QuestStatus, RulesEngine, Skill, Status, TurnResult,
    WorldConfig, SKILL_MAX, SKILL_MIN,
};
use std::collections::HashSet;

fn begin(config: &WorldConfig) -> GameState {
    let engine = RulesEngine::new(config);
    let mut state = engine.new_game();
    engine.resolve_turn(&mut state, "").unwrap();
    state
}

fn play(engine: &RulesEngine<'_>, state: &mut GameState, input: &str) -> TurnResult {
    let turn = engine.resolve_turn(state, input).unwrap();
    assert_invariants(engine.config(), state, &turn);
    turn
}

/// Repeat `input` until `done` holds, failing the test after `limit` turns.
fn play_until(
    engine: &RulesEngine<'_>,
    state: &mut GameState,
    input: &str,
    limit: usize,
    done: impl Fn(&GameState) -> bool,
) {
    for _ in 0..limit {
        if done(state) {
            return;
        }
        play(engine, state, input);
    }
    assert!(done(state), "{input:?} did not finish within {limit} turns");
}

fn assert_invariants(config: &WorldConfig, state: &GameState, turn: &TurnResult) {
    let world = &state.world_state;
    for encounter in world.encounters.values() {
        assert!((0..=encounter.max_hp()).contains(&encounter.current_hp()));
    }
    for (_, score) in world.factions.iter() {
        assert!((config.faction_bounds.min..=config.faction_bounds.max).contains(&score));
    }
    let tension = world.director.tension();
    assert!((config.pacing.min_tension..=config.pacing.max_tension).contains(&tension));
    let health = state.player.health();
    assert!((config.player.min_health..=state.player.max_health()).contains(&health));
    for (_, score) in state.player.skills() {
        assert!((SKILL_MIN..=SKILL_MAX).contains(&score));
    }
    let unique: HashSet<_> = state.inventory.iter().collect();
    assert_eq!(unique.len(), state.inventory.len(), "duplicate inventory entries");
    let count = turn.actions.len();
    assert!(count >= config.action_count.min && count <= config.action_count.max);
    for npc in world.npcs.values() {
        assert!((-10..=10).contains(&npc.trust()));
        assert!(npc.memory_len() <= 8);
    }
}

#[test]
fn elder_grants_seal_once_and_unlocks_amulet_quest() {
    let config = WorldConfig::builtin();
    let engine = RulesEngine::new(&config);
    let mut state = begin(&config);
    state.player.set_skill(Skill::Charisma, 10);

    let turn = play(&engine, &mut state, "Talk to Village Elder");
    assert_ne!(turn.outcome.status, Status::Fail);
    assert_eq!(
        turn.outcome.message,
        "The Village Elder grants you the Elder Seal and authorizes your temple expedition."
    );

    let quests = &state.world_state.quests;
    assert_eq!(quests["prove_worth"].status(), QuestStatus::Completed);
    assert_eq!(quests["prove_worth"].progress(), 100);
    assert_eq!(quests["recover_amulet"].status(), QuestStatus::Active);
    assert_eq!(quests["recover_amulet"].progress(), 10);
    assert_eq!(state.inventory, vec!["elder_seal"]);

    let turn = play(&engine, &mut state, "Talk to Village Elder");
    assert_eq!(turn.outcome.message, "Village Elder shares guidance about the path ahead.");
    assert_eq!(state.inventory, vec!["elder_seal"]);

    let elder = &state.world_state.npcs["village_elder"];
    assert!(elder.trust() >= 2);
    assert_eq!(elder.memory().next(), Some("Turn 2: Talk to Village Elder"));
    assert!(state.world_state.factions.score("villagers") >= 2);
}

#[test]
fn amulet_pickup_is_gated() {
    let config = WorldConfig::builtin();
    let engine = RulesEngine::new(&config);
    let mut state = begin(&config);
    state.current_room = "temple".into();

    let turn = play(&engine, &mut state, "take amulet");
    assert_eq!(turn.outcome.status, Status::Fail);
    assert!(turn.outcome.check.is_none());
    assert!(state.inventory.is_empty());
    assert!(turn.items_here.contains(&"amulet".to_string()));

    state.world_state.quests.get_mut("recover_amulet").unwrap().unlock(1);
    let turn = play(&engine, &mut state, "take the amulet");
    assert_eq!(turn.outcome.status, Status::Fail);
    assert_eq!(
        turn.outcome.message,
        "The temple wards reject you. You need the Elder Seal."
    );
    assert!(state.inventory.is_empty());

    state.inventory.push("elder_seal".into());
    let turn = play(&engine, &mut state, "grab amulet");
    assert_eq!(
        turn.outcome.message,
        "The Runic Guardian still bars your path to the amulet."
    );
    assert_eq!(state.inventory, vec!["elder_seal"]);
}

#[test]
fn finishing_the_guardian_rewards_the_temple_order() {
    let config = WorldConfig::builtin();
    let engine = RulesEngine::new(&config);
    let mut state = begin(&config);
    state.current_room = "temple".into();
    state.player.set_skill(Skill::Combat, 10);
    state
        .world_state
        .encounters
        .get_mut("temple_guardian")
        .unwrap()
        .set_current_hp(1);
    state.world_state.quests.get_mut("recover_amulet").unwrap().unlock(1);

    let turn = play(&engine, &mut state, "Attack Runic Guardian");
    let combat = turn.outcome.combat.as_ref().unwrap();
    assert_eq!(turn.outcome.status, Status::Success);
    assert!(combat.defeated);
    assert!(state.inventory.contains(&"guardian_core".to_string()));
    assert_eq!(state.world_state.factions.score("temple_order"), 6);
    assert!(turn.active_encounter.is_none());
    assert_eq!(state.world_state.quests["recover_amulet"].progress(), 70);
    assert_eq!(state.world_state.metrics.combat_victories, 1);
}

#[test]
fn claiming_the_treasure_ends_the_game() {
    let config = WorldConfig::builtin();
    let engine = RulesEngine::new(&config);
    let mut state = begin(&config);
    state.current_room = "treasure".into();
    state.inventory = vec!["amulet".into(), "vault_key".into()];
    state
        .world_state
        .encounters
        .get_mut("treasure_sentinel")
        .unwrap()
        .mark_defeated();
    state.world_state.quests.get_mut("claim_treasure").unwrap().unlock(1);

    let turn = play(&engine, &mut state, "Claim the treasure");
    assert_eq!(turn.outcome.status, Status::Success);
    assert!(turn.game_over);
    assert!(turn.outcome.game_over);
    for item in ["gold", "crown", "jewels"] {
        assert!(state.inventory.contains(&item.to_string()));
    }
    assert!(state.world_state.quests["claim_treasure"].is_completed());
    assert_eq!(state.world_state.metrics.quest_completions, 1);
}

#[test]
fn hopeless_attacks_never_drop_below_min_health() {
    let config = WorldConfig::builtin();
    let engine = RulesEngine::new(&config);
    let mut state = begin(&config);
    state.player.set_skill(Skill::Combat, 0);
    play(&engine, &mut state, "go north");

    for _ in 0..30 {
        let turn = play(&engine, &mut state, "attack");
        let Some(combat) = turn.outcome.combat else {
            break;
        };
        if combat.defeated {
            break;
        }
        assert!(combat.counter_damage >= 1);
        assert!(state.player.health() >= config.player.min_health);
    }
    assert!(state.world_state.metrics.damage_taken >= 1);
}

#[test]
fn full_playthrough_reaches_the_vault() {
    let config = WorldConfig::builtin();
    let engine = RulesEngine::new(&config);
    let mut state = begin(&config);
    for skill in Skill::ALL {
        state.player.set_skill(skill, 10);
    }

    play(&engine, &mut state, "Talk to Village Elder");
    assert!(state.has_item("elder_seal"));

    play(&engine, &mut state, "go north");
    play(&engine, &mut state, "go east");
    assert_eq!(state.current_room, "temple");
    play_until(&engine, &mut state, "Attack Runic Guardian", 20, |s| {
        s.world_state.is_encounter_defeated("temple_guardian")
    });
    play_until(&engine, &mut state, "take amulet", 40, |s| s.has_item("amulet"));

    let quests = &state.world_state.quests;
    assert!(quests["recover_amulet"].is_completed());
    assert!(quests["claim_treasure"].is_active());

    for step in ["go west", "go south", "go east", "go north"] {
        play(&engine, &mut state, step);
    }
    assert_eq!(state.current_room, "treasure");
    assert!(state.world_state.quests["claim_treasure"].progress() >= 60);

    play_until(&engine, &mut state, "Attack Vault Sentinel", 20, |s| {
        s.world_state.is_encounter_defeated("treasure_sentinel")
    });
    assert!(state.has_item("vault_key"));
    assert_eq!(state.world_state.quests["claim_treasure"].progress(), 85);

    let turn = play(&engine, &mut state, "Claim the treasure");
    assert!(turn.game_over);
    assert!(state.world_state.quests.values().all(|q| q.is_completed()));
}

#[test]
fn replay_from_snapshot_is_deterministic() {
    let config = WorldConfig::builtin();
    let engine = RulesEngine::new(&config);
    let mut state = begin(&config);
    play(&engine, &mut state, "go north");

    let snapshot = state.to_snapshot().unwrap();
    let mut restored = load_snapshot(&config, &snapshot);
    assert_eq!(restored, state);

    for input in ["attack", "defend", "investigate", "wait", "go east", "take amulet"] {
        let a = play(&engine, &mut state, input);
        let b = play(&engine, &mut restored, input);
        assert_eq!(a, b);
    }
}

#[test]
fn player_mistakes_are_failed_outcomes() {
    let config = WorldConfig::builtin();
    let engine = RulesEngine::new(&config);
    let mut state = begin(&config);
    let before = state.clone();

    let turn = play(&engine, &mut state, "go up");
    assert_eq!(turn.outcome.status, Status::Fail);
    let turn = play(&engine, &mut state, "take crown");
    assert_eq!(turn.outcome.message, "That item is not available here.");
    let turn = play(&engine, &mut state, "use potion");
    assert_eq!(turn.outcome.message, "You do not have that item available.");
    let turn = play(&engine, &mut state, "claim the treasure");
    assert_eq!(turn.outcome.status, Status::Fail);

    assert_eq!(state.current_room, before.current_room);
    assert_eq!(state.inventory, before.inventory);
    assert_eq!(state.world_state.quests, before.world_state.quests);
}

#[test]
fn free_text_goes_to_narration() {
    let config = WorldConfig::builtin();
    let engine = RulesEngine::new(&config);
    let mut state = begin(&config);
    let tension = state.world_state.director.tension();

    let turn = engine
        .resolve_turn(&mut state, PlayerInput::FreeText("go north".into()))
        .unwrap();
    assert_eq!(turn.action.kind(), game_rules::ActionKind::Custom);
    assert_eq!(turn.outcome.status, Status::Success);
    assert!(turn.outcome.message.is_empty());
    assert_eq!(state.current_room, "start");
    assert_eq!(state.world_state.director.tension(), tension);
    assert_eq!(state.world_state.metrics.action_counts.custom, 1);
}

#[test]
fn quest_status_never_regresses() {
    let config = WorldConfig::builtin();
    let engine = RulesEngine::new(&config);
    let mut state = begin(&config);
    let script = [
        "Talk to Village Elder",
        "go north",
        "attack",
        "go east",
        "take amulet",
        "defend",
        "use elder_seal",
        "go west",
        "wait",
        "claim treasure",
    ];
    let mut last: Vec<QuestStatus> = Vec::new();
    for input in script.iter().cycle().take(40) {
        play(&engine, &mut state, input);
        let now: Vec<QuestStatus> = config
            .quests
            .iter()
            .map(|q| state.world_state.quests[&q.id].status())
            .collect();
        if !last.is_empty() {
            assert!(last.iter().zip(&now).all(|(before, after)| before <= after));
        }
        last = now;
    }
}

#[test]
fn legacy_save_without_first_turn_flag_resumes_play() {
    let config = WorldConfig::builtin();
    let engine = RulesEngine::new(&config);
    let mut state = load_snapshot(&config, r#"{"moves": 12, "currentRoom": "forest"}"#);
    assert!(!state.is_first_turn);

    let turn = play(&engine, &mut state, "go south");
    assert_eq!(turn.action.kind(), game_rules::ActionKind::Move);
    assert_eq!(state.current_room, "start");
}

#[test]
fn saturated_save_counters_keep_playing() {
    let config = WorldConfig::builtin();
    let engine = RulesEngine::new(&config);
    let snapshot = format!(
        r#"{{"moves": {max}, "isFirstTurn": false, "worldState": {{"time": {{"turn": {max}}}}}}}"#,
        max = u32::MAX
    );
    let mut state = load_snapshot(&config, &snapshot);
    assert_eq!(state.moves, u32::MAX);

    let turn = play(&engine, &mut state, "wait");
    assert_eq!(turn.turn, u32::MAX);
    assert_eq!(state.moves, u32::MAX);
}
