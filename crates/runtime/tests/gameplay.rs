use auren_core::combat::CombatEvent;
use auren_core::progression::ProgressEvent;
use auren_core::{CombatAction, CombatState, Position, QuestId};
use auren_runtime::{OracleManager, RuntimeError, Session};

const TOWN: Position = Position::new(2, 3);

fn new_session(seed: u64) -> Session {
    let oracles = OracleManager::bundled().expect("bundled content is valid");
    Session::new_game(oracles, "Ash", seed).expect("new game")
}

/// Attacks until the fight ends and returns every event plus the final state.
fn fight(session: &mut Session, monster: &str) -> (Vec<CombatEvent>, CombatState) {
    let mut events = session.start_combat(monster).expect("fight starts");
    for _ in 0..100 {
        let Some(encounter) = session.encounter() else {
            break;
        };
        if encounter.state().is_over() {
            break;
        }
        let round = session.submit(CombatAction::Attack).expect("round resolves");
        events.extend(round.events);
        if round.state.is_over() {
            return (events, round.state);
        }
    }
    panic!("fight against {monster} did not end");
}

/// Opening chapter played through the session API:
/// 1. Reach town to finish the first step
/// 2. Talk to Lira, who hands over the first echo
/// 3. Focus the echo and talk again to advance
/// 4. Win a goblin fight, which counts toward the hunt step
#[test]
fn opening_chapter() {
    let mut session = new_session(42);

    // ================================================================
    // PHASE 1: Arrive in town
    // ================================================================
    let events = session.travel(TOWN).unwrap();
    assert!(events.contains(&ProgressEvent::MainQuestAdvanced {
        title: "The Mayor's Plea".into()
    }));

    // ================================================================
    // PHASE 2: The mayor's plea needs a focused echo
    // ================================================================
    let events = session.talk("lira").unwrap();
    assert_eq!(
        events,
        vec![
            ProgressEvent::CodexEntryAdded {
                title: "The First Echo".into()
            },
            ProgressEvent::EchoNotFocused {
                entry: "echo_gift_01".into()
            },
        ]
    );
    assert!(session.player().quests.is_main_step("mq_02"));

    session.focus_echo("echo_gift_01").unwrap();
    assert_eq!(session.player().stats.attack, 4);

    session.talk("lira").unwrap();
    assert!(session.player().quests.is_main_step("mq_03"));

    // ================================================================
    // PHASE 3: First hunt
    // ================================================================
    session.equip("rusted_sword").unwrap();
    assert_eq!(session.player().stats.attack, 6);

    let (events, state) = fight(&mut session, "goblin");
    assert_eq!(state, CombatState::Victory);
    assert!(events.iter().any(|event| matches!(event, CombatEvent::Rewarded { gold: 6, .. })));

    let player = session.player();
    assert!(session.encounter().is_none());
    assert_eq!(player.gold, 6);
    assert_eq!(player.xp, 10);
    assert_eq!(player.quests.progress("mq_03"), Some(1));
    assert!(player.health > 0);
}

#[test]
fn same_seed_replays_the_same_fight() {
    let mut first = new_session(99);
    let mut second = new_session(99);

    let (first_events, first_state) = fight(&mut first, "wolf");
    let (second_events, second_state) = fight(&mut second, "wolf");

    assert_eq!(first_events, second_events);
    assert_eq!(first_state, second_state);
    assert_eq!(first.player(), second.player());
}

#[test]
fn fleeing_ends_the_fight_without_rewards() {
    let mut session = new_session(3);
    session.start_combat("orc").unwrap();

    let round = session.submit(CombatAction::Flee).unwrap();

    assert_eq!(round.state, CombatState::Aborted);
    assert!(round.rewards.is_none());
    assert!(session.encounter().is_none());
    assert_eq!(session.player().gold, 0);
}

#[test]
fn side_quest_from_an_npc_pays_out_on_turn_in() {
    let mut session = new_session(5);

    // Only the slime hunt suits a level-1 character on the board.
    assert_eq!(session.board_offers().unwrap(), vec![QuestId::new("sq_slime_01")]);
    let err = session.accept_side_quest("sq_goblin_01").unwrap_err();
    assert!(err.is_recoverable());

    // Off-board quests skip the board filter.
    session.accept_side_quest("sq_farmer_01").unwrap();
    assert!(matches!(
        session.turn_in_side_quest("sq_farmer_01"),
        Err(RuntimeError::Quest(_))
    ));

    let events = session.collect_codex("merchant_spirit").unwrap();
    assert!(events.contains(&ProgressEvent::SideQuestReady {
        title: "The Lost Lullaby".into()
    }));
    let ready = session.ready_side_quests().unwrap();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].id, "sq_farmer_01");

    session.turn_in_side_quest("sq_farmer_01").unwrap();

    let player = session.player();
    assert_eq!(player.gold, 100);
    assert_eq!(player.level, 3);
    assert_eq!(player.xp, 46);
    assert!(player.quests.active_side_quests.is_empty());
    assert_eq!(player.quests.completed_side_quests, vec![QuestId::new("sq_farmer_01")]);
    assert_eq!(player.quests.progress("sq_farmer_01"), None);
}

#[test]
fn reaching_into_the_mirror_makes_the_player_stronger() {
    let mut session = new_session(8);
    assert_eq!(session.player().stats.attack, 3);

    let events = session.collect_codex("mirror_echo").unwrap();

    assert!(events.iter().any(|event| matches!(
        event,
        ProgressEvent::PermanentBonus {
            attack: 1,
            total_attack: 4,
            ..
        }
    )));
    assert_eq!(session.player().bonus_attack, 1);

    // Focusing adds the echo's own buff on top of the permanent bonus.
    session.focus_echo("mirror_echo").unwrap();
    assert_eq!(session.player().stats.attack, 5);
}
