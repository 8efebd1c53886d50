//! Full game loop tests for the session layer

use crunch::core::{Level, LevelData, Swap};
use crunch::engine::{GameSession, SessionStatus};
use crunch::types::{NUM_COLUMNS, NUM_ROWS};

fn level_data(target_score: u32, moves: u32) -> LevelData {
    LevelData {
        tiles: vec![vec![1; NUM_COLUMNS]; NUM_ROWS],
        target_score,
        moves,
    }
}

/// Deterministic pick from the legal-swap set: lowest identity pair wins
fn pick_swap(session: &GameSession) -> Swap {
    *session
        .level()
        .possible_swaps()
        .iter()
        .min_by_key(|swap| (swap.a().id.min(swap.b().id), swap.a().id.max(swap.b().id)))
        .expect("session board must have a legal swap")
}

#[test]
fn test_begin_deals_a_live_board() {
    let mut session = GameSession::new(Level::new(&level_data(1000, 15), 42));
    let cookies = session.begin();

    assert_eq!(cookies.len(), NUM_COLUMNS * NUM_ROWS);
    assert_eq!(session.score(), 0);
    assert_eq!(session.moves_left(), 15);
    assert!(!session.level().possible_swaps().is_empty());
}

#[test]
fn test_turns_accumulate_score_and_spend_moves() {
    let mut session = GameSession::new(Level::new(&level_data(1_000_000, 15), 42));
    session.begin();

    let mut total = 0;
    for turn in 1..=5 {
        let outcome = session.play(&pick_swap(&session)).expect("legal swap");
        assert!(outcome.score_delta >= 60, "turn {turn} scored nothing");
        total += outcome.score_delta;
        assert_eq!(session.score(), total);
        assert_eq!(session.moves_left(), 15 - turn);
        assert_eq!(session.status(), SessionStatus::Playing);
    }
}

#[test]
fn test_every_turn_leaves_a_full_consistent_board() {
    let mut session = GameSession::new(Level::new(&level_data(1_000_000, 15), 7));
    session.begin();

    for _ in 0..5 {
        let outcome = session.play(&pick_swap(&session)).expect("legal swap");

        for step in &outcome.steps {
            assert!(!step.chains.is_empty());
            for chain in &step.chains {
                assert!(chain.len() >= 3);
                assert!(chain.score > 0);
            }
        }

        let level = session.level();
        for row in 0..NUM_ROWS {
            for column in 0..NUM_COLUMNS {
                let cookie = level.cookie_at(column, row).expect("board must be full");
                assert_eq!((cookie.column, cookie.row), (column, row));
            }
        }
        assert_eq!(level.combo_multiplier(), 1, "combo must reset per turn");
    }
}

#[test]
fn test_replay_with_same_seed_is_identical() {
    let mut first = GameSession::new(Level::new(&level_data(1_000_000, 15), 1234));
    let mut second = GameSession::new(Level::new(&level_data(1_000_000, 15), 1234));
    first.begin();
    second.begin();

    for _ in 0..5 {
        let a = first.play(&pick_swap(&first)).expect("legal swap");
        let b = second.play(&pick_swap(&second)).expect("legal swap");
        assert_eq!(a.score_delta, b.score_delta);
        assert_eq!(a.steps.len(), b.steps.len());
    }
    assert_eq!(first.score(), second.score());
}

#[test]
fn test_unplayable_level_rejects_swaps_cleanly() {
    let mut session = GameSession::new(Level::empty(1));
    let cookies = session.begin();
    assert!(cookies.is_empty());
    assert!(!session.level().is_playable());
    assert!(session.level().possible_swaps().is_empty());
}

#[test]
fn test_moves_run_out_at_zero() {
    let mut session = GameSession::new(Level::new(&level_data(1_000_000, 2), 5));
    session.begin();

    session.play(&pick_swap(&session)).expect("legal swap");
    assert_eq!(session.status(), SessionStatus::Playing);

    let outcome = session.play(&pick_swap(&session)).expect("legal swap");
    assert_eq!(outcome.status, SessionStatus::OutOfMoves);
    assert_eq!(session.moves_left(), 0);

    let swap = Swap::new(
        session.level().cookie_at(0, 0).unwrap(),
        session.level().cookie_at(1, 0).unwrap(),
    );
    assert!(session.play(&swap).is_err());
}
