//! Engine scenarios driven through the public API only

use proptest::prelude::*;

use duel_tetris::core::{EngineEvent, EnginePhase, GameState};
use duel_tetris::types::{Cell, GameAction, PieceKind, LOCK_DELAY_MS, NEXT_QUEUE_LEN};

/// First seed whose opening piece is `kind`
fn seed_opening_with(kind: PieceKind) -> u32 {
    (1..10_000)
        .find(|&seed| GameState::new(seed).next_queue()[0] == kind)
        .expect("no seed opens with the requested kind")
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert!(!state.started());
    assert_eq!(state.phase(), EnginePhase::NotStarted);
    assert!(!state.tick(10_000));

    state.start();
    assert!(state.started());
    assert!(state.active().is_some());
    assert!(!state.game_over());
    assert!(!state.paused());
    assert_eq!(state.next_queue().len(), NEXT_QUEUE_LEN);
}

#[test]
fn test_i_piece_hard_drop_lands_on_bottom_row() {
    let seed = seed_opening_with(PieceKind::I);
    let mut state = GameState::new(seed);
    state.start();

    state.apply_action(GameAction::HardDrop);

    let board = state.board();
    for x in 0..10 {
        let expected = if (4..=7).contains(&x) {
            Cell::Piece(PieceKind::I)
        } else {
            Cell::Empty
        };
        assert_eq!(board.get(x, 19), Some(expected), "column {}", x);
    }
    assert_eq!(board.cells().iter().filter(|c| !c.is_empty()).count(), 4);
    assert_eq!(state.score(), 0);
    assert_eq!(
        state.drain_events(),
        vec![EngineEvent::Locked {
            lines_cleared: 0,
            score_delta: 0
        }]
    );
}

#[test]
fn test_gravity_reaches_floor_and_locks_after_delay() {
    let seed = seed_opening_with(PieceKind::I);
    let mut state = GameState::new(seed);
    state.start();

    // I North sits on row y + 1, so it needs 18 gravity steps to land
    for _ in 0..18 {
        state.tick(1000);
    }
    assert_eq!(state.active().map(|p| p.y), Some(18));
    state.tick(1000);
    assert_eq!(state.phase(), EnginePhase::LockPending);

    state.tick(LOCK_DELAY_MS / 2);
    assert_eq!(state.phase(), EnginePhase::LockPending);
    state.tick(LOCK_DELAY_MS / 2);
    assert_eq!(state.board().get(4, 19), Some(Cell::Piece(PieceKind::I)));
    assert_eq!(state.phase(), EnginePhase::Falling);
}

#[test]
fn test_sliding_off_ledge_cancels_lock() {
    let seed = seed_opening_with(PieceKind::I);
    let mut state = GameState::new(seed);
    state.start();
    state.apply_action(GameAction::HardDrop);

    // Park the next piece on top of the I, then move it off the edge of it
    let mut guard = 0;
    while state.phase() != EnginePhase::LockPending && guard < 100 {
        state.tick(1000);
        guard += 1;
    }
    assert_eq!(state.phase(), EnginePhase::LockPending);
    for _ in 0..10 {
        state.apply_action(GameAction::MoveLeft);
    }
    let parked = state.active().unwrap();
    state.tick(LOCK_DELAY_MS);

    // Nothing under it any more: the lock is cancelled and gravity resumes
    assert_eq!(state.phase(), EnginePhase::Falling);
    assert_eq!(state.board().cells().iter().filter(|c| !c.is_empty()).count(), 4);
    state.tick(1000);
    assert_eq!(state.active().unwrap().y, parked.y + 1);
}

#[test]
fn test_spawn_blocked_after_stacking() {
    let mut state = GameState::new(7);
    state.start();
    let mut drops = 0;
    while !state.game_over() && drops < 200 {
        state.apply_action(GameAction::HardDrop);
        drops += 1;
    }
    assert!(state.game_over());
    assert_eq!(state.phase(), EnginePhase::GameOver);
    assert!(state.active().is_none());
    assert!(state.drain_events().contains(&EngineEvent::GameOver));
    assert!(!state.apply_action(GameAction::HardDrop));
}

#[test]
fn test_hold_then_swap_back() {
    let mut state = GameState::new(99);
    state.start();
    let first = state.active().unwrap().kind;

    assert!(state.apply_action(GameAction::Hold));
    assert_eq!(state.hold_piece(), Some(first));
    assert!(!state.apply_action(GameAction::Hold));

    state.apply_action(GameAction::HardDrop);
    assert!(state.apply_action(GameAction::Hold));
    let back = state.active().unwrap();
    assert_eq!(back.kind, first);
    assert_eq!((back.x, back.y), (4, 0));
}

#[test]
fn test_garbage_raises_stack() {
    let seed = seed_opening_with(PieceKind::I);
    let mut state = GameState::new(seed);
    state.start();
    state.apply_action(GameAction::HardDrop);

    assert_eq!(state.receive_garbage(3), 3);
    assert_eq!(state.board().get(4, 16), Some(Cell::Piece(PieceKind::I)));
    for y in 17..20 {
        let holes = state.board().row(y).iter().filter(|c| c.is_empty()).count();
        assert_eq!(holes, 1);
    }
    // oversized attacks are clamped to height - 1
    assert_eq!(state.receive_garbage(50), 19);
}

#[test]
fn test_snapshot_reports_engine_state() {
    let mut state = GameState::with_dimensions(8, 16, 3);
    state.start();
    state.apply_action(GameAction::Pause);

    let snap = state.snapshot();
    assert_eq!((snap.width, snap.height), (8, 16));
    assert_eq!(snap.board.len(), 128);
    assert!(snap.paused);
    assert!(!snap.playable());
    assert_eq!(snap.phase, EnginePhase::Paused);
    assert_eq!(snap.drop_interval_ms, 1000);
    assert_eq!(snap.active.map(|a| (a.x, a.y)), Some((3, 0)));
}

fn pre_move() -> impl Strategy<Value = GameAction> {
    prop_oneof![
        Just(GameAction::MoveLeft),
        Just(GameAction::MoveRight),
        Just(GameAction::Rotate),
        Just(GameAction::SoftDrop),
    ]
}

proptest! {
    #[test]
    fn hard_drop_equals_soft_drop_then_lock(seed in any::<u32>(), moves in prop::collection::vec(pre_move(), 0..12)) {
        let mut hard = GameState::new(seed);
        let mut soft = GameState::new(seed);
        hard.start();
        soft.start();
        for &action in &moves {
            hard.apply_action(action);
            soft.apply_action(action);
        }

        hard.apply_action(GameAction::HardDrop);
        while soft.apply_action(GameAction::SoftDrop) {}
        soft.lock_piece();

        prop_assert_eq!(hard.snapshot(), soft.snapshot());
        prop_assert_eq!(hard.drain_events(), soft.drain_events());
    }

    #[test]
    fn score_and_level_stay_consistent(seed in any::<u32>(), actions in prop::collection::vec(0u8..6, 1..200)) {
        let mut state = GameState::new(seed);
        state.start();
        let mut last_score = 0;
        for a in actions {
            let action = match a {
                0 => GameAction::MoveLeft,
                1 => GameAction::MoveRight,
                2 => GameAction::Rotate,
                3 => GameAction::SoftDrop,
                4 => GameAction::Hold,
                _ => GameAction::HardDrop,
            };
            state.apply_action(action);
            state.tick(16);
            prop_assert!(state.score() >= last_score);
            last_score = state.score();
            prop_assert_eq!(state.level(), state.score() / 1000 + 1);
            prop_assert!(state.next_queue().len() >= NEXT_QUEUE_LEN);
        }
    }
}
