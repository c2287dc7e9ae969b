//! Board tests - placement, row clearing and garbage injection

use proptest::prelude::*;

use duel_tetris::core::{Board, SimpleRng};
use duel_tetris::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

fn rows_of(board: &Board) -> Vec<Vec<u8>> {
    board
        .to_u8_vec()
        .chunks(board.width() as usize)
        .map(|r| r.to_vec())
        .collect()
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    // All cells should be empty
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(board.get(x, y), Some(Cell::Empty));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::default();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::default();

    assert!(board.set(5, 10, Cell::Piece(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Cell::Piece(PieceKind::T)));

    assert!(board.set(5, 10, Cell::Empty));
    assert_eq!(board.get(5, 10), Some(Cell::Empty));

    assert!(!board.set(10, 0, Cell::Garbage));
}

#[test]
fn test_custom_dimensions() {
    let board = Board::new(6, 8);
    assert_eq!(board.to_u8_vec().len(), 48);
    assert!(board.can_place(PieceKind::I, Rotation::North, 2, 6));
    assert!(!board.can_place(PieceKind::I, Rotation::North, 3, 6));
}

#[test]
fn test_can_place_rejects_occupied_and_walls() {
    let mut board = Board::default();
    board.set(4, 1, Cell::Garbage);

    // I North at x=4 covers (4..=7, 1)
    assert!(!board.can_place(PieceKind::I, Rotation::North, 4, 0));
    assert!(board.can_place(PieceKind::I, Rotation::North, 4, 1));
    assert!(!board.can_place(PieceKind::I, Rotation::North, -1, 5));
    assert!(!board.can_place(PieceKind::I, Rotation::North, 7, 5));
    assert!(board.can_place(PieceKind::I, Rotation::North, 6, 5));
}

#[test]
fn test_place_writes_kind_ids() {
    let mut board = Board::default();
    board.place(PieceKind::T, Rotation::North, 0, 18);

    let rows = rows_of(&board);
    assert_eq!(rows[18], vec![0, 3, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(rows[19], vec![3, 3, 3, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_clear_single_bottom_row() {
    let mut board = Board::default();
    for x in 0..10 {
        board.set(x, 19, Cell::Garbage);
    }
    board.set(3, 18, Cell::Piece(PieceKind::S));

    assert_eq!(board.clear_full_rows(), 1);
    assert_eq!(board.get(3, 19), Some(Cell::Piece(PieceKind::S)));
    assert!(board.row(18).iter().all(|c| c.is_empty()));
}

#[test]
fn test_clear_nothing_when_no_full_rows() {
    let mut board = Board::default();
    board.set(0, 19, Cell::Garbage);
    let before = board.clone();
    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_from_u8_rejects_bad_input() {
    assert!(Board::from_u8(4, 2, &[0; 7]).is_none());
    assert!(Board::from_u8(4, 2, &[0, 0, 0, 0, 0, 0, 0, 9]).is_none());
    assert!(Board::from_u8(4, 2, &[8; 8]).is_some());
}

fn grid() -> impl Strategy<Value = (u8, u8, Vec<Vec<u8>>)> {
    (4u8..=12, 2u8..=24).prop_flat_map(|(w, h)| {
        // Full rows are common enough to matter: each row is either all
        // filled or a random mix.
        let row = prop_oneof![
            prop::collection::vec(1u8..=8, w as usize),
            prop::collection::vec(0u8..=8, w as usize),
        ];
        (Just(w), Just(h), prop::collection::vec(row, h as usize))
    })
}

proptest! {
    #[test]
    fn clear_removes_exactly_the_full_rows((w, h, rows) in grid()) {
        let flat: Vec<u8> = rows.iter().flatten().copied().collect();
        let mut board = Board::from_u8(w, h, &flat).unwrap();

        let kept: Vec<Vec<u8>> = rows.iter().filter(|r| r.contains(&0)).cloned().collect();
        let full = rows.len() - kept.len();

        prop_assert_eq!(board.clear_full_rows(), full);

        let mut expected = vec![vec![0u8; w as usize]; full];
        expected.extend(kept);
        prop_assert_eq!(rows_of(&board), expected);
    }

    #[test]
    fn garbage_adds_clamped_rows_with_one_hole((w, h, rows) in grid(), lines in 0usize..40, seed in any::<u32>()) {
        let flat: Vec<u8> = rows.iter().flatten().copied().collect();
        let mut board = Board::from_u8(w, h, &flat).unwrap();
        let mut rng = SimpleRng::new(seed);

        let injected = board.inject_garbage(lines, &mut rng);
        prop_assert_eq!(injected, lines.min(h as usize - 1));

        let after = rows_of(&board);
        let surviving = h as usize - injected;
        prop_assert_eq!(&after[..surviving], &rows[injected..]);
        for row in &after[surviving..] {
            prop_assert_eq!(row.iter().filter(|&&v| v == 0).count(), 1);
            prop_assert!(row.iter().all(|&v| v == 0 || v == 8));
        }
    }
}
