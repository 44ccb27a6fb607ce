//! Integration tests for Xiangqi
//!
//! Opening captures, confined pieces and the flying-general rule

use gridchess_core::{column_kings, Board, GameRules, Piece, PieceKind, Side, Square, Xiangqi};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

fn opening() -> (Xiangqi, Board) {
    let rules = Xiangqi::new();
    let mut board = Board::for_rules(&rules);
    rules.start_game(&mut board);
    (rules, board)
}

/// Empty board with both generals and the given extra pieces
fn generals_at(north: (i8, i8), south: (i8, i8), extra: &[(PieceKind, Side, (i8, i8))]) -> (Xiangqi, Board) {
    let rules = Xiangqi::new();
    let mut board = Board::for_rules(&rules);
    board.add_piece(Piece::new(PieceKind::General, Side::North), sq(north.0, north.1));
    board.add_piece(Piece::new(PieceKind::General, Side::South), sq(south.0, south.1));
    for &(kind, side, (row, col)) in extra {
        board.add_piece(Piece::new(kind, side), sq(row, col));
    }
    (rules, board)
}

// ============================================================================
// OPENING TESTS
// ============================================================================

#[test]
fn test_cannon_takes_horse_over_screen() {
    let (mut rules, mut board) = opening();
    // The north cannon on 2,1 is the only screen
    assert!(rules.make_move(&mut board, sq(7, 1), sq(0, 1)));
    assert_eq!(board.piece(sq(0, 1)).unwrap().kind(), PieceKind::Cannon);
    assert_eq!(board.pieces().count(), 31);

    // Chariot recaptures
    assert!(rules.make_move(&mut board, sq(0, 0), sq(0, 1)));
    assert_eq!(board.piece(sq(0, 1)).unwrap().side(), Side::North);
}

#[test]
fn test_cannon_cannot_slide_to_capture() {
    let (mut rules, mut board) = opening();
    // 7,7 -> 3,7 is a plain slide; nothing to capture there
    assert!(rules.make_move(&mut board, sq(7, 7), sq(3, 7)));
    assert!(rules.make_move(&mut board, sq(3, 0), sq(4, 0)));
    // Adjacent soldier on 3,8 needs a screen
    assert!(!rules.make_move(&mut board, sq(3, 7), sq(3, 8)));
}

#[test]
fn test_horse_and_elephant_from_home() {
    let (rules, board) = opening();
    assert_eq!(rules.legal_destinations(&board, sq(9, 1)), vec![sq(7, 0), sq(7, 2)]);
    assert_eq!(rules.legal_destinations(&board, sq(9, 2)), vec![sq(7, 0), sq(7, 4)]);
    assert_eq!(rules.legal_destinations(&board, sq(9, 3)), vec![sq(8, 4)]);
    // The general may only step forward inside the palace
    assert_eq!(rules.legal_destinations(&board, sq(9, 4)), vec![sq(8, 4)]);
}

#[test]
fn test_soldier_crosses_river() {
    let (mut rules, mut board) = opening();
    assert!(rules.make_move(&mut board, sq(6, 0), sq(5, 0)));
    assert!(rules.make_move(&mut board, sq(3, 8), sq(4, 8)));
    assert!(!rules.make_move(&mut board, sq(5, 0), sq(5, 1)));
    assert!(rules.make_move(&mut board, sq(5, 0), sq(4, 0)));
    // North soldier has crossed too
    assert!(rules.make_move(&mut board, sq(4, 8), sq(5, 8)));
    assert!(rules.make_move(&mut board, sq(4, 0), sq(4, 1)));
    assert!(rules.make_move(&mut board, sq(5, 8), sq(5, 7)));
    assert!(!rules.make_move(&mut board, sq(4, 1), sq(5, 1)));
}

// ============================================================================
// FLYING GENERAL TESTS
// ============================================================================

#[test]
fn test_general_cannot_face_across_open_file() {
    let (mut rules, mut board) = generals_at((0, 3), (9, 4), &[]);
    assert!(!rules.make_move(&mut board, sq(9, 4), sq(9, 3)));
    assert_eq!(rules.current_turn(), Side::South);

    // One blocking piece on the file makes the same move legal
    board.add_piece(Piece::new(PieceKind::Soldier, Side::North), sq(5, 3));
    assert!(rules.make_move(&mut board, sq(9, 4), sq(9, 3)));
    assert_eq!(rules.current_turn(), Side::North);
}

#[test]
fn test_sole_blocker_cannot_step_aside() {
    let (mut rules, mut board) = generals_at((1, 4), (8, 4), &[(PieceKind::Horse, Side::South, (5, 4))]);
    assert!(!rules.make_move(&mut board, sq(5, 4), sq(3, 5)));
    assert!(!rules.make_move(&mut board, sq(5, 4), sq(7, 3)));

    board.add_piece(Piece::new(PieceKind::Cannon, Side::North), sq(4, 4));
    assert!(rules.make_move(&mut board, sq(5, 4), sq(7, 3)));
}

#[test]
fn test_general_capture_of_sole_blocker() {
    let (mut rules, mut board) = generals_at((0, 4), (9, 4), &[(PieceKind::Soldier, Side::North, (8, 4))]);
    assert!(!rules.make_move(&mut board, sq(9, 4), sq(8, 4)));
    assert!(board.piece(sq(8, 4)).is_some_and(|p| p.kind() == PieceKind::Soldier));

    // Another blocker further up lets the general take it
    board.add_piece(Piece::new(PieceKind::Elephant, Side::North), sq(2, 4));
    assert!(rules.make_move(&mut board, sq(9, 4), sq(8, 4)));
}

#[test]
fn test_general_may_capture_facing_general() {
    let (mut rules, mut board) = generals_at((2, 4), (7, 4), &[]);
    let kings = column_kings(&board, 4);
    assert_eq!(kings.span(), Some((2, 7)));
    // Out of reach for a one-step general
    assert!(!rules.make_move(&mut board, sq(7, 4), sq(2, 4)));

    // A general standing next to the other is always fair game
    let (mut rules, mut board) = generals_at((7, 4), (7, 3), &[]);
    assert!(rules.make_move(&mut board, sq(7, 3), sq(7, 4)));
    assert_eq!(board.find(Side::North, PieceKind::General), None);
}

#[test]
fn test_opening_general_file_is_screened() {
    let (rules, board) = opening();
    let kings = column_kings(&board, 4);
    assert!(kings.north_king_on_column() && kings.south_king_on_column());
    assert!(rules.permits_move(&board, sq(6, 4), sq(5, 4)));
    // Two soldiers stand between the generals, so either may leave
    assert!(rules.permits_move(&board, sq(3, 4), sq(3, 3)));
}
