//! Sides, turn order and the move-application contract shared by variants

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::pieces::Piece;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player, named by the board edge it starts from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    South,
    East,
    West,
}

impl Side {
    /// Side that moves after this one
    pub fn opponent(self) -> Self {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
            Side::East => Side::West,
            Side::West => Side::East,
        }
    }

    /// Unit (drow, dcol) step toward the opposite edge
    pub fn forward(self) -> (i8, i8) {
        match self {
            Side::North => (1, 0),
            Side::South => (-1, 0),
            Side::East => (0, -1),
            Side::West => (0, 1),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::North => "north",
            Side::South => "south",
            Side::East => "east",
            Side::West => "west",
        };
        f.write_str(name)
    }
}

// ============================================================================
// GAME RULES
// ============================================================================

/// Rules of one variant: board size, turn state and move application.
///
/// Variants supply the required methods and may override `permits_move`
/// (extra legality on top of the piece's own rules) and `after_placement`
/// (work once a moved piece has landed). Moves name their piece by the
/// square it stands on.
pub trait GameRules {
    fn num_rows(&self) -> i8;

    fn num_columns(&self) -> i8;

    fn current_turn(&self) -> Side;

    fn set_current_turn(&mut self, side: Side);

    /// Put the opening layout on an empty board
    fn start_game(&self, board: &mut Board);

    /// Whether a player may drop a selected piece for another
    fn can_change_selection(&self, _piece: &Piece) -> bool {
        true
    }

    /// Check if `piece` may be played to `to`: it must belong to the side to move
    fn legal_piece_to_play(&self, piece: &Piece, _to: Square) -> bool {
        piece.side() == self.current_turn()
    }

    /// Variant-wide gate, consulted after the piece's own rules accept the move
    fn permits_move(&self, _board: &Board, _from: Square, _to: Square) -> bool {
        true
    }

    /// Hook run once the moving piece rests on `to`, before the turn passes
    fn after_placement(&mut self, _board: &mut Board, _to: Square) {}

    /// Apply a move if it is legal and return whether it was made.
    ///
    /// A rejected move leaves board and turn untouched. An accepted one
    /// lifts the piece, drops it on `to` (replacing any occupant), runs the
    /// piece's post-move hook and `after_placement`, then passes the turn.
    fn make_move(&mut self, board: &mut Board, from: Square, to: Square) -> bool {
        let Some(piece) = board.piece(from) else {
            tracing::debug!("Rejected {} -> {}: no piece on {}", from, to, from);
            return false;
        };

        if !self.legal_piece_to_play(piece, to) {
            tracing::debug!(
                "Rejected {} -> {}: {} moves, not {}",
                from,
                to,
                self.current_turn(),
                piece.side()
            );
            return false;
        }
        if !piece.is_legal_move(board, to) {
            tracing::debug!("Rejected {} -> {}: not a legal {} move", from, to, piece);
            return false;
        }
        if !self.permits_move(board, from, to) {
            tracing::debug!("Rejected {} -> {}: forbidden by variant rules", from, to);
            return false;
        }

        if let Some(piece) = board.remove_piece(from) {
            if let Some(captured) = board.add_piece(piece, to) {
                tracing::trace!("{} captured on {}", captured, to);
            }
        }
        if let Some(piece) = board.piece_mut(to) {
            piece.on_move_completed();
        }
        self.after_placement(board, to);

        let mover = self.current_turn();
        self.set_current_turn(mover.opponent());
        tracing::trace!("{} played {} -> {}", mover, from, to);

        true
    }

    /// Every square the piece on `from` could move to right now, ignoring
    /// whose turn it is
    fn legal_destinations(&self, board: &Board, from: Square) -> Vec<Square> {
        let Some(piece) = board.piece(from) else {
            return vec![];
        };
        board
            .squares()
            .filter(|&to| piece.is_legal_move(board, to) && self.permits_move(board, from, to))
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{DisplayToken, PieceKind};

    /// Bare 8x8 rules with no opening layout
    struct OpenField {
        turn: Side,
    }

    impl GameRules for OpenField {
        fn num_rows(&self) -> i8 {
            8
        }
        fn num_columns(&self) -> i8 {
            8
        }
        fn current_turn(&self) -> Side {
            self.turn
        }
        fn set_current_turn(&mut self, side: Side) {
            self.turn = side;
        }
        fn start_game(&self, _board: &mut Board) {}
    }

    #[test]
    fn test_opponent_toggles_pairs() {
        assert_eq!(Side::North.opponent(), Side::South);
        assert_eq!(Side::South.opponent(), Side::North);
        assert_eq!(Side::East.opponent(), Side::West);
        assert_eq!(Side::West.opponent(), Side::East);
    }

    #[test]
    fn test_turn_alternation() {
        let mut rules = OpenField { turn: Side::South };
        let mut board = Board::for_rules(&rules);
        board.add_piece(Piece::new(PieceKind::Rook, Side::South), Square::new(7, 0));
        board.add_piece(Piece::new(PieceKind::Rook, Side::North), Square::new(0, 7));

        // North may not move out of turn
        assert!(!rules.make_move(&mut board, Square::new(0, 7), Square::new(3, 7)));
        assert_eq!(rules.current_turn(), Side::South);
        assert!(board.has_piece(Square::new(0, 7)));

        assert!(rules.make_move(&mut board, Square::new(7, 0), Square::new(4, 0)));
        assert_eq!(rules.current_turn(), Side::North);
        assert!(!board.has_piece(Square::new(7, 0)));
        assert_eq!(board.piece(Square::new(4, 0)).unwrap().location(), Some(Square::new(4, 0)));

        assert!(rules.make_move(&mut board, Square::new(0, 7), Square::new(0, 3)));
        assert_eq!(rules.current_turn(), Side::South);
    }

    #[test]
    fn test_illegal_move_leaves_state() {
        let mut rules = OpenField { turn: Side::South };
        let mut board = Board::for_rules(&rules);
        board.add_piece(Piece::new(PieceKind::Bishop, Side::South), Square::new(7, 2));

        assert!(!rules.make_move(&mut board, Square::new(7, 2), Square::new(6, 2)));
        assert!(!rules.make_move(&mut board, Square::new(5, 5), Square::new(4, 4)));
        assert_eq!(rules.current_turn(), Side::South);
        assert!(board.has_piece(Square::new(7, 2)));
        assert!(!board.has_piece(Square::new(6, 2)));
    }

    #[test]
    fn test_capture_replaces_occupant() {
        let mut rules = OpenField { turn: Side::South };
        let mut board = Board::for_rules(&rules);
        board.add_piece(Piece::new(PieceKind::Queen, Side::South), Square::new(3, 0));
        board.add_piece(Piece::new(PieceKind::Pawn, Side::North), Square::new(5, 2));

        assert!(rules.make_move(&mut board, Square::new(3, 0), Square::new(5, 2)));
        let queen = board.piece(Square::new(5, 2)).unwrap();
        assert_eq!(queen.kind(), PieceKind::Queen);
        assert!(queen.has_moved());
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn test_display_token_survives_move() {
        let mut rules = OpenField { turn: Side::South };
        let mut board = Board::for_rules(&rules);
        let knight = Piece::new(PieceKind::Knight, Side::South).with_token(DisplayToken(7));
        board.add_piece(knight, Square::new(7, 1));

        assert!(rules.make_move(&mut board, Square::new(7, 1), Square::new(5, 2)));
        assert_eq!(board.piece(Square::new(5, 2)).unwrap().token(), Some(DisplayToken(7)));
    }

    #[test]
    fn test_pawn_loses_double_step_after_moving() {
        let mut rules = OpenField { turn: Side::South };
        let mut board = Board::for_rules(&rules);
        board.add_piece(Piece::new(PieceKind::Pawn, Side::South), Square::new(6, 4));
        board.add_piece(Piece::new(PieceKind::Pawn, Side::North), Square::new(1, 0));

        assert!(rules.make_move(&mut board, Square::new(6, 4), Square::new(5, 4)));
        assert!(rules.make_move(&mut board, Square::new(1, 0), Square::new(3, 0)));
        assert!(!rules.make_move(&mut board, Square::new(5, 4), Square::new(3, 4)));
        assert!(rules.make_move(&mut board, Square::new(5, 4), Square::new(4, 4)));
    }

    #[test]
    fn test_legal_destinations() {
        let rules = OpenField { turn: Side::North };
        let mut board = Board::for_rules(&rules);
        board.add_piece(Piece::new(PieceKind::Knight, Side::South), Square::new(7, 1));
        board.add_piece(Piece::new(PieceKind::Pawn, Side::South), Square::new(5, 2));

        let moves = rules.legal_destinations(&board, Square::new(7, 1));
        assert_eq!(moves, vec![Square::new(5, 0), Square::new(6, 3)]);
        assert!(rules.legal_destinations(&board, Square::new(0, 0)).is_empty());
    }

    #[test]
    fn test_selection_can_change() {
        let rules = OpenField { turn: Side::South };
        assert!(rules.can_change_selection(&Piece::new(PieceKind::King, Side::North)));
    }
}
