//! European chess rules

use crate::board::{Board, Square};
use crate::game::{GameRules, Side};
use crate::pieces::{promotion_kind, Piece, PieceKind};

pub const EUROPEAN_ROWS: i8 = 8;
pub const EUROPEAN_COLUMNS: i8 = 8;

/// Back rank, west to east, for both sides
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::King,
    PieceKind::Queen,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

// ============================================================================
// PROMOTION
// ============================================================================

/// Asked what a pawn reaching the far rank becomes.
///
/// The answer is a piece label; Q, R, B and N promote, anything else leaves
/// the pawn as it is.
pub trait PromotionChooser {
    fn choose(&mut self, side: Side, square: Square) -> char;
}

/// Always gives the same answer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedChooser(pub char);

impl Default for FixedChooser {
    fn default() -> Self {
        Self('Q')
    }
}

impl PromotionChooser for FixedChooser {
    fn choose(&mut self, _side: Side, _square: Square) -> char {
        self.0
    }
}

// ============================================================================
// RULES
// ============================================================================

pub struct EuropeanChess {
    current_turn: Side,
    chooser: Box<dyn PromotionChooser>,
}

impl EuropeanChess {
    pub fn new() -> Self {
        Self::with_chooser(Box::new(FixedChooser::default()))
    }

    pub fn with_chooser(chooser: Box<dyn PromotionChooser>) -> Self {
        Self {
            current_turn: Side::South,
            chooser,
        }
    }
}

impl Default for EuropeanChess {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRules for EuropeanChess {
    fn num_rows(&self) -> i8 {
        EUROPEAN_ROWS
    }

    fn num_columns(&self) -> i8 {
        EUROPEAN_COLUMNS
    }

    fn current_turn(&self) -> Side {
        self.current_turn
    }

    fn set_current_turn(&mut self, side: Side) {
        self.current_turn = side;
    }

    fn start_game(&self, board: &mut Board) {
        let last = board.rows() - 1;
        let ranks = [(Side::North, 0, 1), (Side::South, last, last - 1)];
        for (side, back, pawns) in ranks {
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                let col = col as i8;
                board.add_piece(Piece::new(kind, side), Square::new(back, col));
                board.add_piece(Piece::new(PieceKind::Pawn, side), Square::new(pawns, col));
            }
        }
    }

    /// Promote a pawn that has just reached the far rank
    fn after_placement(&mut self, board: &mut Board, to: Square) {
        let Some(piece) = board.piece(to) else {
            return;
        };
        if piece.kind() != PieceKind::Pawn {
            return;
        }
        let side = piece.side();
        let (dr, dc) = side.forward();
        if board.contains(to.offset(dr, dc)) {
            return;
        }

        let answer = self.chooser.choose(side, to);
        let kind = promotion_kind(answer);
        if kind == PieceKind::Pawn {
            tracing::debug!("{} pawn on {} stays a pawn (chose {:?})", side, to, answer);
            return;
        }

        let mut promoted = Piece::new(kind, side);
        promoted.on_move_completed();
        board.add_piece(promoted, to);
        tracing::debug!("{} pawn promoted on {}", side, to);
    }
}
