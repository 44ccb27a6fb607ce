//! Xiangqi rules, including the flying-general constraint

use crate::board::{Board, Square};
use crate::confinement::fortress_rows;
use crate::game::{GameRules, Side};
use crate::movement::vertical_count;
use crate::pieces::{Piece, PieceKind};

pub const XIANGQI_ROWS: i8 = 10;
pub const XIANGQI_COLUMNS: i8 = 9;

/// Back rank, west to east, for both sides
const BACK_RANK: [PieceKind; 9] = [
    PieceKind::Rook,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Guard,
    PieceKind::General,
    PieceKind::Guard,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Rook,
];

const CANNON_COLUMNS: [i8; 2] = [1, 7];
const SOLDIER_COLUMNS: [i8; 5] = [0, 2, 4, 6, 8];

// ============================================================================
// COLUMN ANALYSIS
// ============================================================================

/// Where the generals stand on one column, if they do
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnKings {
    pub north_king_row: Option<i8>,
    pub south_king_row: Option<i8>,
}

impl ColumnKings {
    pub fn north_king_on_column(&self) -> bool {
        self.north_king_row.is_some()
    }

    pub fn south_king_on_column(&self) -> bool {
        self.south_king_row.is_some()
    }

    pub fn row_of(&self, side: Side) -> Option<i8> {
        match side {
            Side::North => self.north_king_row,
            _ => self.south_king_row,
        }
    }

    /// Rows of both generals, lower first, when they share the column
    pub fn span(&self) -> Option<(i8, i8)> {
        let (north, south) = (self.north_king_row?, self.south_king_row?);
        Some((north.min(south), north.max(south)))
    }
}

/// Scan each side's fortress rows on `col` for that side's general
pub fn column_kings(board: &Board, col: i8) -> ColumnKings {
    let king_row = |side: Side| {
        fortress_rows(board, side).find(|&row| {
            board
                .piece(Square::new(row, col))
                .is_some_and(|piece| piece.kind() == PieceKind::General && piece.side() == side)
        })
    };
    ColumnKings {
        north_king_row: king_row(Side::North),
        south_king_row: king_row(Side::South),
    }
}

/// Check if a move keeps the generals from facing down an open column.
///
/// Only the three ways a legal move can open a file are examined: a general
/// stepping onto the other's column, a piece leaving the column as the
/// last blocker, and a general capturing that last blocker.
pub fn generals_stay_apart(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.piece(from) else {
        return true;
    };

    if piece.kind() != PieceKind::General {
        if from.col == to.col {
            return true;
        }
        return !is_last_blocker(board, from);
    }

    let target = board.piece(to);
    if target.is_some_and(|t| t.kind() == PieceKind::General && t.side() != piece.side()) {
        return true;
    }

    if from.col != to.col {
        let kings = column_kings(board, to.col);
        match kings.row_of(piece.side().opponent()) {
            Some(row) => vertical_count(board, to.col, to.row, row) > 0,
            None => true,
        }
    } else if target.is_some() {
        !is_last_blocker(board, to)
    } else {
        true
    }
}

/// True if `square` holds the only piece between two generals on its column
fn is_last_blocker(board: &Board, square: Square) -> bool {
    let Some((top, bottom)) = column_kings(board, square.col).span() else {
        return false;
    };
    top < square.row && square.row < bottom && vertical_count(board, square.col, top, bottom) == 1
}

// ============================================================================
// RULES
// ============================================================================

pub struct Xiangqi {
    current_turn: Side,
}

impl Xiangqi {
    pub fn new() -> Self {
        Self {
            current_turn: Side::South,
        }
    }
}

impl Default for Xiangqi {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRules for Xiangqi {
    fn num_rows(&self) -> i8 {
        XIANGQI_ROWS
    }

    fn num_columns(&self) -> i8 {
        XIANGQI_COLUMNS
    }

    fn current_turn(&self) -> Side {
        self.current_turn
    }

    fn set_current_turn(&mut self, side: Side) {
        self.current_turn = side;
    }

    fn start_game(&self, board: &mut Board) {
        let last = board.rows() - 1;
        // (side, back rank, cannon row, soldier row)
        let ranks = [(Side::North, 0, 2, 3), (Side::South, last, last - 2, last - 3)];
        for (side, back, cannons, soldiers) in ranks {
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                board.add_piece(Piece::new(kind, side), Square::new(back, col as i8));
            }
            for col in CANNON_COLUMNS {
                board.add_piece(Piece::new(PieceKind::Cannon, side), Square::new(cannons, col));
            }
            for col in SOLDIER_COLUMNS {
                board.add_piece(Piece::new(PieceKind::Soldier, side), Square::new(soldiers, col));
            }
        }
    }

    fn permits_move(&self, board: &Board, from: Square, to: Square) -> bool {
        let apart = generals_stay_apart(board, from, to);
        if !apart {
            tracing::trace!("{} -> {} would leave the generals facing", from, to);
        }
        apart
    }
}
