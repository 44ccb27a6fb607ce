//! Axis geometry and the shared legality algorithms
//!
//! Pieces do not carry their own geometry. A piece type declares which axes it
//! may travel (see `pieces::AXIS_*`) and whether it slides along one axis or
//! leaps along two; the functions here answer the board questions for it.
//! All "between" queries exclude both endpoints.

use crate::board::{Board, Square};
use crate::pieces::{Piece, AXIS_DIAGONAL, AXIS_HORIZONTAL, AXIS_VERTICAL};

/// Shape of a move from one square to another
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Displacement {
    Stationary,
    Horizontal(u8),
    Vertical(u8),
    Diagonal(u8),
    /// Both axes change by different amounts
    Mixed,
}

impl Displacement {
    pub fn classify(from: Square, to: Square) -> Self {
        let dr = (to.row - from.row).unsigned_abs();
        let dc = (to.col - from.col).unsigned_abs();
        match (dr, dc) {
            (0, 0) => Displacement::Stationary,
            (0, n) => Displacement::Horizontal(n),
            (n, 0) => Displacement::Vertical(n),
            (r, c) if r == c => Displacement::Diagonal(r),
            _ => Displacement::Mixed,
        }
    }

    /// Axis bit and step count, if the move follows a single axis
    pub fn axis(self) -> Option<(u8, u8)> {
        match self {
            Displacement::Horizontal(n) => Some((AXIS_HORIZONTAL, n)),
            Displacement::Vertical(n) => Some((AXIS_VERTICAL, n)),
            Displacement::Diagonal(n) => Some((AXIS_DIAGONAL, n)),
            Displacement::Stationary | Displacement::Mixed => None,
        }
    }
}

// ============================================================================
// HORIZONTAL
// ============================================================================

/// Occupied squares strictly between two columns of a row
pub fn horizontal_count(board: &Board, row: i8, from_col: i8, to_col: i8) -> usize {
    let (lo, hi) = (from_col.min(to_col), from_col.max(to_col));
    (lo + 1..hi)
        .filter(|&col| board.has_piece(Square::new(row, col)))
        .count()
}

pub fn horizontal_clear(board: &Board, row: i8, from_col: i8, to_col: i8) -> bool {
    horizontal_count(board, row, from_col, to_col) == 0
}

// ============================================================================
// VERTICAL
// ============================================================================

/// Occupied squares on `col` from `start_row` to `end_row`, both inclusive.
/// An empty range counts zero.
pub fn vertical_count_between_rows(board: &Board, col: i8, start_row: i8, end_row: i8) -> usize {
    (start_row..=end_row)
        .filter(|&row| board.has_piece(Square::new(row, col)))
        .count()
}

/// Occupied squares strictly between two rows of a column
pub fn vertical_count(board: &Board, col: i8, from_row: i8, to_row: i8) -> usize {
    let (lo, hi) = (from_row.min(to_row), from_row.max(to_row));
    vertical_count_between_rows(board, col, lo + 1, hi - 1)
}

pub fn vertical_clear(board: &Board, col: i8, from_row: i8, to_row: i8) -> bool {
    vertical_count(board, col, from_row, to_row) == 0
}

// ============================================================================
// DIAGONAL
// ============================================================================

/// No piece strictly between two squares on a shared diagonal.
///
/// The sign pair of (drow, dcol) picks the axis: equal signs walk the
/// top-left/bottom-right diagonal, opposite signs the bottom-left/top-right one.
pub fn diagonal_clear(board: &Board, from: Square, to: Square) -> bool {
    let step_row = (to.row - from.row).signum();
    let step_col = (to.col - from.col).signum();
    let distance = (to.col - from.col).abs();
    (1..distance).all(|i| !board.has_piece(from.offset(i * step_row, i * step_col)))
}

/// Clear path along whichever single axis joins the squares
pub fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    match Displacement::classify(from, to) {
        Displacement::Horizontal(_) => horizontal_clear(board, from.row, from.col, to.col),
        Displacement::Vertical(_) => vertical_clear(board, from.col, from.row, to.row),
        Displacement::Diagonal(_) => diagonal_clear(board, from, to),
        Displacement::Stationary => true,
        Displacement::Mixed => false,
    }
}

// ============================================================================
// LEGALITY
// ============================================================================

fn lands_on_own_piece(board: &Board, piece: &Piece, to: Square) -> bool {
    board.piece(to).is_some_and(|occupant| occupant.side() == piece.side())
}

/// Default rule for pieces that travel one axis per move:
/// confinement, own-piece landing, axis capability, step limit, then blocking.
pub fn single_direction_legal(board: &Board, piece: &Piece, from: Square, to: Square) -> bool {
    let pt = piece.piece_type();

    if !pt.confinement.permits(board, piece.side(), to) {
        return false;
    }
    if lands_on_own_piece(board, piece, to) {
        return false;
    }

    let Some((axis, steps)) = Displacement::classify(from, to).axis() else {
        return false;
    };
    if pt.axes & axis == 0 || !piece.allowed_steps().allows(steps) {
        return false;
    }

    path_clear(board, from, to)
}

/// Default rule for leapers moving `ratio` squares on one axis and one on
/// the other. Intervening pieces are ignored.
///
/// A 4x2 move has the right ratio but is rejected: the shorter leg must be a
/// single square.
pub fn two_direction_legal(board: &Board, piece: &Piece, from: Square, to: Square, ratio: u8) -> bool {
    if lands_on_own_piece(board, piece, to) {
        return false;
    }

    let dr = (to.row - from.row).unsigned_abs();
    let dc = (to.col - from.col).unsigned_abs();
    let (long, short) = (dr.max(dc), dr.min(dc));

    short == 1 && long == ratio
}
