//! Board regions some pieces may never leave

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::game::Side;

/// Region restriction attached to a piece type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confinement {
    None,
    /// Own half of the board (rows split at the midpoint)
    River,
    /// 3x3 box on the middle columns at the side's near edge
    Fortress,
}

impl Confinement {
    /// Check if a piece of `side` may stand on `to`
    pub fn permits(self, board: &Board, side: Side, to: Square) -> bool {
        match self {
            Confinement::None => true,
            Confinement::River => within_river(board, side, to),
            Confinement::Fortress => in_fortress(board, side, to),
        }
    }
}

// Everything below treats NORTH as the top half and every other side as the
// bottom half; EAST/WEST have no region of their own.

/// Rows on a side's own bank of the river
pub fn river_rows(board: &Board, side: Side) -> RangeInclusive<i8> {
    let row_below_river = board.rows() / 2;
    match side {
        Side::North => 0..=row_below_river - 1,
        _ => row_below_river..=board.rows() - 1,
    }
}

pub fn within_river(board: &Board, side: Side, to: Square) -> bool {
    river_rows(board, side).contains(&to.row)
}

/// True once a piece stands on the far bank
pub fn crossed_river(board: &Board, side: Side, square: Square) -> bool {
    !within_river(board, side, square)
}

/// The three rows of a side's fortress
pub fn fortress_rows(board: &Board, side: Side) -> RangeInclusive<i8> {
    match side {
        Side::North => 0..=2,
        _ => board.rows() - 3..=board.rows() - 1,
    }
}

/// The three middle columns shared by both fortresses
pub fn fortress_cols(board: &Board) -> RangeInclusive<i8> {
    let start = board.cols() / 2 - 1;
    start..=start + 2
}

pub fn in_fortress(board: &Board, side: Side, square: Square) -> bool {
    fortress_rows(board, side).contains(&square.row) && fortress_cols(board).contains(&square.col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_river_split() {
        let board = Board::new(10, 9);
        assert_eq!(river_rows(&board, Side::North), 0..=4);
        assert_eq!(river_rows(&board, Side::South), 5..=9);
        assert!(within_river(&board, Side::North, Square::new(4, 0)));
        assert!(!within_river(&board, Side::North, Square::new(5, 0)));
        assert!(crossed_river(&board, Side::South, Square::new(4, 8)));
        assert!(!crossed_river(&board, Side::South, Square::new(5, 8)));
    }

    #[test]
    fn test_fortress_bounds() {
        let board = Board::new(10, 9);
        assert_eq!(fortress_cols(&board), 3..=5);
        assert!(in_fortress(&board, Side::North, Square::new(2, 3)));
        assert!(!in_fortress(&board, Side::North, Square::new(3, 4)));
        assert!(!in_fortress(&board, Side::North, Square::new(1, 6)));
        assert!(in_fortress(&board, Side::South, Square::new(7, 5)));
        assert!(!in_fortress(&board, Side::South, Square::new(2, 4)));
    }

    #[test]
    fn test_unconfined() {
        let board = Board::new(8, 8);
        assert!(Confinement::None.permits(&board, Side::North, Square::new(7, 7)));
    }
}
