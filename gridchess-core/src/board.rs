//! Rectangular board geometry and piece placement

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{GameRules, Side};
use crate::pieces::{Piece, PieceKind};

/// Board coordinates. Row 0 is the north edge, column 0 the west edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Square shifted by (drow, dcol); may fall off the board
    pub fn offset(&self, drow: i8, dcol: i8) -> Square {
        Square::new(self.row + drow, self.col + dcol)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Failure to parse a `row,col` pair
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSquareError {
    #[error("expected `row,col`, got {0:?}")]
    Format(String),
    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| ParseSquareError::Format(s.to_string()))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<i8>()
                .map_err(|_| ParseSquareError::Coordinate(part.trim().to_string()))
        };
        Ok(Square::new(parse(row)?, parse(col)?))
    }
}

/// Fixed-size grid of piece slots, indexed [row][column]
#[derive(Clone, Debug)]
pub struct Board {
    rows: i8,
    cols: i8,
    slots: Vec<Option<Piece>>,
}

impl Board {
    pub fn new(rows: i8, cols: i8) -> Self {
        assert!(rows > 0 && cols > 0, "board must have at least one square");
        Self {
            rows,
            cols,
            slots: vec![None; rows as usize * cols as usize],
        }
    }

    /// Empty board sized for a variant
    pub fn for_rules<R: GameRules + ?Sized>(rules: &R) -> Self {
        Self::new(rules.num_rows(), rules.num_columns())
    }

    pub fn rows(&self) -> i8 {
        self.rows
    }

    pub fn cols(&self) -> i8 {
        self.cols
    }

    /// Check if the square lies on this board
    pub fn contains(&self, square: Square) -> bool {
        (0..self.rows).contains(&square.row) && (0..self.cols).contains(&square.col)
    }

    fn index(&self, square: Square) -> usize {
        assert!(
            self.contains(square),
            "square {} is outside the {}x{} board",
            square,
            self.rows,
            self.cols
        );
        square.row as usize * self.cols as usize + square.col as usize
    }

    fn square_at(&self, index: usize) -> Square {
        let cols = self.cols as usize;
        Square::new((index / cols) as i8, (index % cols) as i8)
    }

    // ========================================================================
    // PLACEMENT
    // ========================================================================

    /// Place a piece, returning whatever occupied the square before.
    ///
    /// No legality is checked here: an occupant is simply replaced, which is
    /// how a capture lands once the rules have accepted it.
    pub fn add_piece(&mut self, mut piece: Piece, square: Square) -> Option<Piece> {
        let idx = self.index(square);
        piece.set_location(square);
        self.slots[idx].replace(piece)
    }

    /// Clear a square and return its previous occupant
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let idx = self.index(square);
        self.slots[idx].take()
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn has_piece(&self, square: Square) -> bool {
        self.slots[self.index(square)].is_some()
    }

    pub fn piece(&self, square: Square) -> Option<&Piece> {
        self.slots[self.index(square)].as_ref()
    }

    pub fn piece_mut(&mut self, square: Square) -> Option<&mut Piece> {
        let idx = self.index(square);
        self.slots[idx].as_mut()
    }

    /// Every square in row-major order
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Square::new(row, col)))
    }

    /// Occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| slot.as_ref().map(|piece| (self.square_at(i), piece)))
    }

    /// First square holding a piece of this kind and side
    pub fn find(&self, side: Side, kind: PieceKind) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.side() == side && piece.kind() == kind)
            .map(|(square, _)| square)
    }

    /// Squares of pieces not on `side` that could legally capture on `square`
    pub fn attackers(&self, square: Square, side: Side) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |(_, other)| other.side() != side && other.is_legal_capture_move(self, square))
            .map(|(from, _)| from)
    }

    /// True if any piece of another side than `piece` can capture on `square`.
    ///
    /// Scans the whole board; boards here are at most 90 squares.
    pub fn square_threatened(&self, square: Square, piece: &Piece) -> bool {
        self.attackers(square, piece.side()).next().is_some()
    }
}
