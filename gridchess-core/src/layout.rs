//! Layout - board positions as JSON files

use std::fmt;
use std::path::Path;

use anyhow::Context;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Square};
use crate::european::{EuropeanChess, EUROPEAN_COLUMNS, EUROPEAN_ROWS};
use crate::game::{GameRules, Side};
use crate::pieces::{kind_from_label, Piece};
use crate::xiangqi::{Xiangqi, XIANGQI_COLUMNS, XIANGQI_ROWS};

/// Supported rule sets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    European,
    Xiangqi,
}

impl Variant {
    /// Fresh rules for this variant, turn at its starting side
    pub fn rules(self) -> Box<dyn GameRules> {
        match self {
            Variant::European => Box::new(EuropeanChess::new()),
            Variant::Xiangqi => Box::new(Xiangqi::new()),
        }
    }

    /// (rows, columns)
    pub fn dimensions(self) -> (i8, i8) {
        match self {
            Variant::European => (EUROPEAN_ROWS, EUROPEAN_COLUMNS),
            Variant::Xiangqi => (XIANGQI_ROWS, XIANGQI_COLUMNS),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::European => "european",
            Variant::Xiangqi => "xiangqi",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("unknown piece label {label:?} on {square}")]
    UnknownLabel { label: char, square: Square },
    #[error("square {square} is outside the {rows}x{cols} {variant} board")]
    OutOfBounds {
        square: Square,
        rows: i8,
        cols: i8,
        variant: Variant,
    },
    #[error("more than one piece on {0}")]
    DuplicateSquare(Square),
    #[error("{side} cannot move first: {variant} is played by north and south")]
    UnplayableTurn { side: Side, variant: Variant },
    #[error("{variant} layout needs a {rows}x{cols} board, the rules give {rule_rows}x{rule_cols}")]
    VariantMismatch {
        variant: Variant,
        rows: i8,
        cols: i8,
        rule_rows: i8,
        rule_cols: i8,
    },
}

/// One piece of a layout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub label: char,
    pub side: Side,
    pub square: Square,
}

fn default_first_turn() -> Side {
    Side::South
}

/// A named board position for a variant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    pub variant: Variant,
    #[serde(default = "default_first_turn")]
    pub first_turn: Side,
    pub placements: Vec<Placement>,
}

impl Layout {
    /// The variant's opening position
    pub fn opening(variant: Variant) -> Self {
        let rules = variant.rules();
        let mut board = Board::for_rules(rules.as_ref());
        rules.start_game(&mut board);
        Self::from_board(format!("{} opening", variant), variant, rules.current_turn(), &board)
    }

    /// Snapshot of the pieces currently on a board
    pub fn from_board(name: impl Into<String>, variant: Variant, first_turn: Side, board: &Board) -> Self {
        let placements = board
            .pieces()
            .map(|(square, piece)| Placement {
                label: piece.piece_type().label,
                side: piece.side(),
                square,
            })
            .collect();
        Self {
            name: name.into(),
            variant,
            first_turn,
            placements,
        }
    }

    /// Check that a variant side moves first and that every placement names
    /// a known piece on a free square of the variant's board
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !matches!(self.first_turn, Side::North | Side::South) {
            return Err(LayoutError::UnplayableTurn {
                side: self.first_turn,
                variant: self.variant,
            });
        }

        let (rows, cols) = self.variant.dimensions();
        let mut seen = FxHashSet::default();

        for placement in &self.placements {
            let square = placement.square;
            if kind_from_label(placement.label).is_none() {
                return Err(LayoutError::UnknownLabel {
                    label: placement.label,
                    square,
                });
            }
            if !(0..rows).contains(&square.row) || !(0..cols).contains(&square.col) {
                return Err(LayoutError::OutOfBounds {
                    square,
                    rows,
                    cols,
                    variant: self.variant,
                });
            }
            if !seen.insert(square) {
                return Err(LayoutError::DuplicateSquare(square));
            }
        }
        Ok(())
    }

    /// Validate, then place every piece on the board
    pub fn apply(&self, board: &mut Board) -> Result<(), LayoutError> {
        self.validate()?;
        for placement in &self.placements {
            if let Some(kind) = kind_from_label(placement.label) {
                board.add_piece(Piece::new(kind, placement.side), placement.square);
            }
        }
        Ok(())
    }

    /// Default rules for the variant on a board holding this layout
    pub fn start(&self) -> Result<(Box<dyn GameRules>, Board), LayoutError> {
        self.start_with(self.variant.rules())
    }

    /// Like `start`, with caller-built rules sized for the same variant
    pub fn start_with(&self, mut rules: Box<dyn GameRules>) -> Result<(Box<dyn GameRules>, Board), LayoutError> {
        let (rows, cols) = self.variant.dimensions();
        let (rule_rows, rule_cols) = (rules.num_rows(), rules.num_columns());
        if (rule_rows, rule_cols) != (rows, cols) {
            return Err(LayoutError::VariantMismatch {
                variant: self.variant,
                rows,
                cols,
                rule_rows,
                rule_cols,
            });
        }

        rules.set_current_turn(self.first_turn);
        let mut board = Board::for_rules(rules.as_ref());
        self.apply(&mut board)?;
        tracing::debug!(
            "Started {} layout '{}' with {} pieces, {} to move",
            self.variant,
            self.name,
            self.placements.len(),
            self.first_turn
        );
        Ok((rules, board))
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout {}", path.display()))?;
        let layout: Layout = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse layout {}", path.display()))?;
        layout
            .validate()
            .with_context(|| format!("Invalid layout {}", path.display()))?;
        Ok(layout)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write layout {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::PieceKind;

    fn placement(label: char, side: Side, row: i8, col: i8) -> Placement {
        Placement {
            label,
            side,
            square: Square::new(row, col),
        }
    }

    fn layout(variant: Variant, placements: Vec<Placement>) -> Layout {
        Layout {
            name: "test".to_string(),
            variant,
            first_turn: Side::South,
            placements,
        }
    }

    #[test]
    fn test_opening_matches_start_game() {
        let opening = Layout::opening(Variant::Xiangqi);
        assert_eq!(opening.placements.len(), 32);
        assert_eq!(opening.first_turn, Side::South);
        assert!(opening.validate().is_ok());
        assert!(opening.placements.contains(&placement('X', Side::North, 0, 4)));
        assert!(opening.placements.contains(&placement('C', Side::South, 7, 7)));
    }

    #[test]
    fn test_validate_errors() {
        let unknown = layout(Variant::European, vec![placement('Z', Side::North, 0, 0)]);
        assert_eq!(
            unknown.validate(),
            Err(LayoutError::UnknownLabel {
                label: 'Z',
                square: Square::new(0, 0)
            })
        );

        // On a xiangqi board row 9 exists, on a european one it does not
        let deep = layout(Variant::European, vec![placement('R', Side::South, 9, 0)]);
        assert!(matches!(deep.validate(), Err(LayoutError::OutOfBounds { rows: 8, .. })));
        let deep = layout(Variant::Xiangqi, vec![placement('R', Side::South, 9, 0)]);
        assert!(deep.validate().is_ok());

        let twice = layout(
            Variant::European,
            vec![placement('K', Side::North, 0, 3), placement('Q', Side::South, 0, 3)],
        );
        assert_eq!(twice.validate(), Err(LayoutError::DuplicateSquare(Square::new(0, 3))));
    }

    #[test]
    fn test_start_uses_first_turn() {
        let mut custom = layout(
            Variant::European,
            vec![placement('K', Side::North, 0, 3), placement('P', Side::North, 1, 0)],
        );
        custom.first_turn = Side::North;
        let (mut rules, mut board) = custom.start().unwrap();
        assert_eq!(rules.current_turn(), Side::North);
        assert_eq!(board.piece(Square::new(1, 0)).map(|p| p.kind()), Some(PieceKind::Pawn));
        assert!(rules.make_move(&mut board, Square::new(1, 0), Square::new(3, 0)));
    }

    #[test]
    fn test_start_with_rules_of_another_size() {
        let err = Layout::opening(Variant::Xiangqi)
            .start_with(Box::new(EuropeanChess::new()))
            .err();
        assert_eq!(
            err,
            Some(LayoutError::VariantMismatch {
                variant: Variant::Xiangqi,
                rows: 10,
                cols: 9,
                rule_rows: 8,
                rule_cols: 8,
            })
        );
        assert!(Layout::opening(Variant::Xiangqi).start_with(Box::new(Xiangqi::new())).is_ok());
    }

    #[test]
    fn test_east_or_west_cannot_move_first() {
        let mut opening = Layout::opening(Variant::European);
        opening.first_turn = Side::East;
        assert_eq!(
            opening.validate(),
            Err(LayoutError::UnplayableTurn {
                side: Side::East,
                variant: Variant::European
            })
        );
        assert!(opening.start().is_err());
        opening.first_turn = Side::North;
        assert!(opening.validate().is_ok());
    }

    #[test]
    fn test_first_turn_defaults_to_south() {
        let json = r#"{"name":"bare","variant":"xiangqi","placements":[{"label":"X","side":"north","square":{"row":0,"col":4}}]}"#;
        let parsed: Layout = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.first_turn, Side::South);
        assert_eq!(parsed.variant, Variant::Xiangqi);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("gridchess-layout-{}.json", std::process::id()));
        let opening = Layout::opening(Variant::European);
        opening.save(&path).unwrap();
        let loaded = Layout::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, opening);
    }

    #[test]
    fn test_load_rejects_invalid_layout() {
        let path = std::env::temp_dir().join(format!("gridchess-bad-{}.json", std::process::id()));
        let bad = layout(Variant::European, vec![placement('Z', Side::North, 0, 0)]);
        bad.save(&path).unwrap();
        let err = Layout::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(format!("{:#}", err).contains("unknown piece label"));
    }
}
