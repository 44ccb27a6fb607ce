//! GRIDCHESS Core - Move legality for grid chess variants
//!
//! This crate provides the rule engine shared by European chess and Xiangqi:
//! - Board geometry (rectangular grid, row 0 at the north edge)
//! - Piece types as capability descriptors (axes, step limits, confinement)
//! - Shared sliding/leaping legality plus per-piece special rules
//! - Turn state machine with variant hooks (promotion, flying general)
//! - JSON layouts for custom starting positions

pub mod board;
pub mod pieces;
pub mod movement;
pub mod confinement;
pub mod game;
pub mod european;
pub mod xiangqi;
pub mod layout;

// Re-exports for convenient access
pub use board::{Board, ParseSquareError, Square};
pub use pieces::{get_piece_type, kind_from_label, DisplayToken, Piece, PieceKind, PieceType, PIECE_TYPES};
pub use game::{GameRules, Side};
pub use european::{EuropeanChess, FixedChooser, PromotionChooser};
pub use xiangqi::{column_kings, ColumnKings, Xiangqi};
pub use layout::{Layout, LayoutError, Placement, Variant};
