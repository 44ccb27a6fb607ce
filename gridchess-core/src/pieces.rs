//! Piece type definitions and per-piece legality

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::confinement::{self, Confinement};
use crate::game::Side;
use crate::movement::{self, Displacement};

use self::MoveModel::{SingleDirection, TwoDirection};
use self::Steps::{Limited, Unlimited};

/// Axis bitmasks
pub const AXIS_HORIZONTAL: u8 = 1 << 0;
pub const AXIS_VERTICAL: u8 = 1 << 1;
pub const AXIS_DIAGONAL: u8 = 1 << 2;

pub const ORTHOGONAL: u8 = AXIS_HORIZONTAL | AXIS_VERTICAL;
pub const ALL_AXES: u8 = AXIS_HORIZONTAL | AXIS_VERTICAL | AXIS_DIAGONAL;

/// Per-move step limit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Steps {
    Limited(u8),
    Unlimited,
}

impl Steps {
    pub fn allows(self, taken: u8) -> bool {
        match self {
            Steps::Limited(max) => taken <= max,
            Steps::Unlimited => true,
        }
    }
}

/// Movement model
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveModel {
    SingleDirection,              // One axis per move, blocked by pieces
    TwoDirection { ratio: u8 },   // Both orthogonal axes at once, jumps
}

/// Rules layered over the movement model
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Special {
    None,
    Pawn,      // Forward only, double first step, diagonal capture
    Castling,  // European king hook
    Cannon,    // Captures over exactly one screen
    Elephant,  // Exactly its full step count
    Soldier,   // Forward only, sideways after the river
    Horse,     // Blocked on the first orthogonal leg
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
    General,
    Guard,
    Elephant,
    Horse,
    Cannon,
    Soldier,
}

/// Piece type definition
#[derive(Clone, Debug)]
pub struct PieceType {
    pub kind: PieceKind,
    pub label: char,
    pub name: &'static str,
    pub model: MoveModel,
    pub steps: Steps,
    pub axes: u8,
    pub confinement: Confinement,
    pub special: Special,
}

impl PieceType {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        kind: PieceKind,
        label: char,
        name: &'static str,
        model: MoveModel,
        steps: Steps,
        axes: u8,
        confinement: Confinement,
        special: Special,
    ) -> Self {
        Self {
            kind,
            label,
            name,
            model,
            steps,
            axes,
            confinement,
            special,
        }
    }
}

/// All piece types, in `PieceKind` order
pub static PIECE_TYPES: [PieceType; 12] = [
    // European
    PieceType::new(PieceKind::King, 'K', "King", SingleDirection, Limited(1), ALL_AXES, Confinement::None, Special::Castling),
    PieceType::new(PieceKind::Queen, 'Q', "Queen", SingleDirection, Unlimited, ALL_AXES, Confinement::None, Special::None),
    PieceType::new(PieceKind::Rook, 'R', "Rook", SingleDirection, Unlimited, ORTHOGONAL, Confinement::None, Special::None),
    PieceType::new(PieceKind::Bishop, 'B', "Bishop", SingleDirection, Unlimited, AXIS_DIAGONAL, Confinement::None, Special::None),
    PieceType::new(PieceKind::Knight, 'N', "Knight", TwoDirection { ratio: 2 }, Unlimited, ORTHOGONAL, Confinement::None, Special::None),
    PieceType::new(PieceKind::Pawn, 'P', "Pawn", SingleDirection, Limited(2), AXIS_VERTICAL, Confinement::None, Special::Pawn),
    // Xiangqi (the chariot is the European rook)
    PieceType::new(PieceKind::General, 'X', "General", SingleDirection, Limited(1), ORTHOGONAL, Confinement::Fortress, Special::None),
    PieceType::new(PieceKind::Guard, 'G', "Guard", SingleDirection, Limited(1), AXIS_DIAGONAL, Confinement::Fortress, Special::None),
    PieceType::new(PieceKind::Elephant, 'E', "Elephant", SingleDirection, Limited(2), AXIS_DIAGONAL, Confinement::River, Special::Elephant),
    PieceType::new(PieceKind::Horse, 'H', "Horse", TwoDirection { ratio: 2 }, Unlimited, ORTHOGONAL, Confinement::None, Special::Horse),
    PieceType::new(PieceKind::Cannon, 'C', "Cannon", SingleDirection, Unlimited, ORTHOGONAL, Confinement::None, Special::Cannon),
    PieceType::new(PieceKind::Soldier, 'S', "Soldier", SingleDirection, Limited(1), ORTHOGONAL, Confinement::None, Special::Soldier),
];

/// Get piece type for a kind
pub fn get_piece_type(kind: PieceKind) -> &'static PieceType {
    &PIECE_TYPES[kind as usize]
}

/// Get piece kind from its label
pub fn kind_from_label(label: char) -> Option<PieceKind> {
    PIECE_TYPES.iter().find(|pt| pt.label == label).map(|pt| pt.kind)
}

/// Kind a promoting pawn becomes for a chooser's answer.
/// Anything but Q, R, B, N (a king included) stays a pawn.
pub fn promotion_kind(label: char) -> PieceKind {
    match label.to_ascii_uppercase() {
        'Q' => PieceKind::Queen,
        'R' => PieceKind::Rook,
        'B' => PieceKind::Bishop,
        'N' => PieceKind::Knight,
        _ => PieceKind::Pawn,
    }
}

/// Caller-owned display handle; the engine never looks inside
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayToken(pub u64);

// ============================================================================
// PIECE
// ============================================================================

/// A piece, placed or not
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    kind: PieceKind,
    side: Side,
    label: char,
    location: Option<Square>,
    allowed_steps: Steps,
    has_moved: bool,
    token: Option<DisplayToken>,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Self {
        let pt = get_piece_type(kind);
        Self {
            kind,
            side,
            label: pt.label,
            location: None,
            allowed_steps: pt.steps,
            has_moved: false,
            token: None,
        }
    }

    pub fn with_token(mut self, token: DisplayToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn label(&self) -> char {
        self.label
    }

    pub fn piece_type(&self) -> &'static PieceType {
        get_piece_type(self.kind)
    }

    /// Current square; `None` until the board first places the piece
    pub fn location(&self) -> Option<Square> {
        self.location
    }

    pub(crate) fn set_location(&mut self, square: Square) {
        self.location = Some(square);
    }

    pub fn allowed_steps(&self) -> Steps {
        self.allowed_steps
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn token(&self) -> Option<DisplayToken> {
        self.token
    }

    // ========================================================================
    // LEGALITY
    // ========================================================================

    /// Check if this piece may move to `to` on its board, judged by its own
    /// movement and confinement rules. Turn order and variant-wide rules are
    /// the game rules' business.
    ///
    /// Panics if `to` is off the board.
    pub fn is_legal_move(&self, board: &Board, to: Square) -> bool {
        let target = board.piece(to);
        let Some(from) = self.location else {
            return false;
        };
        if from == to {
            return false;
        }

        let pt = self.piece_type();
        match pt.special {
            Special::Pawn => return self.pawn_move_legal(board, from, to),
            Special::Castling if self.is_castle_move(board, to) => return true,
            Special::Cannon => {
                if target.is_some_and(|occupant| occupant.side != self.side) {
                    return cannon_capture_legal(board, from, to);
                }
            }
            Special::Elephant => {
                let Steps::Limited(steps) = self.allowed_steps else {
                    return false;
                };
                if (to.col - from.col).unsigned_abs() != steps {
                    return false;
                }
            }
            Special::Soldier => {
                if !self.soldier_direction_legal(board, from, to) {
                    return false;
                }
            }
            Special::Horse => {
                if board.has_piece(horse_leg(from, to)) {
                    return false;
                }
            }
            Special::Castling | Special::None => {}
        }

        match pt.model {
            SingleDirection => movement::single_direction_legal(board, self, from, to),
            TwoDirection { ratio } => movement::two_direction_legal(board, self, from, to, ratio),
        }
    }

    /// Legal move onto an occupied square
    pub fn is_legal_capture_move(&self, board: &Board, to: Square) -> bool {
        self.is_legal_move(board, to) && board.has_piece(to)
    }

    /// Legal move onto an empty square
    pub fn is_legal_non_capture_move(&self, board: &Board, to: Square) -> bool {
        self.is_legal_move(board, to) && !board.has_piece(to)
    }

    /// Post-move hook, run once the piece has landed
    pub fn on_move_completed(&mut self) {
        if self.kind == PieceKind::Pawn && !self.has_moved {
            self.allowed_steps = Steps::Limited(1);
        }
        self.has_moved = true;
    }

    /// Castling is not supported; no king move ever qualifies.
    fn is_castle_move(&self, _board: &Board, _to: Square) -> bool {
        false
    }

    /// Signed distance toward the opponent's edge, and distance across it
    fn forward_and_lateral(&self, from: Square, to: Square) -> (i8, u8) {
        let (fr, fc) = self.side.forward();
        let (dr, dc) = (to.row - from.row, to.col - from.col);
        let forward = dr * fr + dc * fc;
        let lateral = if fr != 0 { dc.unsigned_abs() } else { dr.unsigned_abs() };
        (forward, lateral)
    }

    fn pawn_move_legal(&self, board: &Board, from: Square, to: Square) -> bool {
        let (forward, lateral) = self.forward_and_lateral(from, to);

        if lateral == 0 && forward > 0 && self.allowed_steps.allows(forward as u8) {
            // Straight advances never capture
            !board.has_piece(to) && movement::path_clear(board, from, to)
        } else if forward == 1 && lateral == 1 {
            board.piece(to).is_some_and(|occupant| occupant.side != self.side)
        } else {
            false
        }
    }

    fn soldier_direction_legal(&self, board: &Board, from: Square, to: Square) -> bool {
        let (forward, lateral) = self.forward_and_lateral(from, to);
        if forward < 0 {
            return false;
        }
        if forward == 0 && lateral > 0 {
            return confinement::crossed_river(board, self.side, from);
        }
        true
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side, self.piece_type().name)
    }
}

/// A cannon captures along a rank or file over exactly one screen
fn cannon_capture_legal(board: &Board, from: Square, to: Square) -> bool {
    match Displacement::classify(from, to) {
        Displacement::Horizontal(_) => movement::horizontal_count(board, from.row, from.col, to.col) == 1,
        Displacement::Vertical(_) => movement::vertical_count(board, from.col, from.row, to.row) == 1,
        _ => false,
    }
}

/// Square next to `from` along the longer leg of an L-shaped move
fn horse_leg(from: Square, to: Square) -> Square {
    let (dr, dc) = (to.row - from.row, to.col - from.col);
    if dc.abs() > dr.abs() {
        from.offset(0, dc.signum())
    } else {
        from.offset(dr.signum(), 0)
    }
}
