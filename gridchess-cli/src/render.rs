//! Plain-text board rendering
//!
//! North pieces print in lowercase, every other side in uppercase. Marked
//! squares show `*` when empty and an `x` before the piece when occupied.

use std::fmt::Write;

use gridchess_core::{Board, Piece, Side, Square};

fn piece_char(piece: &Piece) -> char {
    match piece.side() {
        Side::North => piece.label().to_ascii_lowercase(),
        _ => piece.label().to_ascii_uppercase(),
    }
}

/// Render the board with no marks
pub fn render_board(board: &Board) -> String {
    render_marked(board, &[])
}

/// Render the board, highlighting `marks`
pub fn render_marked(board: &Board, marks: &[Square]) -> String {
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..board.cols() {
        let _ = write!(out, "{:>2}", col);
    }
    out.push('\n');

    for row in 0..board.rows() {
        let _ = write!(out, "{:>2} ", row);
        for col in 0..board.cols() {
            let square = Square::new(row, col);
            let marked = marks.contains(&square);
            let cell = match (board.piece(square), marked) {
                (Some(piece), true) => format!("x{}", piece_char(piece)),
                (Some(piece), false) => format!(" {}", piece_char(piece)),
                (None, true) => " *".to_string(),
                (None, false) => " .".to_string(),
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out
}
