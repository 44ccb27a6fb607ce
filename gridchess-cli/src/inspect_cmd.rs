//! Moves and threats commands - query one piece of a position

use anyhow::{anyhow, Result};
use clap::Args;
use serde::Serialize;

use gridchess_core::{Side, Square};

use crate::render::render_marked;
use crate::setup::{BoardArgs, Session};

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Square of the piece, as `row,col`
    #[arg(value_name = "SQUARE")]
    pub square: Square,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Squares related to one piece
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PieceReport {
    pub square: Square,
    pub piece: String,
    pub side: Side,
    pub squares: Vec<Square>,
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Run moves command
pub fn run_moves(args: InspectArgs) -> Result<()> {
    let session = args.board.start(None)?;
    let report = legal_moves(&session, args.square)?;
    tracing::info!("{} has {} legal moves", report.piece, report.squares.len());
    print_report(&session, &report, args.json, "can move to")
}

/// Run threats command
pub fn run_threats(args: InspectArgs) -> Result<()> {
    let session = args.board.start(None)?;
    let report = threats(&session, args.square)?;
    tracing::info!("{} is attacked by {} pieces", report.piece, report.squares.len());
    print_report(&session, &report, args.json, "is threatened from")
}

// ============================================================================
// QUERIES
// ============================================================================

/// Every legal destination of the piece on `square`, ignoring the turn
pub fn legal_moves(session: &Session, square: Square) -> Result<PieceReport> {
    let mut report = empty_report(session, square)?;
    report.squares = session.rules.legal_destinations(&session.board, square);
    Ok(report)
}

/// Squares of the opposing pieces that could capture on `square`
pub fn threats(session: &Session, square: Square) -> Result<PieceReport> {
    let mut report = empty_report(session, square)?;
    report.squares = session.board.attackers(square, report.side).collect();
    Ok(report)
}

fn empty_report(session: &Session, square: Square) -> Result<PieceReport> {
    session.check_square(square)?;
    let piece = session
        .board
        .piece(square)
        .ok_or_else(|| anyhow!("no piece on {}", square))?;
    Ok(PieceReport {
        square,
        piece: piece.to_string(),
        side: piece.side(),
        squares: Vec::new(),
    })
}

fn print_report(session: &Session, report: &PieceReport, json: bool, verb: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{}", render_marked(&session.board, &report.squares));
    if report.squares.is_empty() {
        println!("{} on {} {} nowhere", report.piece, report.square, verb);
    } else {
        let squares: Vec<String> = report.squares.iter().map(|s| s.to_string()).collect();
        println!("{} on {} {} {}", report.piece, report.square, verb, squares.join(" "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::VariantArg;

    fn session(variant: VariantArg) -> Session {
        BoardArgs {
            variant: Some(variant),
            layout: None,
        }
        .start(None)
        .unwrap()
    }

    #[test]
    fn test_legal_moves_report() {
        let session = session(VariantArg::Xiangqi);
        let report = legal_moves(&session, Square::new(9, 1)).unwrap();
        assert_eq!(report.piece, "south Horse");
        assert_eq!(report.squares, vec![Square::new(7, 0), Square::new(7, 2)]);
    }

    #[test]
    fn test_threats_report() {
        let session = session(VariantArg::Xiangqi);
        // The north cannon on 2,1 screens the horse on 0,1 from the south cannon
        let report = threats(&session, Square::new(0, 1)).unwrap();
        assert_eq!(report.side, Side::North);
        assert_eq!(report.squares, vec![Square::new(7, 1)]);
    }

    #[test]
    fn test_empty_and_off_board_squares() {
        let session = session(VariantArg::European);
        assert!(legal_moves(&session, Square::new(4, 4)).is_err());
        assert!(threats(&session, Square::new(8, 0)).is_err());
    }
}
