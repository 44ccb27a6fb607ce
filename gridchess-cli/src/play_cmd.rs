//! Play command - apply a scripted list of moves
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: apply_moves(), report_results()
//! - Level 3: apply_one(), formatting

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use thiserror::Error;

use gridchess_core::{Layout, ParseSquareError, Side, Square};

use crate::render::render_board;
use crate::setup::{BoardArgs, Session};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Piece a promoting pawn becomes (Q, R, B or N; anything else keeps the pawn)
    #[arg(long, value_name = "LABEL")]
    pub promote: Option<char>,

    /// Stop at the first rejected move
    #[arg(long)]
    pub strict: bool,

    /// Output the final position as JSON
    #[arg(long)]
    pub json: bool,

    /// Moves as `row,col-row,col`, applied in order
    #[arg(value_name = "MOVE")]
    pub moves: Vec<MoveSpec>,
}

/// A move from one square to another
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MoveSpec {
    pub from: Square,
    pub to: Square,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("expected `row,col-row,col`, got {0:?}")]
    Format(String),
    #[error(transparent)]
    Square(#[from] ParseSquareError),
}

impl FromStr for MoveSpec {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once('-')
            .ok_or_else(|| ParseMoveError::Format(s.to_string()))?;
        Ok(MoveSpec {
            from: from.parse()?,
            to: to.parse()?,
        })
    }
}

impl fmt::Display for MoveSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// What happened to one move
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub number: usize,
    pub mv: MoveSpec,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let mut session = args.board.start(args.promote)?;

    tracing::info!(
        "Playing {} moves on {} ({} to move)",
        args.moves.len(),
        session.variant(),
        session.rules.current_turn()
    );

    let outcomes = apply_moves(&mut session, &args.moves, args.strict)?;

    report_results(&session, &outcomes, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Apply every move in order; rejected moves are skipped, or fatal when strict
pub fn apply_moves(session: &mut Session, moves: &[MoveSpec], strict: bool) -> Result<Vec<MoveOutcome>> {
    let mut outcomes = Vec::with_capacity(moves.len());

    for (i, &mv) in moves.iter().enumerate() {
        let outcome = apply_one(session, i + 1, mv);

        if let Some(reason) = &outcome.reason {
            if strict {
                bail!("Move {} ({}) rejected: {}", outcome.number, mv, reason);
            }
            tracing::warn!("Move {} ({}) rejected: {}", outcome.number, mv, reason);
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

fn report_results(session: &Session, outcomes: &[MoveOutcome], json: bool) -> Result<()> {
    if json {
        print_json_results(session, outcomes)
    } else {
        print_text_results(session, outcomes);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn apply_one(session: &mut Session, number: usize, mv: MoveSpec) -> MoveOutcome {
    let reason = if session.check_square(mv.from).is_err() || session.check_square(mv.to).is_err() {
        Some("square off the board".to_string())
    } else if !session.board.has_piece(mv.from) {
        Some(format!("no piece on {}", mv.from))
    } else {
        let mover = session.rules.current_turn();
        if session.rules.make_move(&mut session.board, mv.from, mv.to) {
            tracing::debug!("{}. {} {}", number, mover, mv);
            None
        } else {
            Some(format!("illegal for {} to move", mover))
        }
    };

    MoveOutcome {
        number,
        mv,
        applied: reason.is_none(),
        reason,
    }
}

fn print_json_results(session: &Session, outcomes: &[MoveOutcome]) -> Result<()> {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        applied: usize,
        rejected: usize,
        to_move: Side,
        moves: &'a [MoveOutcome],
        position: Layout,
    }

    let applied = outcomes.iter().filter(|o| o.applied).count();
    let to_move = session.rules.current_turn();
    let output = JsonOutput {
        applied,
        rejected: outcomes.len() - applied,
        to_move,
        moves: outcomes,
        position: Layout::from_board(
            format!("{} after {} moves", session.layout.name, applied),
            session.variant(),
            to_move,
            &session.board,
        ),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text_results(session: &Session, outcomes: &[MoveOutcome]) {
    let applied = outcomes.iter().filter(|o| o.applied).count();

    println!("{}", render_board(&session.board));
    println!("Applied {} of {} moves", applied, outcomes.len());
    for outcome in outcomes.iter().filter(|o| !o.applied) {
        if let Some(reason) = &outcome.reason {
            println!("  {}. {} rejected: {}", outcome.number, outcome.mv, reason);
        }
    }
    println!("{} to move", session.rules.current_turn());
}

// ============================================================================
// TESTS
// ============================================================================
