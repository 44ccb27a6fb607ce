//! Shared board setup for every subcommand
//!
//! Resolves `--variant` / `--layout` into rules and a populated board.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};

use gridchess_core::{Board, EuropeanChess, FixedChooser, GameRules, Layout, Square, Variant};

// ============================================================================
// ARGUMENTS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    European,
    Xiangqi,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::European => Variant::European,
            VariantArg::Xiangqi => Variant::Xiangqi,
        }
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct BoardArgs {
    /// Rule set (defaults to the layout's, or european)
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,

    /// Starting position JSON file instead of the opening layout
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,
}

/// Rules and board for one invocation
pub struct Session {
    pub layout: Layout,
    pub rules: Box<dyn GameRules>,
    pub board: Board,
}

impl Session {
    pub fn variant(&self) -> Variant {
        self.layout.variant
    }

    /// Fail with a readable error instead of letting the board panic
    pub fn check_square(&self, square: Square) -> Result<()> {
        if !self.board.contains(square) {
            bail!(
                "square {} is off the {}x{} {} board",
                square,
                self.board.rows(),
                self.board.cols(),
                self.variant()
            );
        }
        Ok(())
    }
}

// ============================================================================
// SETUP
// ============================================================================

impl BoardArgs {
    /// Layout named by the arguments
    pub fn resolve_layout(&self) -> Result<Layout> {
        let Some(path) = &self.layout else {
            let variant = self.variant.map(Variant::from).unwrap_or_default();
            return Ok(Layout::opening(variant));
        };

        let layout = Layout::load(path)?;
        if let Some(requested) = self.variant.map(Variant::from) {
            if requested != layout.variant {
                bail!(
                    "--variant {} conflicts with {} layout {}",
                    requested,
                    layout.variant,
                    path.display()
                );
            }
        }
        Ok(layout)
    }

    /// Build rules and board, with `promote` answering promotions
    pub fn start(&self, promote: Option<char>) -> Result<Session> {
        let layout = self.resolve_layout()?;
        let rules = build_rules(layout.variant, promote);
        let (rules, board) = layout
            .start_with(rules)
            .with_context(|| format!("Failed to set up layout '{}'", layout.name))?;

        tracing::info!(
            "Loaded {} ({}, {} pieces)",
            layout.name,
            layout.variant,
            board.pieces().count()
        );
        Ok(Session { layout, rules, board })
    }
}

fn build_rules(variant: Variant, promote: Option<char>) -> Box<dyn GameRules> {
    match (variant, promote) {
        (Variant::European, Some(label)) => {
            Box::new(EuropeanChess::with_chooser(Box::new(FixedChooser(label))))
        }
        (Variant::Xiangqi, Some(label)) => {
            tracing::warn!("Ignoring --promote {}: xiangqi has no promotion", label);
            variant.rules()
        }
        (_, None) => variant.rules(),
    }
}
