//! Export command - write a variant's opening layout as JSON

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use gridchess_core::{Layout, Variant};

use crate::setup::VariantArg;

#[derive(Args)]
pub struct ExportArgs {
    /// Rule set whose opening layout is written
    #[arg(long, value_enum, default_value = "european")]
    pub variant: VariantArg,

    /// Output JSON file
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,

    /// Layout name stored in the file
    #[arg(long)]
    pub name: Option<String>,
}

/// Run export command
pub fn run(args: ExportArgs) -> Result<()> {
    let layout = opening_layout(args.variant.into(), args.name);
    layout.save(&args.output)?;

    tracing::info!(
        "Wrote {} ({} pieces) to {}",
        layout.name,
        layout.placements.len(),
        args.output.display()
    );
    Ok(())
}

fn opening_layout(variant: Variant, name: Option<String>) -> Layout {
    let mut layout = Layout::opening(variant);
    if let Some(name) = name {
        layout.name = name;
    }
    layout
}
