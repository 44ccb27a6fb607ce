//! GRIDCHESS CLI - Command-line interface
//!
//! Commands:
//! - show: Print a variant's board
//! - play: Apply a scripted list of moves
//! - moves: List where a piece may move
//! - threats: List the pieces attacking a square
//! - export: Write an opening layout as JSON

mod export_cmd;
mod inspect_cmd;
mod play_cmd;
mod render;
mod setup;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use export_cmd::ExportArgs;
use inspect_cmd::InspectArgs;
use play_cmd::PlayArgs;
use setup::BoardArgs;

#[derive(Parser)]
#[command(name = "gridchess")]
#[command(about = "Move legality for European chess and Xiangqi")]
struct Cli {
    /// Log filter (overrides RUST_LOG), e.g. `debug` or `gridchess_core=trace`
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the starting board
    Show(BoardArgs),
    /// Apply moves in order and print the result
    Play(PlayArgs),
    /// List legal destinations of the piece on a square
    Moves(InspectArgs),
    /// List the pieces that could capture the piece on a square
    Threats(InspectArgs),
    /// Write a variant's opening layout to a JSON file
    Export(ExportArgs),
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Show(args) => {
            let session = args.start(None)?;
            println!("{}", render::render_board(&session.board));
            println!("{} to move", session.rules.current_turn());
            Ok(())
        }
        Commands::Play(args) => play_cmd::run(args),
        Commands::Moves(args) => inspect_cmd::run_moves(args),
        Commands::Threats(args) => inspect_cmd::run_threats(args),
        Commands::Export(args) => export_cmd::run(args),
    }
}
