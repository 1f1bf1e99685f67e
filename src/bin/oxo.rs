//! oxo CLI - play perfect Tic-Tac-Toe or analyze positions

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Perfect-play Tic-Tac-Toe engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the engine
    Play,

    /// Analyze optimal moves and opening outcomes
    Analyze(oxo::cli::commands::analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play => oxo::cli::commands::play::execute(),
        Commands::Analyze(args) => oxo::cli::commands::analyze::execute(args),
    }
}
