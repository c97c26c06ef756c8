//! gridq CLI - train tabular Q-learning agents on grid world layouts

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gridq")]
#[command(version, about = "Tabular Q-learning for turn-based grid games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent, then evaluate it once learning freezes
    Train(gridq::cli::commands::train::TrainArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => gridq::cli::commands::train::execute(args),
    }
}
