//! Attrition Arena CLI
//!
//! Payoff tables, evolutionary runs and single-contest replays for the
//! war-of-attrition strategies in `contest_logic`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{evolve, matrix, replay};

#[derive(Parser)]
#[command(name = "attrition-arena")]
#[command(about = "War-of-attrition contests between fixed strategies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mean payoff to each row kind against each column kind
    Matrix(matrix::MatrixArgs),
    /// Evolve strategy frequencies over generations
    Evolve(evolve::EvolveArgs),
    /// Play one contest and show it round by round
    Replay(replay::ReplayArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Commands::Matrix(args) => matrix::run(args),
        Commands::Evolve(args) => evolve::run(args),
        Commands::Replay(args) => replay::run(args),
    }
}
