//! `matrix`: the kind × kind payoff table

use anyhow::{Context, Result};
use clap::Args;
use contest_logic::config::CONTESTS_PER_MATCHUP;
use contest_logic::{payoff_matrix, SeededRng, StrategyKind};
use rand::SeedableRng;

use super::{roster, RulesArgs, DEFAULT_SEED};

#[derive(Args, Debug)]
pub struct MatrixArgs {
    /// Kinds to compare, comma separated (all six when omitted)
    #[arg(long, value_delimiter = ',')]
    pub kinds: Vec<StrategyKind>,
    /// Contests per ordered pair
    #[arg(long, default_value_t = CONTESTS_PER_MATCHUP)]
    pub trials: usize,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
    /// Print the matrix as JSON instead of a table
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub rules: RulesArgs,
}

pub fn run(args: MatrixArgs) -> Result<()> {
    let roster = roster(&args.kinds);
    let config = args.rules.contest_config();
    log::info!(
        "{:<32}{} kinds, {} contests per pair, seed {}",
        "computing payoff matrix",
        roster.len(),
        args.trials,
        args.seed
    );

    let mut rng = SeededRng::seed_from_u64(args.seed);
    let matrix = payoff_matrix(&roster, args.trials, &config, &mut rng)
        .context("invalid payoff matrix request")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matrix)?);
    } else {
        print!("{}", matrix);
    }
    Ok(())
}
