//! `replay`: one contest, round by round

use anyhow::{Context, Result};
use clap::Args;
use contest_logic::{resolve, ContestResult, Ending, SeededRng, Side, StrategyKind};
use rand::SeedableRng;

use super::{RulesArgs, DEFAULT_SEED};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Side A, which rolls first
    pub kind_a: StrategyKind,
    /// Side B
    pub kind_b: StrategyKind,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
    /// Print the contest as JSON
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub rules: RulesArgs,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let config = args.rules.contest_config();
    config.validate().context("invalid contest rules")?;
    log::info!("{:<32}{} vs {}, seed {}", "replaying contest", args.kind_a, args.kind_b, args.seed);

    let mut rng = SeededRng::seed_from_u64(args.seed);
    let mut a = args.kind_a.spawn(&config);
    let mut b = args.kind_b.spawn(&config);
    let result = resolve(&mut a, &mut b, &config, &mut rng);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render(args.kind_a, args.kind_b, &result));
    }
    Ok(())
}

fn render(kind_a: StrategyKind, kind_b: StrategyKind, result: &ContestResult) -> String {
    let name = |side: Side| match side {
        Side::A => kind_a,
        Side::B => kind_b,
    };
    let mut out = format!("{:<8}{:<20}{:<20}\n", "round", kind_a, kind_b);
    for record in &result.rounds {
        out.push_str(&format!(
            "{:<8}{:<20}{:<20}\n",
            record.round,
            format!("{:?} ({})", record.move_a, record.cumulative_a),
            format!("{:?} ({})", record.move_b, record.cumulative_b),
        ));
    }
    let ending = match result.ending {
        Ending::MutualRetreat { round } => format!("both retreated in round {}", round),
        Ending::Retreat { loser, round } => format!("{} retreated in round {}", name(loser), round),
        Ending::Injury { victim, round } => format!("{} was injured in round {}", name(victim), round),
        Ending::RoundCap => "round cap reached".to_string(),
    };
    out.push_str(&format!("{}; final score {} to {}\n", ending, result.score_a, result.score_b));
    out
}
