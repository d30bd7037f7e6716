//! `evolve`: replicator dynamics over a roster of kinds

use anyhow::{Context, Result};
use clap::Args;
use contest_logic::config::{GENERATIONS, MUTATION_RATE, POPULATION_SIZE};
use contest_logic::{Distribution, Engine, EvolutionConfig, SeededRng, StrategyKind};
use rand::SeedableRng;

use super::{roster, RulesArgs, DEFAULT_SEED};

#[derive(Args, Debug)]
pub struct EvolveArgs {
    /// Kinds in the initial population, equally weighted (all six when omitted)
    #[arg(long, value_delimiter = ',')]
    pub kinds: Vec<StrategyKind>,
    /// Individuals sampled per generation
    #[arg(long, default_value_t = POPULATION_SIZE)]
    pub population: usize,
    #[arg(long, default_value_t = GENERATIONS)]
    pub generations: usize,
    /// Chance per generation that the mutation step fires
    #[arg(long, default_value_t = MUTATION_RATE)]
    pub mutation_rate: f64,
    /// Kind that receives frequency from mutation
    #[arg(long, default_value_t = StrategyKind::Hawk)]
    pub mutation_sink: StrategyKind,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
    /// Print one JSON generation record per line instead of percentages
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub rules: RulesArgs,
}

impl EvolveArgs {
    fn evolution_config(&self) -> EvolutionConfig {
        EvolutionConfig {
            population_size: self.population,
            generations: self.generations,
            mutation_probability: self.mutation_rate,
            mutation_sink: self.mutation_sink,
            ..Default::default()
        }
    }
}

pub fn run(args: EvolveArgs) -> Result<()> {
    let initial = Distribution::uniform(&roster(&args.kinds)).context("invalid roster")?;
    let mut engine = Engine::new(initial, args.rules.contest_config(), args.evolution_config())
        .context("invalid evolution settings")?;
    log::info!(
        "{:<32}{} individuals, {} generations, seed {}",
        "starting evolutionary run",
        args.population,
        args.generations,
        args.seed
    );

    let mut rng = SeededRng::seed_from_u64(args.seed);
    for _ in 0..args.generations {
        let record = engine.step(&mut rng)?;
        if args.json {
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("Generation {}:", record.generation);
            print!("{}", record.distribution);
        }
    }

    if !args.json {
        println!("Final population distribution after evolutionary simulation:");
        print!("{}", engine.distribution());
    }
    Ok(())
}
