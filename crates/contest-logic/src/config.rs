//! Contest and population parameters
//!
//! The constants reproduce the reference experiment. `ContestConfig` and
//! `EvolutionConfig` default to them and are validated once, before a run.

use serde::{Deserialize, Serialize};
use crate::error::ConfigError;
use crate::strategy::StrategyKind;
use crate::Score;

/// Maximum decision rounds in one contest
pub const MAX_ROUNDS: usize = 10;
/// Chance that a single dangerous act seriously injures the opponent
pub const P_INJURY: f64 = 0.1;
/// Payoff for winning, before the time bonus
pub const WIN_PAYOFF: Score = 60;
/// Payoff for being seriously injured
pub const SERIOUS_INJURY: Score = -100;
/// Payoff for absorbing a dangerous act without injury
pub const SCRATCH: Score = -2;
/// Time bonus for a win in round 0
pub const TIME_BONUS_START: Score = 20;
/// Time bonus lost per elapsed round
pub const TIME_BONUS_DECREMENT: Score = 2;
/// Chance that a Prober-Retaliator opens with a dangerous act
pub const PROBE_PROB: f64 = 0.05;

/// Contests per ordered pair in the static payoff matrix
pub const CONTESTS_PER_MATCHUP: usize = 5000;
/// Individuals per generation
pub const POPULATION_SIZE: usize = 200;
/// Generations per evolutionary run
pub const GENERATIONS: usize = 50;
/// Chance per generation that the mutation step fires
pub const MUTATION_RATE: f64 = 0.01;
/// Added to mean payoff before normalization
pub const FITNESS_SHIFT: f64 = 100.0;
/// Lowest fitness any kind can have
pub const FITNESS_FLOOR: f64 = 0.01;
/// Share of the source kind's frequency moved by one mutation
pub const MUTATION_FRACTION: f64 = 0.1;
/// Absolute cap on the frequency moved by one mutation
pub const MUTATION_CAP: f64 = 0.05;

/// Rules of a single contest
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContestConfig {
    pub max_rounds: usize,
    pub injury_probability: f64,
    pub win_payoff: Score,
    pub injury_penalty: Score,
    pub scratch_penalty: Score,
    pub time_bonus_start: Score,
    pub time_bonus_decrement: Score,
    pub probe_probability: f64,
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            injury_probability: P_INJURY,
            win_payoff: WIN_PAYOFF,
            injury_penalty: SERIOUS_INJURY,
            scratch_penalty: SCRATCH,
            time_bonus_start: TIME_BONUS_START,
            time_bonus_decrement: TIME_BONUS_DECREMENT,
            probe_probability: PROBE_PROB,
        }
    }
}

impl ContestConfig {
    /// Decaying bonus for a win in `round` (0-indexed), never negative
    pub fn time_bonus(&self, round: usize) -> Score {
        let elapsed = Score::try_from(round).unwrap_or(Score::MAX);
        self.time_bonus_start
            .saturating_sub(self.time_bonus_decrement.saturating_mul(elapsed))
            .max(0)
    }

    /// Total awarded to the winner of a contest decided in `round`
    pub fn win_award(&self, round: usize) -> Score {
        self.win_payoff.saturating_add(self.time_bonus(round))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::ZeroRoundCap);
        }
        check_probability("injury probability", self.injury_probability)?;
        check_probability("probe probability", self.probe_probability)?;
        if self.time_bonus_decrement < 0 {
            return Err(ConfigError::NegativeBonusDecrement(self.time_bonus_decrement));
        }
        Ok(())
    }
}

/// Rules of the evolutionary loop
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_probability: f64,
    pub fitness_shift: f64,
    pub fitness_floor: f64,
    pub mutation_fraction: f64,
    pub mutation_cap: f64,
    /// Kind that receives frequency when the mutation step fires
    pub mutation_sink: StrategyKind,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: POPULATION_SIZE,
            generations: GENERATIONS,
            mutation_probability: MUTATION_RATE,
            fitness_shift: FITNESS_SHIFT,
            fitness_floor: FITNESS_FLOOR,
            mutation_fraction: MUTATION_FRACTION,
            mutation_cap: MUTATION_CAP,
            mutation_sink: StrategyKind::Hawk,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        check_probability("mutation probability", self.mutation_probability)?;
        check_probability("mutation fraction", self.mutation_fraction)?;
        check_probability("mutation cap", self.mutation_cap)?;
        if self.mutation_probability > 0.0 {
            if self.mutation_fraction == 0.0 {
                return Err(ConfigError::InertMutation { name: "mutation fraction", value: 0.0 });
            }
            if self.mutation_cap == 0.0 {
                return Err(ConfigError::InertMutation { name: "mutation cap", value: 0.0 });
            }
        }
        if !self.fitness_shift.is_finite() {
            return Err(ConfigError::NonFinite { name: "fitness shift", value: self.fitness_shift });
        }
        if !(self.fitness_floor.is_finite() && self.fitness_floor > 0.0) {
            return Err(ConfigError::InvalidFitnessFloor(self.fitness_floor));
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}
