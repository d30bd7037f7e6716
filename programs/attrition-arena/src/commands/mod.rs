//! Subcommands and the flags they share

pub mod evolve;
pub mod matrix;
pub mod replay;

use clap::Args;
use contest_logic::config::{
    MAX_ROUNDS, PROBE_PROB, P_INJURY, SCRATCH, SERIOUS_INJURY, TIME_BONUS_DECREMENT,
    TIME_BONUS_START, WIN_PAYOFF,
};
use contest_logic::{ContestConfig, Score, StrategyKind};

/// Seed used when none is given on the command line
pub const DEFAULT_SEED: u64 = 42;

/// Contest rules, one flag per constant
#[derive(Args, Clone, Debug)]
pub struct RulesArgs {
    /// Rounds before a contest is declared a draw
    #[arg(long, default_value_t = MAX_ROUNDS)]
    pub max_rounds: usize,
    /// Chance that a dangerous act seriously injures the opponent
    #[arg(long, default_value_t = P_INJURY)]
    pub injury_probability: f64,
    #[arg(long, default_value_t = WIN_PAYOFF, allow_negative_numbers = true)]
    pub win_payoff: Score,
    #[arg(long, default_value_t = SERIOUS_INJURY, allow_negative_numbers = true)]
    pub injury_penalty: Score,
    #[arg(long, default_value_t = SCRATCH, allow_negative_numbers = true)]
    pub scratch_penalty: Score,
    /// Bonus for a win in the first round
    #[arg(long, default_value_t = TIME_BONUS_START, allow_negative_numbers = true)]
    pub time_bonus_start: Score,
    /// Bonus lost per elapsed round
    #[arg(long, default_value_t = TIME_BONUS_DECREMENT, allow_negative_numbers = true)]
    pub time_bonus_decrement: Score,
    /// Chance that a Prober-Retaliator opens with an escalation
    #[arg(long, default_value_t = PROBE_PROB)]
    pub probe_probability: f64,
}

impl RulesArgs {
    pub fn contest_config(&self) -> ContestConfig {
        ContestConfig {
            max_rounds: self.max_rounds,
            injury_probability: self.injury_probability,
            win_payoff: self.win_payoff,
            injury_penalty: self.injury_penalty,
            scratch_penalty: self.scratch_penalty,
            time_bonus_start: self.time_bonus_start,
            time_bonus_decrement: self.time_bonus_decrement,
            probe_probability: self.probe_probability,
        }
    }
}

/// The given kinds, or the full canonical roster when none were given
pub fn roster(kinds: &[StrategyKind]) -> Vec<StrategyKind> {
    if kinds.is_empty() {
        StrategyKind::ALL.to_vec()
    } else {
        kinds.to_vec()
    }
}
