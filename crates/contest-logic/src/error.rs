//! Error types
//!
//! Configuration problems are rejected at the boundary, before a run starts.
//! Strategy contract violations are bugs and panic instead.

use thiserror::Error;
use crate::strategy::StrategyKind;
use crate::Score;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("roster is empty")]
    EmptyRoster,

    #[error("{0} appears more than once in the roster")]
    DuplicateKind(StrategyKind),

    #[error("unknown strategy kind `{0}`")]
    UnknownKind(String),

    #[error("frequency of {kind} is {value}, expected a finite value >= 0")]
    InvalidFrequency { kind: StrategyKind, value: f64 },

    #[error("frequencies sum to {0}, expected 1")]
    NotNormalized(f64),

    #[error("trial count must be at least 1")]
    ZeroTrials,

    #[error("generation count must be at least 1")]
    ZeroGenerations,

    #[error("population size {0} is too small, need at least 2")]
    PopulationTooSmall(usize),

    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("round cap must be at least 1")]
    ZeroRoundCap,

    #[error("fitness floor must be finite and > 0, got {0}")]
    InvalidFitnessFloor(f64),

    #[error("time bonus decrement must be >= 0, got {0}")]
    NegativeBonusDecrement(Score),

    #[error("{name} must be > 0 while mutation is enabled, got {value}")]
    InertMutation { name: &'static str, value: f64 },

    #[error("mutation sink {0} is not in the roster")]
    MutationSinkMissing(StrategyKind),
}

/// Failure while advancing the evolutionary engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot fill population shortfall: {0}")]
    Sampling(String),
}
