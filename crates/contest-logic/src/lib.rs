//! Contest Logic for the Attrition Arena
//!
//! Core game logic for the war-of-attrition simulation:
//! - Strategies and the round-by-round contest resolver
//! - Pairwise payoff averaging
//! - Replicator-style evolution of strategy frequencies

mod averager;
pub mod config;
mod contest;
mod error;
mod evolution;
mod random;
mod strategy;

pub use averager::{average_payoff, payoff_matrix, PayoffMatrix};
pub use config::{ContestConfig, EvolutionConfig};
pub use contest::{resolve, ContestResult, Ending, RoundRecord, Side};
pub use error::{ConfigError, EngineError};
pub use evolution::{Distribution, Engine, GenerationRecord, KindTally, Mutation};
pub use random::SeededRng;
pub use strategy::{
    Bully, Contestant, Hawk, LongRetaliator, Mouse, Move, ProberRetaliator, Retaliator, Strategy,
    StrategyKind,
};

/// Points scored in a contest
pub type Score = i32;
