//! Contest execution engine

use serde::{Deserialize, Serialize};
use crate::config::ContestConfig;
use crate::random::SeededRng;
use crate::strategy::{Move, Strategy};
use crate::Score;

/// One side of a contest
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// How a contest ended; `round` is 0-indexed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    /// Both sides retreated in the same round. No one wins.
    MutualRetreat { round: usize },
    /// `loser` retreated alone and the other side collected the win award.
    Retreat { loser: Side, round: usize },
    /// A dangerous act seriously injured `victim`.
    Injury { victim: Side, round: usize },
    /// The round cap was reached with nobody retreating or injured.
    RoundCap,
}

impl Ending {
    pub fn winner(&self) -> Option<Side> {
        match *self {
            Ending::Retreat { loser, .. } => Some(loser.opponent()),
            Ending::Injury { victim, .. } => Some(victim.opponent()),
            Ending::MutualRetreat { .. } | Ending::RoundCap => None,
        }
    }
}

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: usize,
    pub move_a: Move,
    pub move_b: Move,
    pub cumulative_a: Score,
    pub cumulative_b: Score,
}

/// Result of a complete contest
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContestResult {
    pub rounds: Vec<RoundRecord>,
    pub score_a: Score,
    pub score_b: Score,
    pub round_count: usize,
    pub ending: Ending,
}

impl ContestResult {
    pub fn scores(&self) -> (Score, Score) {
        (self.score_a, self.score_b)
    }
}

/// Running scores of both sides, saturating at the bounds of `Score`
#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    a: Score,
    b: Score,
}

impl Tally {
    fn add(&mut self, side: Side, points: Score) {
        let score = match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        };
        *score = score.saturating_add(points);
    }
}

/// Roll for injury after `attacker` escalated in `round`.
///
/// Returns the ending if the roll injured the opponent; otherwise the opponent
/// takes a scratch and the contest continues.
fn strike(
    attacker: Side,
    round: usize,
    config: &ContestConfig,
    tally: &mut Tally,
    rng: &mut SeededRng,
) -> Option<Ending> {
    let victim = attacker.opponent();
    if rng.chance(config.injury_probability) {
        tally.add(attacker, config.win_award(round));
        tally.add(victim, config.injury_penalty);
        Some(Ending::Injury { victim, round })
    } else {
        tally.add(victim, config.scratch_penalty);
        None
    }
}

/// Run a complete contest between two strategies
///
/// Both strategies are reset first. Each round both decide, then retreats are
/// checked, then A's dangerous act is rolled before B's. The contest ends at
/// the first retreat or injury, or after `config.max_rounds` rounds.
///
/// # Arguments
/// * `strategy_a` - First side, sees its own history first
/// * `strategy_b` - Second side
/// * `config` - Contest rules
/// * `rng` - Shared random source for probes and injury rolls
pub fn resolve<A, B>(
    strategy_a: &mut A,
    strategy_b: &mut B,
    config: &ContestConfig,
    rng: &mut SeededRng,
) -> ContestResult
where
    A: Strategy + ?Sized,
    B: Strategy + ?Sized,
{
    strategy_a.reset(config.max_rounds);
    strategy_b.reset(config.max_rounds);

    let mut history_a: Vec<Move> = Vec::with_capacity(config.max_rounds);
    let mut history_b: Vec<Move> = Vec::with_capacity(config.max_rounds);
    let mut rounds: Vec<RoundRecord> = Vec::with_capacity(config.max_rounds);
    let mut tally = Tally::default();
    let mut ending = Ending::RoundCap;

    for round in 0..config.max_rounds {
        let move_a = strategy_a.decide(&history_a, &history_b, rng);
        let move_b = strategy_b.decide(&history_b, &history_a, rng);
        history_a.push(move_a);
        history_b.push(move_b);

        let decided = match (move_a, move_b) {
            (Move::Retreat, Move::Retreat) => Some(Ending::MutualRetreat { round }),
            (Move::Retreat, _) => {
                tally.add(Side::B, config.win_award(round));
                Some(Ending::Retreat { loser: Side::A, round })
            }
            (_, Move::Retreat) => {
                tally.add(Side::A, config.win_award(round));
                Some(Ending::Retreat { loser: Side::B, round })
            }
            _ => {
                let by_a = if move_a == Move::Dangerous {
                    strike(Side::A, round, config, &mut tally, rng)
                } else {
                    None
                };
                // An injury to B ends the round before B's own act is rolled
                match by_a {
                    None if move_b == Move::Dangerous => {
                        strike(Side::B, round, config, &mut tally, rng)
                    }
                    other => other,
                }
            }
        };

        rounds.push(RoundRecord {
            round,
            move_a,
            move_b,
            cumulative_a: tally.a,
            cumulative_b: tally.b,
        });

        if let Some(decided) = decided {
            ending = decided;
            break;
        }
    }

    log::trace!(
        "contest ended {:?} after {} rounds with ({}, {})",
        ending,
        rounds.len(),
        tally.a,
        tally.b
    );

    ContestResult {
        round_count: rounds.len(),
        rounds,
        score_a: tally.a,
        score_b: tally.b,
        ending,
    }
}
