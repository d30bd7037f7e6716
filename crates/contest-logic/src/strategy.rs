//! Strategy definitions and execution

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use crate::config::ContestConfig;
use crate::error::ConfigError;
use crate::random::SeededRng;

/// A move in the war of attrition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Conventional display, no risk to either side.
    Cooperate,
    /// Escalation: may seriously injure the opponent, otherwise scratches them.
    Dangerous,
    /// Give up the contest.
    Retreat,
}

/// A decision policy that lives for one contest at a time.
///
/// `reset` is called before every contest with that contest's round cap, which
/// replaces any cap the instance was built with. `decide` is called once per
/// round with the histories of the current contest only, own moves first.
pub trait Strategy {
    fn reset(&mut self, round_cap: usize);

    fn decide(&mut self, own: &[Move], opponent: &[Move], rng: &mut SeededRng) -> Move;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn reset(&mut self, round_cap: usize) {
        (**self).reset(round_cap)
    }

    fn decide(&mut self, own: &[Move], opponent: &[Move], rng: &mut SeededRng) -> Move {
        (**self).decide(own, opponent, rng)
    }
}

/// Canonical strategy kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Displays until the opponent escalates, then retreats.
    Mouse,
    /// Always escalates.
    Hawk,
    /// Escalates once, then displays; retreats after two escalations in a row.
    Bully,
    /// Mirrors the opponent's last move.
    Retaliator,
    /// Retaliator that sometimes opens with an escalation.
    ProberRetaliator,
    /// Retaliates if either of the opponent's last two moves escalated.
    LongRetaliator,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Mouse,
        StrategyKind::Hawk,
        StrategyKind::Bully,
        StrategyKind::Retaliator,
        StrategyKind::ProberRetaliator,
        StrategyKind::LongRetaliator,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Mouse => "Mouse",
            StrategyKind::Hawk => "Hawk",
            StrategyKind::Bully => "Bully",
            StrategyKind::Retaliator => "Retaliator",
            StrategyKind::ProberRetaliator => "Prober-Retaliator",
            StrategyKind::LongRetaliator => "Long-Retaliator",
        }
    }

    /// Human-readable description of the decision rule
    pub fn describe(self) -> &'static str {
        match self {
            StrategyKind::Mouse => "Displays until the opponent has ever escalated, then retreats.",
            StrategyKind::Hawk => "Escalates every round.",
            StrategyKind::Bully => "Escalates first, then displays. Retreats after two escalations in a row.",
            StrategyKind::Retaliator => "Displays, escalating only in reply to an escalation.",
            StrategyKind::ProberRetaliator => "Retaliator that may open with an escalation and keeps pushing if unanswered.",
            StrategyKind::LongRetaliator => "Escalates if either of the opponent's last two moves escalated.",
        }
    }

    /// Fresh instance of this kind, ready for its first contest
    pub fn spawn(self, config: &ContestConfig) -> Contestant {
        let max_rounds = config.max_rounds;
        let policy = match self {
            StrategyKind::Mouse => Policy::Mouse(Mouse::new(max_rounds)),
            StrategyKind::Hawk => Policy::Hawk(Hawk),
            StrategyKind::Bully => Policy::Bully(Bully::new()),
            StrategyKind::Retaliator => Policy::Retaliator(Retaliator::new(max_rounds)),
            StrategyKind::ProberRetaliator => Policy::ProberRetaliator(
                ProberRetaliator::new(max_rounds, config.probe_probability),
            ),
            StrategyKind::LongRetaliator => Policy::LongRetaliator(LongRetaliator::new(max_rounds)),
        };
        Contestant { round_cap: max_rounds, policy }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    /// Accepts display names and identifiers, ignoring case, dashes and underscores
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name().replace('-', "").to_ascii_lowercase() == key)
            .ok_or_else(|| ConfigError::UnknownKind(s.to_string()))
    }
}

/// Retreats for good once the opponent has escalated anywhere in the history.
#[derive(Clone, Debug)]
pub struct Mouse {
    max_rounds: usize,
    opponent_escalated: bool,
}

impl Mouse {
    pub fn new(max_rounds: usize) -> Self {
        Self { max_rounds, opponent_escalated: false }
    }
}

impl Strategy for Mouse {
    fn reset(&mut self, round_cap: usize) {
        self.max_rounds = round_cap;
        self.opponent_escalated = false;
    }

    fn decide(&mut self, own: &[Move], opponent: &[Move], _rng: &mut SeededRng) -> Move {
        if opponent.contains(&Move::Dangerous) {
            self.opponent_escalated = true;
        }
        if self.opponent_escalated || own.len() >= self.max_rounds {
            Move::Retreat
        } else {
            Move::Cooperate
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Hawk;

impl Strategy for Hawk {
    fn reset(&mut self, _round_cap: usize) {}

    fn decide(&mut self, _own: &[Move], _opponent: &[Move], _rng: &mut SeededRng) -> Move {
        Move::Dangerous
    }
}

#[derive(Clone, Debug)]
pub struct Bully {
    first_move: bool,
    escalation_streak: u32,
}

impl Bully {
    pub fn new() -> Self {
        Self { first_move: true, escalation_streak: 0 }
    }
}

impl Default for Bully {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Bully {
    fn reset(&mut self, _round_cap: usize) {
        *self = Self::new();
    }

    fn decide(&mut self, _own: &[Move], opponent: &[Move], _rng: &mut SeededRng) -> Move {
        if self.first_move {
            self.first_move = false;
            return Move::Dangerous;
        }
        if opponent.last() == Some(&Move::Dangerous) {
            self.escalation_streak += 1;
        } else {
            self.escalation_streak = 0;
        }
        if self.escalation_streak >= 2 {
            Move::Retreat
        } else {
            Move::Cooperate
        }
    }
}

#[derive(Clone, Debug)]
pub struct Retaliator {
    max_rounds: usize,
    move_count: usize,
}

impl Retaliator {
    pub fn new(max_rounds: usize) -> Self {
        Self { max_rounds, move_count: 0 }
    }
}

impl Strategy for Retaliator {
    fn reset(&mut self, round_cap: usize) {
        self.max_rounds = round_cap;
        self.move_count = 0;
    }

    fn decide(&mut self, _own: &[Move], opponent: &[Move], _rng: &mut SeededRng) -> Move {
        self.move_count += 1;
        if self.move_count > self.max_rounds {
            return Move::Retreat;
        }
        match opponent.last() {
            Some(Move::Dangerous) => Move::Dangerous,
            _ => Move::Cooperate,
        }
    }
}

/// Retaliator with a probing opener.
///
/// After a successful probe it keeps escalating whenever the opponent did not
/// just escalate, and backs down for one round whenever it did.
#[derive(Clone, Debug)]
pub struct ProberRetaliator {
    max_rounds: usize,
    probe_probability: f64,
    move_count: usize,
    has_probed: bool,
}

impl ProberRetaliator {
    pub fn new(max_rounds: usize, probe_probability: f64) -> Self {
        Self { max_rounds, probe_probability, move_count: 0, has_probed: false }
    }

    pub fn has_probed(&self) -> bool {
        self.has_probed
    }
}

impl Strategy for ProberRetaliator {
    fn reset(&mut self, round_cap: usize) {
        self.max_rounds = round_cap;
        self.move_count = 0;
        self.has_probed = false;
    }

    fn decide(&mut self, own: &[Move], opponent: &[Move], rng: &mut SeededRng) -> Move {
        self.move_count += 1;
        if self.move_count > self.max_rounds {
            return Move::Retreat;
        }
        // The probe roll is the only draw, and only on the opening move
        if !self.has_probed && own.is_empty() && rng.chance(self.probe_probability) {
            self.has_probed = true;
            return Move::Dangerous;
        }
        if opponent.last() == Some(&Move::Dangerous) {
            Move::Cooperate
        } else if self.has_probed {
            Move::Dangerous
        } else {
            Move::Cooperate
        }
    }
}

#[derive(Clone, Debug)]
pub struct LongRetaliator {
    max_rounds: usize,
    move_count: usize,
}

impl LongRetaliator {
    pub fn new(max_rounds: usize) -> Self {
        Self { max_rounds, move_count: 0 }
    }
}

impl Strategy for LongRetaliator {
    fn reset(&mut self, round_cap: usize) {
        self.max_rounds = round_cap;
        self.move_count = 0;
    }

    fn decide(&mut self, _own: &[Move], opponent: &[Move], _rng: &mut SeededRng) -> Move {
        self.move_count += 1;
        if self.move_count > self.max_rounds {
            return Move::Retreat;
        }
        // Needs two observed moves before it looks back
        match opponent {
            [.., older, last] if *older == Move::Dangerous || *last == Move::Dangerous => {
                Move::Dangerous
            }
            _ => Move::Cooperate,
        }
    }
}

#[derive(Clone, Debug)]
enum Policy {
    Mouse(Mouse),
    Hawk(Hawk),
    Bully(Bully),
    Retaliator(Retaliator),
    ProberRetaliator(ProberRetaliator),
    LongRetaliator(LongRetaliator),
}

/// One individual: a strategy instance tagged with its kind at construction.
#[derive(Clone, Debug)]
pub struct Contestant {
    round_cap: usize,
    policy: Policy,
}

impl Contestant {
    pub fn kind(&self) -> StrategyKind {
        match self.policy {
            Policy::Mouse(_) => StrategyKind::Mouse,
            Policy::Hawk(_) => StrategyKind::Hawk,
            Policy::Bully(_) => StrategyKind::Bully,
            Policy::Retaliator(_) => StrategyKind::Retaliator,
            Policy::ProberRetaliator(_) => StrategyKind::ProberRetaliator,
            Policy::LongRetaliator(_) => StrategyKind::LongRetaliator,
        }
    }
}

impl Strategy for Contestant {
    fn reset(&mut self, round_cap: usize) {
        self.round_cap = round_cap;
        match &mut self.policy {
            Policy::Mouse(s) => s.reset(round_cap),
            Policy::Hawk(s) => s.reset(round_cap),
            Policy::Bully(s) => s.reset(round_cap),
            Policy::Retaliator(s) => s.reset(round_cap),
            Policy::ProberRetaliator(s) => s.reset(round_cap),
            Policy::LongRetaliator(s) => s.reset(round_cap),
        }
    }

    /// # Panics
    /// If the histories differ in length or already hold a full contest.
    fn decide(&mut self, own: &[Move], opponent: &[Move], rng: &mut SeededRng) -> Move {
        assert_eq!(
            own.len(),
            opponent.len(),
            "{} queried with mismatched histories",
            self.kind()
        );
        assert!(
            own.len() < self.round_cap,
            "{} queried with {} moves, round cap is {}",
            self.kind(),
            own.len(),
            self.round_cap
        );
        match &mut self.policy {
            Policy::Mouse(s) => s.decide(own, opponent, rng),
            Policy::Hawk(s) => s.decide(own, opponent, rng),
            Policy::Bully(s) => s.decide(own, opponent, rng),
            Policy::Retaliator(s) => s.decide(own, opponent, rng),
            Policy::ProberRetaliator(s) => s.decide(own, opponent, rng),
            Policy::LongRetaliator(s) => s.decide(own, opponent, rng),
        }
    }
}
