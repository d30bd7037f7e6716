//! Static matchup analysis
//!
//! Mean payoff to one kind against another over many independent contests,
//! and the kind × kind table built from it.

use std::fmt;

use serde::{Deserialize, Serialize};
use crate::config::ContestConfig;
use crate::contest::resolve;
use crate::error::ConfigError;
use crate::random::SeededRng;
use crate::strategy::StrategyKind;

/// Width of every cell in the rendered payoff table
const CELL_WIDTH: usize = 20;

/// Mean score of side A over `trials` contests between fresh instances
pub fn average_payoff(
    kind_a: StrategyKind,
    kind_b: StrategyKind,
    trials: usize,
    config: &ContestConfig,
    rng: &mut SeededRng,
) -> Result<f64, ConfigError> {
    if trials == 0 {
        return Err(ConfigError::ZeroTrials);
    }
    config.validate()?;

    let mut total = 0.0;
    for _ in 0..trials {
        let mut a = kind_a.spawn(config);
        let mut b = kind_b.spawn(config);
        total += f64::from(resolve(&mut a, &mut b, config, rng).score_a);
    }
    Ok(total / trials as f64)
}

/// Mean payoff to the row kind against the column kind
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    kinds: Vec<StrategyKind>,
    values: Vec<Vec<f64>>,
    trials: usize,
}

impl PayoffMatrix {
    pub fn kinds(&self) -> &[StrategyKind] {
        &self.kinds
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Mean payoff to `row` when it meets `col`
    pub fn get(&self, row: StrategyKind, col: StrategyKind) -> Option<f64> {
        let i = self.kinds.iter().position(|k| *k == row)?;
        let j = self.kinds.iter().position(|k| *k == col)?;
        Some(self.values[i][j])
    }

    pub fn rows(&self) -> impl Iterator<Item = (StrategyKind, &[f64])> + '_ {
        self.kinds.iter().copied().zip(self.values.iter().map(Vec::as_slice))
    }
}

impl fmt::Display for PayoffMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:w$}", "", w = CELL_WIDTH)?;
        for kind in &self.kinds {
            write!(f, "{:>w$}", kind.name(), w = CELL_WIDTH)?;
        }
        writeln!(f)?;
        for (kind, row) in self.rows() {
            write!(f, "{:<w$}", kind.name(), w = CELL_WIDTH)?;
            for value in row {
                write!(f, "{:>w$.1}", value, w = CELL_WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Run `average_payoff` for every ordered pair of the roster, rows first
pub fn payoff_matrix(
    roster: &[StrategyKind],
    trials: usize,
    config: &ContestConfig,
    rng: &mut SeededRng,
) -> Result<PayoffMatrix, ConfigError> {
    if roster.is_empty() {
        return Err(ConfigError::EmptyRoster);
    }
    for (i, kind) in roster.iter().enumerate() {
        if roster[..i].contains(kind) {
            return Err(ConfigError::DuplicateKind(*kind));
        }
    }

    let mut values = Vec::with_capacity(roster.len());
    for &row in roster {
        let mut cells = Vec::with_capacity(roster.len());
        for &col in roster {
            let mean = average_payoff(row, col, trials, config, rng)?;
            log::debug!("{} vs {}: {:.2} over {} contests", row, col, mean, trials);
            cells.push(mean);
        }
        values.push(cells);
    }

    Ok(PayoffMatrix { kinds: roster.to_vec(), values, trials })
}
