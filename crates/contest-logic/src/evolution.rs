//! Evolutionary dynamics over strategy kinds
//!
//! Each generation samples a finite population from the current frequency
//! distribution, pairs it at random, resolves one contest per pair and turns
//! mean payoffs into the next distribution. A rare mutation step then moves a
//! little frequency from one kind to the mutation sink.
//!
//! Draw order per generation: shortfall fills, shuffle, contests in pair
//! order, mutation trigger, mutation source (only when triggered).

use std::fmt;

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution as _;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ContestConfig, EvolutionConfig};
use crate::contest::resolve;
use crate::error::{ConfigError, EngineError};
use crate::random::SeededRng;
use crate::strategy::{Contestant, StrategyKind};

/// Frequencies must sum to 1 within this tolerance
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Frequency of each strategy kind, in roster order.
///
/// Always non-negative and normalized. Never edited in place: every update
/// builds a new distribution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    entries: Vec<(StrategyKind, f64)>,
}

impl Distribution {
    pub fn new(entries: Vec<(StrategyKind, f64)>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        for (i, &(kind, value)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(seen, _)| *seen == kind) {
                return Err(ConfigError::DuplicateKind(kind));
            }
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidFrequency { kind, value });
            }
        }
        let sum: f64 = entries.iter().map(|(_, f)| f).sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(ConfigError::NotNormalized(sum));
        }
        Ok(Self { entries })
    }

    /// Equal weight on every kind of the roster
    pub fn uniform(roster: &[StrategyKind]) -> Result<Self, ConfigError> {
        let share = 1.0 / roster.len().max(1) as f64;
        Self::new(roster.iter().map(|kind| (*kind, share)).collect())
    }

    /// Normalize non-negative weights that share the roster of `self`
    fn reweighted(&self, weights: &[f64]) -> Self {
        let total: f64 = weights.iter().sum();
        let entries = self
            .entries
            .iter()
            .zip(weights)
            .map(|(&(kind, _), weight)| (kind, weight / total))
            .collect();
        Self { entries }
    }

    /// Move `min(frequency × fraction, cap)` of the kind at `source` to the
    /// kind at `sink`. Returns the new distribution and the amount moved.
    fn transfer(&self, source: usize, sink: usize, fraction: f64, cap: f64) -> (Self, f64) {
        let amount = (self.entries[source].1 * fraction).min(cap);
        let mut entries = self.entries.clone();
        entries[source].1 -= amount;
        entries[sink].1 += amount;
        (Self { entries }, amount)
    }

    pub fn frequency(&self, kind: StrategyKind) -> Option<f64> {
        self.entries.iter().find(|(k, _)| *k == kind).map(|(_, f)| *f)
    }

    pub fn kinds(&self) -> impl Iterator<Item = StrategyKind> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StrategyKind, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, kind: StrategyKind) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == kind)
    }
}

impl fmt::Display for Distribution {
    /// One `  Name: 12.34%` line per kind
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, frequency) in &self.entries {
            writeln!(f, "  {}: {:.2}%", kind, frequency * 100.0)?;
        }
        Ok(())
    }
}

/// Per-kind aggregate of one generation's contests
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KindTally {
    pub kind: StrategyKind,
    /// Individuals of this kind that played a contest
    pub count: usize,
    pub total_payoff: i64,
    /// 0 when the kind did not play
    pub mean_payoff: f64,
    pub fitness: f64,
}

/// A mutation that fired at the end of a generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    pub source: StrategyKind,
    pub sink: StrategyKind,
    pub amount: f64,
}

/// Outcome of one generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// 1-based
    pub generation: usize,
    /// Individuals that played a contest
    pub played: usize,
    pub tallies: Vec<KindTally>,
    pub mutation: Option<Mutation>,
    pub distribution: Distribution,
}

/// One member of a sampled population
struct Individual {
    slot: usize,
    contestant: Contestant,
}

/// Replicator-style population engine
#[derive(Clone, Debug)]
pub struct Engine {
    contest: ContestConfig,
    config: EvolutionConfig,
    distribution: Distribution,
    generation: usize,
}

impl Engine {
    /// Validate everything up front so a run never fails on configuration
    pub fn new(
        initial: Distribution,
        contest: ContestConfig,
        config: EvolutionConfig,
    ) -> Result<Self, ConfigError> {
        contest.validate()?;
        config.validate()?;
        if config.mutation_probability > 0.0 && initial.position(config.mutation_sink).is_none() {
            return Err(ConfigError::MutationSinkMissing(config.mutation_sink));
        }
        Ok(Self { contest, config, distribution: initial, generation: 0 })
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    /// Generations completed so far
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Run the configured number of generations, returning every record
    pub fn run(&mut self, rng: &mut SeededRng) -> Result<Vec<GenerationRecord>, EngineError> {
        (0..self.config.generations).map(|_| self.step(rng)).collect()
    }

    /// Advance one generation
    pub fn step(&mut self, rng: &mut SeededRng) -> Result<GenerationRecord, EngineError> {
        let mut population = self.sample(rng)?;
        population.shuffle(rng);
        if population.len() % 2 == 1 {
            if let Some(idle) = population.pop() {
                log::debug!("odd population: one {} sits out", idle.contestant.kind());
            }
        }

        let mut totals = vec![0i64; self.distribution.len()];
        let mut counts = vec![0usize; self.distribution.len()];
        for pair in population.chunks_exact_mut(2) {
            if let [a, b] = pair {
                let result = resolve(&mut a.contestant, &mut b.contestant, &self.contest, rng);
                totals[a.slot] += i64::from(result.score_a);
                counts[a.slot] += 1;
                totals[b.slot] += i64::from(result.score_b);
                counts[b.slot] += 1;
            }
        }

        let tallies: Vec<KindTally> = self
            .distribution
            .kinds()
            .enumerate()
            .map(|(slot, kind)| {
                let count = counts[slot];
                let mean_payoff = if count > 0 {
                    totals[slot] as f64 / count as f64
                } else {
                    0.0
                };
                let fitness = (mean_payoff + self.config.fitness_shift).max(self.config.fitness_floor);
                KindTally { kind, count, total_payoff: totals[slot], mean_payoff, fitness }
            })
            .collect();

        let weights: Vec<f64> = tallies.iter().map(|t| t.fitness).collect();
        let mut next = self.distribution.reweighted(&weights);

        let mut mutation = None;
        if rng.chance(self.config.mutation_probability) {
            if let Some((mutated, fired)) = self.mutate(&next, rng) {
                log::debug!(
                    "mutation moved {:.4} from {} to {}",
                    fired.amount,
                    fired.source,
                    fired.sink
                );
                next = mutated;
                mutation = Some(fired);
            }
        }

        self.generation += 1;
        self.distribution = next;
        log::debug!("generation {} complete:\n{}", self.generation, self.distribution);

        Ok(GenerationRecord {
            generation: self.generation,
            played: population.len(),
            tallies,
            mutation,
            distribution: self.distribution.clone(),
        })
    }

    /// Pick a non-sink kind uniformly and move part of its frequency to the sink
    fn mutate(&self, distribution: &Distribution, rng: &mut SeededRng) -> Option<(Distribution, Mutation)> {
        let sink = self.config.mutation_sink;
        let sink_slot = distribution.position(sink)?;
        let sources: Vec<usize> = (0..distribution.len()).filter(|slot| *slot != sink_slot).collect();
        if sources.is_empty() {
            return None;
        }
        let source_slot = sources[rng.random_range(0..sources.len())];
        let (mutated, amount) = distribution.transfer(
            source_slot,
            sink_slot,
            self.config.mutation_fraction,
            self.config.mutation_cap,
        );
        let source = distribution.entries[source_slot].0;
        Some((mutated, Mutation { source, sink, amount }))
    }

    /// Instantiate exactly `population_size` individuals.
    ///
    /// Each kind gets `floor(frequency × size)`; any shortfall is drawn in
    /// proportion to the frequencies, any surplus is trimmed from the end.
    fn sample(&self, rng: &mut SeededRng) -> Result<Vec<Individual>, EngineError> {
        let size = self.config.population_size;
        let mut population = Vec::with_capacity(size);
        for (slot, (kind, frequency)) in self.distribution.iter().enumerate() {
            let count = (frequency * size as f64).floor() as usize;
            population.extend((0..count).map(|_| Individual { slot, contestant: kind.spawn(&self.contest) }));
        }

        let shortfall = size.saturating_sub(population.len());
        if shortfall > 0 {
            let weights = WeightedIndex::<f64>::new(self.distribution.iter().map(|(_, f)| f))
                .map_err(|err| EngineError::Sampling(err.to_string()))?;
            for _ in 0..shortfall {
                let slot = weights.sample(rng);
                let kind = self.distribution.entries[slot].0;
                population.push(Individual { slot, contestant: kind.spawn(&self.contest) });
            }
            log::debug!("filled a shortfall of {} by weighted draw", shortfall);
        }
        population.truncate(size);
        Ok(population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn hawk_mouse() -> Distribution {
        Distribution::new(vec![(StrategyKind::Hawk, 0.5), (StrategyKind::Mouse, 0.5)]).unwrap()
    }

    fn single_generation(population_size: usize, mutation_probability: f64) -> EvolutionConfig {
        EvolutionConfig { population_size, generations: 1, mutation_probability, ..Default::default() }
    }

    fn assert_normalized(distribution: &Distribution) {
        let sum: f64 = distribution.iter().map(|(_, f)| f).sum();
        assert!((sum - 1.0).abs() < SUM_TOLERANCE, "frequencies sum to {}", sum);
        for (kind, f) in distribution.iter() {
            assert!(f >= 0.0, "{} has negative frequency {}", kind, f);
        }
    }

    #[test]
    fn test_distribution_validation() {
        assert_eq!(Distribution::new(vec![]), Err(ConfigError::EmptyRoster));
        assert_eq!(
            Distribution::new(vec![(StrategyKind::Hawk, 0.5), (StrategyKind::Hawk, 0.5)]),
            Err(ConfigError::DuplicateKind(StrategyKind::Hawk))
        );
        assert_eq!(
            Distribution::new(vec![(StrategyKind::Hawk, 1.2), (StrategyKind::Mouse, -0.2)]),
            Err(ConfigError::InvalidFrequency { kind: StrategyKind::Mouse, value: -0.2 })
        );
        assert!(matches!(
            Distribution::new(vec![(StrategyKind::Hawk, 0.5), (StrategyKind::Mouse, 0.4)]),
            Err(ConfigError::NotNormalized(_))
        ));
        assert!(Distribution::new(vec![(StrategyKind::Hawk, 0.0), (StrategyKind::Mouse, 1.0)]).is_ok());
    }

    #[test]
    fn test_uniform_distribution() {
        let d = Distribution::uniform(&StrategyKind::ALL).unwrap();
        assert_eq!(d.len(), 6);
        assert_normalized(&d);
        assert_eq!(d.kinds().collect::<Vec<_>>(), StrategyKind::ALL.to_vec());
        assert_eq!(Distribution::uniform(&[]), Err(ConfigError::EmptyRoster));
    }

    #[test]
    fn test_distribution_display() {
        let d = Distribution::uniform(&[StrategyKind::Mouse, StrategyKind::ProberRetaliator]).unwrap();
        assert_eq!(d.to_string(), "  Mouse: 50.00%\n  Prober-Retaliator: 50.00%\n");
    }

    #[test]
    fn test_engine_rejects_missing_sink() {
        let d = Distribution::uniform(&[StrategyKind::Mouse, StrategyKind::Bully]).unwrap();
        let result = Engine::new(d.clone(), ContestConfig::default(), EvolutionConfig::default());
        assert!(matches!(result, Err(ConfigError::MutationSinkMissing(StrategyKind::Hawk))));

        // Without mutation the sink is never needed
        let config = EvolutionConfig { mutation_probability: 0.0, ..Default::default() };
        assert!(Engine::new(d, ContestConfig::default(), config).is_ok());
    }

    #[test]
    fn test_engine_rejects_bad_config() {
        let config = EvolutionConfig { generations: 0, ..Default::default() };
        assert!(matches!(
            Engine::new(hawk_mouse(), ContestConfig::default(), config),
            Err(ConfigError::ZeroGenerations)
        ));
        let contest = ContestConfig { injury_probability: 2.0, ..Default::default() };
        assert!(matches!(
            Engine::new(hawk_mouse(), contest, EvolutionConfig::default()),
            Err(ConfigError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn test_sample_fills_shortfall() {
        let thirds = Distribution::uniform(&[StrategyKind::Mouse, StrategyKind::Hawk, StrategyKind::Bully]).unwrap();
        let engine = Engine::new(thirds, ContestConfig::default(), single_generation(10, 0.0)).unwrap();
        let mut rng = SeededRng::seed_from_u64(1);

        for _ in 0..50 {
            let population = engine.sample(&mut rng).unwrap();
            assert_eq!(population.len(), 10);
            for slot in 0..3 {
                let n = population.iter().filter(|i| i.slot == slot).count();
                assert!(n >= 3, "slot {} has only {} individuals", slot, n);
            }
            for individual in &population {
                let expected = engine.distribution().entries[individual.slot].0;
                assert_eq!(individual.contestant.kind(), expected);
            }
        }
    }

    #[test]
    fn test_shortfall_never_draws_absent_kinds() {
        let d = Distribution::new(vec![
            (StrategyKind::Mouse, 0.55),
            (StrategyKind::Hawk, 0.45),
            (StrategyKind::Bully, 0.0),
        ])
        .unwrap();
        let engine = Engine::new(d, ContestConfig::default(), single_generation(3, 0.0)).unwrap();
        let mut rng = SeededRng::seed_from_u64(2);
        for _ in 0..200 {
            let population = engine.sample(&mut rng).unwrap();
            assert_eq!(population.len(), 3);
            assert!(population.iter().all(|i| i.slot != 2));
        }
    }

    #[test]
    fn test_generation_tallies_cover_population() {
        let d = Distribution::uniform(&StrategyKind::ALL).unwrap();
        let mut engine = Engine::new(d, ContestConfig::default(), single_generation(60, 0.0)).unwrap();
        let record = engine.step(&mut SeededRng::seed_from_u64(3)).unwrap();

        assert_eq!(record.generation, 1);
        assert_eq!(engine.generation(), 1);
        assert_eq!(record.played, 60);
        assert_eq!(record.tallies.iter().map(|t| t.count).sum::<usize>(), 60);
        assert!(record.mutation.is_none());
        assert_normalized(&record.distribution);
        assert_eq!(&record.distribution, engine.distribution());
    }

    #[test]
    fn test_odd_population_sits_one_out() {
        let mut engine = Engine::new(hawk_mouse(), ContestConfig::default(), single_generation(11, 0.0)).unwrap();
        let record = engine.step(&mut SeededRng::seed_from_u64(4)).unwrap();
        assert_eq!(record.played, 10);
        assert_eq!(record.tallies.iter().map(|t| t.count).sum::<usize>(), 10);
    }

    #[test]
    fn test_fitness_transform() {
        let mut engine = Engine::new(hawk_mouse(), ContestConfig::default(), single_generation(10, 0.0)).unwrap();
        let record = engine.step(&mut SeededRng::seed_from_u64(5)).unwrap();

        let total: f64 = record.tallies.iter().map(|t| t.fitness).sum();
        for tally in &record.tallies {
            let mean = tally.total_payoff as f64 / tally.count as f64;
            assert_eq!(tally.mean_payoff, mean);
            assert_eq!(tally.fitness, (mean + 100.0).max(0.01));
            let frequency = record.distribution.frequency(tally.kind).unwrap();
            assert!((frequency - tally.fitness / total).abs() < 1e-12);
        }
    }

    #[test]
    fn test_absent_kind_scores_zero_payoff() {
        let d = Distribution::new(vec![
            (StrategyKind::Hawk, 0.5),
            (StrategyKind::Mouse, 0.5),
            (StrategyKind::Bully, 0.0),
        ])
        .unwrap();
        let mut engine = Engine::new(d, ContestConfig::default(), single_generation(10, 0.0)).unwrap();
        let record = engine.step(&mut SeededRng::seed_from_u64(6)).unwrap();

        let bully = &record.tallies[2];
        assert_eq!(bully.count, 0);
        assert_eq!(bully.mean_payoff, 0.0);
        assert_eq!(bully.fitness, 100.0);
        assert!(record.distribution.frequency(StrategyKind::Bully).unwrap() > 0.0);
    }

    #[test]
    fn test_fitness_floor_applies() {
        let config = EvolutionConfig { fitness_shift: -1000.0, ..single_generation(10, 0.0) };
        let mut engine = Engine::new(hawk_mouse(), ContestConfig::default(), config).unwrap();
        let record = engine.step(&mut SeededRng::seed_from_u64(7)).unwrap();
        assert!(record.tallies.iter().all(|t| t.fitness == 0.01));
        assert!((record.distribution.frequency(StrategyKind::Hawk).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mutation_moves_frequency_to_sink() {
        let mut engine = Engine::new(hawk_mouse(), ContestConfig::default(), single_generation(10, 1.0)).unwrap();
        let record = engine.step(&mut SeededRng::seed_from_u64(8)).unwrap();

        let mutation = record.mutation.clone().unwrap();
        assert_eq!(mutation.source, StrategyKind::Mouse);
        assert_eq!(mutation.sink, StrategyKind::Hawk);

        let total: f64 = record.tallies.iter().map(|t| t.fitness).sum();
        let before = |kind| record.tallies.iter().find(|t| t.kind == kind).unwrap().fitness / total;
        let mouse_before = before(StrategyKind::Mouse);
        let hawk_before = before(StrategyKind::Hawk);

        assert!((mutation.amount - (mouse_before * 0.1).min(0.05)).abs() < 1e-15);
        assert!(mutation.amount > 0.0);
        let mouse_after = record.distribution.frequency(StrategyKind::Mouse).unwrap();
        let hawk_after = record.distribution.frequency(StrategyKind::Hawk).unwrap();
        assert!((mouse_after - (mouse_before - mutation.amount)).abs() < 1e-12);
        assert!((hawk_after - (hawk_before + mutation.amount)).abs() < 1e-12);
        assert_normalized(&record.distribution);
    }

    #[test]
    fn test_mutation_never_picks_sink() {
        let d = Distribution::uniform(&StrategyKind::ALL).unwrap();
        let mut engine = Engine::new(d, ContestConfig::default(), single_generation(20, 1.0)).unwrap();
        let mut rng = SeededRng::seed_from_u64(9);
        for _ in 0..30 {
            let record = engine.step(&mut rng).unwrap();
            let mutation = record.mutation.unwrap();
            assert_ne!(mutation.source, StrategyKind::Hawk);
            assert!(mutation.amount <= 0.05);
        }
    }

    #[test]
    fn test_transfer_is_capped() {
        let d = Distribution::new(vec![(StrategyKind::Hawk, 0.1), (StrategyKind::Mouse, 0.9)]).unwrap();
        let (next, amount) = d.transfer(1, 0, 0.1, 0.05);
        assert_eq!(amount, 0.05);
        assert!((next.frequency(StrategyKind::Mouse).unwrap() - 0.85).abs() < 1e-12);
        assert!((next.frequency(StrategyKind::Hawk).unwrap() - 0.15).abs() < 1e-12);
        // The source distribution is untouched
        assert_eq!(d.frequency(StrategyKind::Mouse), Some(0.9));
    }

    #[test]
    fn test_single_generation_is_reproducible() {
        let run = || {
            let config = single_generation(10, 0.0);
            let mut engine = Engine::new(hawk_mouse(), ContestConfig::default(), config).unwrap();
            engine.run(&mut SeededRng::seed_from_u64(2024)).unwrap()
        };
        let first = run();
        let second = run();
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        for ((kind, f1), (_, f2)) in first[0].distribution.iter().zip(second[0].distribution.iter()) {
            assert_eq!(f1.to_bits(), f2.to_bits(), "{} differs", kind);
        }
    }

    #[test]
    fn test_frequency_follows_mean_payoff() {
        let mut engine = Engine::new(hawk_mouse(), ContestConfig::default(), single_generation(10, 0.0)).unwrap();
        let record = engine.step(&mut SeededRng::seed_from_u64(2024)).unwrap();
        let hawk = &record.tallies[0];
        let mouse = &record.tallies[1];
        let hawk_share = record.distribution.frequency(StrategyKind::Hawk).unwrap();
        assert_eq!(hawk_share > 0.5, hawk.mean_payoff > mouse.mean_payoff);
        assert!(hawk_share > 0.5, "Hawk share {} did not grow", hawk_share);
        assert!(hawk.mean_payoff > mouse.mean_payoff);
    }

    #[test]
    fn test_hawk_invades_mouse_population() {
        // Across seeds, one generation moves Hawk from 0.5 to ~0.59 on average
        let seeds = 200;
        let mut total = 0.0;
        for seed in 0..seeds {
            let mut engine =
                Engine::new(hawk_mouse(), ContestConfig::default(), single_generation(10, 0.0)).unwrap();
            let record = engine.step(&mut SeededRng::seed_from_u64(seed)).unwrap();
            total += record.distribution.frequency(StrategyKind::Hawk).unwrap();
        }
        let mean = total / seeds as f64;
        assert!(mean > 0.55, "mean Hawk share {} after one generation", mean);
    }

    #[test]
    fn test_run_executes_configured_generations() {
        let d = Distribution::uniform(&StrategyKind::ALL).unwrap();
        let config = EvolutionConfig { population_size: 40, generations: 5, ..Default::default() };
        let mut engine = Engine::new(d, ContestConfig::default(), config).unwrap();
        let records = engine.run(&mut SeededRng::seed_from_u64(10)).unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(engine.generation(), 5);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.generation, i + 1);
            assert_normalized(&record.distribution);
        }
        assert_eq!(&records[4].distribution, engine.distribution());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn test_generation_keeps_distribution_normalized(
            weights in proptest::collection::vec(0.0f64..1.0, 6),
            seed in any::<u64>(),
            population_size in 2usize..60,
            mutation_probability in 0.0f64..=1.0,
        ) {
            let total: f64 = weights.iter().sum();
            prop_assume!(total > 1e-6);
            let entries = StrategyKind::ALL.iter().zip(&weights).map(|(k, w)| (*k, w / total)).collect();
            let initial = Distribution::new(entries).unwrap();
            let config = EvolutionConfig { population_size, generations: 1, mutation_probability, ..Default::default() };
            let mut engine = Engine::new(initial, ContestConfig::default(), config).unwrap();

            let record = engine.step(&mut SeededRng::seed_from_u64(seed)).unwrap();

            let sum: f64 = record.distribution.iter().map(|(_, f)| f).sum();
            prop_assert!((sum - 1.0).abs() < SUM_TOLERANCE);
            prop_assert!(record.distribution.iter().all(|(_, f)| f >= 0.0));
            prop_assert_eq!(record.played, population_size - population_size % 2);
        }

        #[test]
        fn test_transfer_conserves_mass(
            source_share in 0.0f64..=1.0,
            fraction in 0.0f64..=1.0,
            cap in 0.0f64..=1.0,
        ) {
            let d = Distribution::new(vec![
                (StrategyKind::Hawk, 1.0 - source_share),
                (StrategyKind::Bully, source_share),
            ]).unwrap();
            let (next, amount) = d.transfer(1, 0, fraction, cap);

            prop_assert!(amount >= 0.0 && amount <= cap);
            prop_assert!(amount <= source_share);
            let bully = next.frequency(StrategyKind::Bully).unwrap();
            let hawk = next.frequency(StrategyKind::Hawk).unwrap();
            prop_assert!(bully >= 0.0);
            prop_assert!((bully - (source_share - amount)).abs() < 1e-12);
            prop_assert!((hawk - (1.0 - source_share + amount)).abs() < 1e-12);
        }
    }
}
