//! Generational genetic algorithm.
//!
//! Each generation:
//! 1. Selects `M` individuals (with repetition) from the current population
//! 2. Deep-copies the selection into an offspring set
//! 3. Crosses adjacent offspring pairs with probability `crossover_prob`
//! 4. Mutates each offspring with probability `mutation_prob`
//! 5. Evaluates only the offspring whose fitness was invalidated
//! 6. Replaces the whole population with the offspring
//!
//! The run stops when the best individual reaches `target_fitness` or after
//! `max_generations` generations, whichever comes first.

use crate::operators::{Toolbox, init_population};
use crate::population::clone_all;
use crate::stats::{GenerationRecord, Logbook, Statistics};
use crate::{
    Allele, ConfigError, Crossover, Evaluator, Evolver, Genome, Initializer, Mutator, Population,
    Selector, Weights,
};
use rand::Rng;
use rand::prelude::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

/// Deep-copies `selected` into exactly `size` offspring. Extra picks are
/// dropped, a short selection is cycled, and an empty one falls back to the
/// current population in order.
fn fill_offspring<T: Allele>(
    selected: &[&Genome<T>],
    population: &[Genome<T>],
    size: usize,
) -> Vec<Genome<T>> {
    if selected.len() >= size {
        return clone_all(&selected[..size]);
    }
    if selected.is_empty() {
        return population.iter().cycle().take(size).cloned().collect();
    }
    selected.iter().cycle().take(size).map(|&g| g.clone()).collect()
}

/// Loop-level parameters of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionParams {
    /// Probability of crossing an adjacent pair (CXPB).
    pub crossover_prob: f64,
    /// Probability of mutating an individual (MUTPB).
    pub mutation_prob: f64,
    /// Stop once the best primary objective reaches this value.
    pub target_fitness: Option<f64>,
    pub max_generations: usize,
    pub weights: Weights,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            crossover_prob: 0.5,
            mutation_prob: 0.2,
            target_fitness: None,
            max_generations: 1000,
            weights: Weights::maximize(),
        }
    }
}

impl EvolutionParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_probability("crossover_prob", self.crossover_prob)?;
        ConfigError::check_probability("mutation_prob", self.mutation_prob)?;
        self.weights.validate()
    }
}

/// Why a run ended. Both outcomes are normal terminations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    TargetReached,
    MaxGenerations,
}

/// Where the engine is in its generational cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Evaluating,
    Selecting,
    Reproducing,
    Reevaluating,
    Terminated(StopReason),
}

#[derive(Debug, Clone)]
pub struct EvolutionResult<T: Allele> {
    pub stop_reason: StopReason,
    /// Generations run after the initial evaluation.
    pub generations: usize,
    /// Total evaluator calls, initial population included.
    pub evaluations: usize,
    pub best: Genome<T>,
    pub logbook: Logbook,
}

/// Crossover pass over adjacent pairs followed by a mutation pass.
///
/// A trailing individual of an odd-sized set is never crossed. Every individual
/// touched by an operator ends up with an invalid fitness.
pub fn vary<T, C, M, R>(
    offspring: &mut [Genome<T>],
    crossover: &C,
    mutator: &M,
    crossover_prob: f64,
    mutation_prob: f64,
    rng: &mut R,
) where
    T: Allele,
    C: Crossover<T>,
    M: Mutator<T>,
    R: Rng + ?Sized,
{
    for pair in offspring.chunks_exact_mut(2) {
        if rng.random::<f64>() < crossover_prob {
            let (first, second) = pair.split_at_mut(1);
            crossover.mate(&mut first[0], &mut second[0], rng);
            first[0].invalidate();
            second[0].invalidate();
        }
    }

    for mutant in offspring.iter_mut() {
        if rng.random::<f64>() < mutation_prob {
            mutator.mutate(mutant, rng);
            mutant.invalidate();
        }
    }
}

pub struct SimpleGA<T: Allele, I, E, S, C, M> {
    population: Population<T>,
    toolbox: Toolbox<I, E, S, C, M>,
    params: EvolutionParams,
    generation: usize,
    evaluations: usize,
    phase: Phase,
    logbook: Logbook,
    rng: Pcg64,
}

impl<T, I, E, S, C, M> SimpleGA<T, I, E, S, C, M>
where
    T: Allele,
    I: Initializer<T>,
    E: Evaluator<T>,
    S: Selector<T>,
    C: Crossover<T>,
    M: Mutator<T>,
{
    /// Builds a random initial population of `population_size` genomes of
    /// `genome_length` alleles with the toolbox initializer.
    pub fn new(
        toolbox: Toolbox<I, E, S, C, M>,
        params: EvolutionParams,
        genome_length: usize,
        population_size: usize,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if genome_length == 0 {
            return Err(ConfigError::EmptyGenome);
        }
        if population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        Self::validate(&toolbox, &params, population_size)?;

        let seed = seed.unwrap_or_else(rand::random);
        log::debug!("SimpleGA seed: {seed}");
        let mut rng = Pcg64::seed_from_u64(seed);
        let population = init_population(
            &toolbox.initializer,
            genome_length,
            population_size,
            &mut rng,
        );

        Ok(Self::assemble(population, toolbox, params, rng))
    }

    /// Adopts an existing population. Genomes may already carry valid fitness.
    pub fn from_population(
        population: Population<T>,
        toolbox: Toolbox<I, E, S, C, M>,
        params: EvolutionParams,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let expected = match population.iter().next() {
            Some(first) => first.len(),
            None => return Err(ConfigError::EmptyPopulation),
        };
        if expected == 0 {
            return Err(ConfigError::EmptyGenome);
        }
        if let Some(odd) = population.iter().find(|g| g.len() != expected) {
            return Err(ConfigError::GenomeLengthMismatch {
                expected,
                found: odd.len(),
            });
        }
        Self::validate(&toolbox, &params, population.len())?;

        Ok(Self::assemble(
            population,
            toolbox,
            params,
            Pcg64::seed_from_u64(seed),
        ))
    }

    fn validate(
        toolbox: &Toolbox<I, E, S, C, M>,
        params: &EvolutionParams,
        population_size: usize,
    ) -> Result<(), ConfigError> {
        params.validate()?;
        toolbox.initializer.validate()?;
        toolbox.selector.validate(population_size)?;
        toolbox.mutator.validate()
    }

    fn assemble(
        population: Population<T>,
        toolbox: Toolbox<I, E, S, C, M>,
        params: EvolutionParams,
        rng: Pcg64,
    ) -> Self {
        Self {
            population,
            toolbox,
            params,
            generation: 0,
            evaluations: 0,
            phase: Phase::Initialized,
            logbook: Logbook::new(),
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, Phase::Terminated(_))
    }

    pub fn params(&self) -> &EvolutionParams {
        &self.params
    }

    pub fn toolbox(&self) -> &Toolbox<I, E, S, C, M> {
        &self.toolbox
    }

    pub fn logbook(&self) -> &Logbook {
        &self.logbook
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn best(&self) -> Option<&Genome<T>> {
        self.population.best(&self.params.weights)
    }

    /// Evaluates the initial population (generation 0). Only the first call does
    /// any work; later calls return `None`.
    pub fn evaluate_initial(&mut self) -> Option<GenerationRecord> {
        if self.phase != Phase::Initialized {
            return None;
        }
        self.phase = Phase::Evaluating;
        let evaluated = self.population.evaluate_all(&self.toolbox.evaluator);
        let record = self.record(evaluated);
        self.check_termination();
        Some(record)
    }

    fn generation_step(&mut self) -> GenerationRecord {
        self.generation += 1;

        self.phase = Phase::Selecting;
        let size = self.population.len();
        let selected = self.toolbox.selector.select(
            self.population.as_slice(),
            size,
            &self.params.weights,
            &mut self.rng,
        );
        let offspring_count = selected.len();
        let mut offspring = fill_offspring(&selected, self.population.as_slice(), size);
        if offspring_count != size {
            log::warn!(
                "Selector returned {offspring_count} of {size} individuals; offspring resized to {size}"
            );
        }

        self.phase = Phase::Reproducing;
        vary(
            &mut offspring,
            &self.toolbox.crossover,
            &self.toolbox.mutator,
            self.params.crossover_prob,
            self.params.mutation_prob,
            &mut self.rng,
        );

        self.phase = Phase::Reevaluating;
        let mut next = Population::new(offspring);
        let evaluated = next.evaluate_all(&self.toolbox.evaluator);
        self.population = next;

        let record = self.record(evaluated);
        self.check_termination();
        record
    }

    fn record(&mut self, evaluated: usize) -> GenerationRecord {
        self.evaluations += evaluated;
        let record = GenerationRecord {
            generation: self.generation,
            evaluations: evaluated,
            stats: Statistics::compute(&self.population.fitness_values()),
        };
        if let Some(s) = &record.stats {
            log::debug!(
                "gen {:>4} | evals {:>4} | min {:.3} max {:.3} avg {:.3} std {:.3}",
                record.generation,
                evaluated,
                s.min,
                s.max,
                s.mean,
                s.std
            );
        }
        self.logbook.push(record.clone());
        record
    }

    fn check_termination(&mut self) {
        let reached = match (self.params.target_fitness, self.best()) {
            (Some(target), Some(best)) => self.params.weights.meets(best.fitness(), target),
            _ => false,
        };

        self.phase = if reached {
            log::info!("Target fitness reached at generation {}", self.generation);
            Phase::Terminated(StopReason::TargetReached)
        } else if self.generation >= self.params.max_generations {
            log::info!(
                "Generation budget of {} exhausted without reaching the target",
                self.params.max_generations
            );
            Phase::Terminated(StopReason::MaxGenerations)
        } else {
            Phase::Selecting
        };
    }

    /// Runs to termination.
    pub fn run(&mut self) -> EvolutionResult<T> {
        self.run_with_callback(|_| {})
    }

    /// Runs to termination, calling `on_generation` after every replacement
    /// (generation 0 included).
    pub fn run_with_callback<F: FnMut(&GenerationRecord)>(
        &mut self,
        mut on_generation: F,
    ) -> EvolutionResult<T> {
        if let Some(record) = self.evaluate_initial() {
            on_generation(&record);
        }
        while let Some(record) = self.step() {
            on_generation(&record);
        }
        self.result()
    }

    fn result(&self) -> EvolutionResult<T> {
        let stop_reason = match self.phase {
            Phase::Terminated(reason) => reason,
            _ => StopReason::MaxGenerations,
        };
        EvolutionResult {
            stop_reason,
            generations: self.generation,
            evaluations: self.evaluations,
            best: self
                .best()
                .cloned()
                .expect("population is never empty after construction"),
            logbook: self.logbook.clone(),
        }
    }
}

impl<T, I, E, S, C, M> Evolver<T> for SimpleGA<T, I, E, S, C, M>
where
    T: Allele,
    I: Initializer<T>,
    E: Evaluator<T>,
    S: Selector<T>,
    C: Crossover<T>,
    M: Mutator<T>,
{
    fn step(&mut self) -> Option<GenerationRecord> {
        self.evaluate_initial();
        if self.is_terminated() {
            return None;
        }
        Some(self.generation_step())
    }

    fn population(&self) -> &Population<T> {
        &self.population
    }

    fn generation(&self) -> usize {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{FlipBit, RandomBool, Tournament, TwoPoint};

    fn count_ones(alleles: &[bool]) -> Vec<f64> {
        vec![alleles.iter().filter(|&&b| b).count() as f64]
    }

    fn toolbox() -> Toolbox<RandomBool, fn(&[bool]) -> Vec<f64>, Tournament, TwoPoint, FlipBit> {
        Toolbox::new(
            RandomBool::default(),
            count_ones as fn(&[bool]) -> Vec<f64>,
            Tournament { size: 3 },
            TwoPoint,
            FlipBit { indpb: 0.05 },
        )
    }

    #[test]
    fn test_phase_progression() {
        let params = EvolutionParams {
            max_generations: 2,
            ..EvolutionParams::default()
        };
        let mut ga = SimpleGA::new(toolbox(), params, 64, 10, Some(1)).unwrap();
        assert_eq!(ga.phase(), Phase::Initialized);

        assert!(ga.evaluate_initial().is_some());
        assert_eq!(ga.phase(), Phase::Selecting);
        assert!(ga.evaluate_initial().is_none());

        assert_eq!(ga.step().map(|r| r.generation), Some(1));
        assert_eq!(ga.step().map(|r| r.generation), Some(2));
        assert_eq!(ga.phase(), Phase::Terminated(StopReason::MaxGenerations));
        assert!(ga.step().is_none());
    }

    #[test]
    fn test_zero_generation_budget_only_evaluates() {
        let params = EvolutionParams {
            max_generations: 0,
            ..EvolutionParams::default()
        };
        let mut ga = SimpleGA::new(toolbox(), params, 8, 6, Some(3)).unwrap();
        let result = ga.run();
        assert_eq!(result.generations, 0);
        assert_eq!(result.evaluations, 6);
        assert_eq!(result.logbook.len(), 1);
        assert_eq!(result.stop_reason, StopReason::MaxGenerations);
    }

    #[test]
    fn test_target_already_met_stops_at_generation_zero() {
        let params = EvolutionParams {
            target_fitness: Some(0.0),
            ..EvolutionParams::default()
        };
        let mut ga = SimpleGA::new(toolbox(), params, 8, 6, Some(3)).unwrap();
        let result = ga.run();
        assert_eq!(result.stop_reason, StopReason::TargetReached);
        assert_eq!(result.generations, 0);
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert_eq!(
            SimpleGA::new(toolbox(), EvolutionParams::default(), 0, 10, None).err(),
            Some(ConfigError::EmptyGenome)
        );
        assert_eq!(
            SimpleGA::new(toolbox(), EvolutionParams::default(), 5, 0, None).err(),
            Some(ConfigError::EmptyPopulation)
        );
        assert!(matches!(
            SimpleGA::new(toolbox(), EvolutionParams::default(), 5, 2, None),
            Err(ConfigError::InvalidTournamentSize { size: 3, population: 2 })
        ));
        let bad = EvolutionParams {
            crossover_prob: -0.5,
            ..EvolutionParams::default()
        };
        assert!(matches!(
            SimpleGA::new(toolbox(), bad, 5, 10, None),
            Err(ConfigError::InvalidProbability { name: "crossover_prob", .. })
        ));
    }
}
