//! Generational evolutionary algorithm engine.
//!
//! A population of [`Genome`]s is evolved by pluggable operators (initialization,
//! evaluation, selection, crossover, mutation) bundled into a [`Toolbox`]. Each
//! genome caches its [`Fitness`]; any change to the alleles invalidates the cache,
//! and only invalid individuals are re-evaluated each generation.
//!
//! ```rust
//! use symbios_evolve::{EvolutionConfig, StopReason, onemax};
//!
//! let config = EvolutionConfig {
//!     genome_length: 20,
//!     population_size: 50,
//!     seed: Some(7),
//!     ..EvolutionConfig::default()
//! };
//! let mut ga = onemax::engine(&config).unwrap();
//! let result = ga.run();
//! assert!(result.generations <= config.max_generations);
//! if result.stop_reason == StopReason::TargetReached {
//!     assert_eq!(result.best.fitness().primary(), Some(20.0));
//! }
//! ```

use rand::Rng;

pub mod config;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod onemax;
pub mod operators;
pub mod population;
pub mod stats;

pub mod algorithms {
    pub mod simple;
}

pub use algorithms::simple::{EvolutionParams, EvolutionResult, Phase, SimpleGA, StopReason};
pub use config::EvolutionConfig;
pub use error::{ConfigError, Error, Result};
pub use fitness::{Fitness, Weights};
pub use genome::{Allele, Flip, Genome};
pub use operators::Toolbox;
pub use population::Population;
pub use stats::{GenerationRecord, Logbook, Statistics};

/// Produces a single allele. Repeated `n` times it builds a genome.
pub trait Initializer<T: Allele>: Send + Sync {
    fn allele<R: Rng + ?Sized>(&self, rng: &mut R) -> T;

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        Ok(())
    }
}

/// Maps an allele sequence to its objective values.
///
/// Implementations must be deterministic in the alleles: the cached fitness of a
/// genome is only trusted because evaluating the same alleles twice gives the same
/// result.
pub trait Evaluator<T: Allele>: Send + Sync {
    fn evaluate(&self, alleles: &[T]) -> Vec<f64>;
}

impl<T, F> Evaluator<T> for F
where
    T: Allele,
    F: Fn(&[T]) -> Vec<f64> + Send + Sync,
{
    fn evaluate(&self, alleles: &[T]) -> Vec<f64> {
        self(alleles)
    }
}

/// Picks `k` individuals (repetition allowed) favoring better fitness.
pub trait Selector<T: Allele>: Send + Sync {
    /// Should return exactly `k` references, or none when `population` is empty.
    /// The evolution loop resizes any other count to keep the population size fixed.
    fn select<'a, R: Rng + ?Sized>(
        &self,
        population: &'a [Genome<T>],
        k: usize,
        weights: &Weights,
        rng: &mut R,
    ) -> Vec<&'a Genome<T>>;

    /// Rejects settings that cannot work with a population of this size.
    fn validate(&self, _population_size: usize) -> std::result::Result<(), ConfigError> {
        Ok(())
    }
}

/// Recombines two genomes in place.
pub trait Crossover<T: Allele>: Send + Sync {
    fn mate<R: Rng + ?Sized>(&self, a: &mut Genome<T>, b: &mut Genome<T>, rng: &mut R);
}

/// Perturbs one genome in place.
pub trait Mutator<T: Allele>: Send + Sync {
    fn mutate<R: Rng + ?Sized>(&self, genome: &mut Genome<T>, rng: &mut R);

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        Ok(())
    }
}

/// The master engine trait.
pub trait Evolver<T: Allele> {
    /// Runs one generation. Returns `None` once the engine has terminated.
    fn step(&mut self) -> Option<GenerationRecord>;
    fn population(&self) -> &Population<T>;
    fn generation(&self) -> usize;
}
