//! Run configuration for the bundled One Max problem.
//!
//! Every field has a default, so a TOML file only needs the values it changes:
//!
//! ```toml
//! genome_length = 64
//! population_size = 200
//! seed = 42
//! ```

use crate::algorithms::simple::EvolutionParams;
use crate::error::{ConfigError, Result};
use crate::fitness::Weights;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Alleles per genome (N).
    pub genome_length: usize,
    /// Individuals per generation (M).
    pub population_size: usize,
    /// Probability that an adjacent pair is crossed (CXPB).
    pub crossover_prob: f64,
    /// Probability that an individual is mutated (MUTPB).
    pub mutation_prob: f64,
    /// Per-allele flip probability inside the mutator.
    pub mutation_indpb: f64,
    pub tournament_size: usize,
    /// Stop once the best fitness reaches this value. Defaults to the genome length.
    pub target_fitness: Option<f64>,
    pub max_generations: usize,
    /// RNG seed; `None` draws a fresh one per run.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            genome_length: 100,
            population_size: 300,
            crossover_prob: 0.5,
            mutation_prob: 0.2,
            mutation_indpb: 0.05,
            tournament_size: 3,
            target_fitness: None,
            max_generations: 1000,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.genome_length == 0 {
            return Err(ConfigError::EmptyGenome);
        }
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        ConfigError::check_probability("crossover_prob", self.crossover_prob)?;
        ConfigError::check_probability("mutation_prob", self.mutation_prob)?;
        ConfigError::check_probability("mutation_indpb", self.mutation_indpb)?;
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(ConfigError::InvalidTournamentSize {
                size: self.tournament_size,
                population: self.population_size,
            });
        }
        Ok(())
    }

    pub fn target(&self) -> f64 {
        self.target_fitness.unwrap_or(self.genome_length as f64)
    }

    pub fn params(&self) -> EvolutionParams {
        EvolutionParams {
            crossover_prob: self.crossover_prob,
            mutation_prob: self.mutation_prob,
            target_fitness: Some(self.target()),
            max_generations: self.max_generations,
            weights: Weights::maximize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = EvolutionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target(), 100.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EvolutionConfig::from_toml_str(
            "genome_length = 20\npopulation_size = 50\nseed = 9\n",
        )
        .unwrap();
        assert_eq!(config.genome_length, 20);
        assert_eq!(config.population_size, 50);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.crossover_prob, 0.5);
        assert_eq!(config.target(), 20.0);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(EvolutionConfig::from_toml_str("genome_length = \"many\"").is_err());
    }

    #[test]
    fn test_rejects_bad_probability() {
        let config = EvolutionConfig {
            mutation_prob: 1.5,
            ..EvolutionConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidProbability {
                name: "mutation_prob",
                value: 1.5
            })
        );
    }

    #[test]
    fn test_rejects_oversized_tournament() {
        let config = EvolutionConfig {
            population_size: 2,
            tournament_size: 3,
            ..EvolutionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTournamentSize { size: 3, population: 2 })
        ));
    }

    #[test]
    fn test_rejects_zero_lengths() {
        let no_genome = EvolutionConfig {
            genome_length: 0,
            ..EvolutionConfig::default()
        };
        assert_eq!(no_genome.validate(), Err(ConfigError::EmptyGenome));

        let no_population = EvolutionConfig {
            population_size: 0,
            ..EvolutionConfig::default()
        };
        assert_eq!(no_population.validate(), Err(ConfigError::EmptyPopulation));
    }
}
