//! One Max: maximize the number of `true` alleles in a fixed-length bit vector.

use crate::operators::{FlipBit, RandomBool, Toolbox, Tournament, TwoPoint};
use crate::{ConfigError, Evaluator, EvolutionConfig, SimpleGA};

/// Counts the `true` alleles.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneMax;

impl Evaluator<bool> for OneMax {
    fn evaluate(&self, alleles: &[bool]) -> Vec<f64> {
        vec![alleles.iter().filter(|&&b| b).count() as f64]
    }
}

pub type OneMaxToolbox = Toolbox<RandomBool, OneMax, Tournament, TwoPoint, FlipBit>;
pub type OneMaxGA = SimpleGA<bool, RandomBool, OneMax, Tournament, TwoPoint, FlipBit>;

pub fn toolbox(config: &EvolutionConfig) -> OneMaxToolbox {
    Toolbox::new(
        RandomBool::default(),
        OneMax,
        Tournament {
            size: config.tournament_size,
        },
        TwoPoint,
        FlipBit {
            indpb: config.mutation_indpb,
        },
    )
}

/// Validates `config` and builds an engine with a random initial population.
pub fn engine(config: &EvolutionConfig) -> Result<OneMaxGA, ConfigError> {
    config.validate()?;
    SimpleGA::new(
        toolbox(config),
        config.params(),
        config.genome_length,
        config.population_size,
        config.seed,
    )
}
