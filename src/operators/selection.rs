use crate::{Allele, ConfigError, Genome, Selector, Weights};
use rand::Rng;
use rand::prelude::IndexedRandom;
use std::cmp::Ordering;

/// Tournament selection: each of the `k` picks is the best of `size` aspirants
/// drawn uniformly with replacement. Ties keep the first aspirant drawn.
#[derive(Debug, Clone, Copy)]
pub struct Tournament {
    pub size: usize,
}

impl Default for Tournament {
    fn default() -> Self {
        Self { size: 3 }
    }
}

impl<T: Allele> Selector<T> for Tournament {
    fn select<'a, R: Rng + ?Sized>(
        &self,
        population: &'a [Genome<T>],
        k: usize,
        weights: &Weights,
        rng: &mut R,
    ) -> Vec<&'a Genome<T>> {
        if population.is_empty() {
            return Vec::new();
        }
        let size = self.size.max(1);

        (0..k)
            .filter_map(|_| {
                let mut best = population.choose(rng)?;
                for _ in 1..size {
                    let aspirant = population.choose(rng)?;
                    if weights.compare(aspirant.fitness(), best.fitness()) == Ordering::Greater {
                        best = aspirant;
                    }
                }
                Some(best)
            })
            .collect()
    }

    fn validate(&self, population_size: usize) -> Result<(), ConfigError> {
        if self.size == 0 || self.size > population_size {
            return Err(ConfigError::InvalidTournamentSize {
                size: self.size,
                population: population_size,
            });
        }
        Ok(())
    }
}
