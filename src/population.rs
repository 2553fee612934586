use crate::{Allele, Evaluator, Genome, Weights};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Element-wise deep copy of a selection.
pub fn clone_all<T: Allele>(selected: &[&Genome<T>]) -> Vec<Genome<T>> {
    selected.iter().map(|&g| g.clone()).collect()
}

/// Ordered collection of genomes alive in one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Allele")]
pub struct Population<T: Allele> {
    genomes: Vec<Genome<T>>,
}

impl<T: Allele> Population<T> {
    pub fn new(genomes: Vec<Genome<T>>) -> Self {
        Self { genomes }
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Genome<T>> {
        self.genomes.iter()
    }

    pub fn as_slice(&self) -> &[Genome<T>] {
        &self.genomes
    }

    pub fn into_genomes(self) -> Vec<Genome<T>> {
        self.genomes
    }

    /// Replaces every individual at once.
    pub fn replace(&mut self, genomes: Vec<Genome<T>>) {
        self.genomes = genomes;
    }

    pub fn invalid_count(&self) -> usize {
        self.genomes.iter().filter(|g| !g.is_valid()).count()
    }

    /// Evaluates every individual without a valid fitness and returns how many
    /// evaluations ran. Valid individuals are left untouched.
    pub fn evaluate_all<E: Evaluator<T>>(&mut self, evaluator: &E) -> usize {
        let invalid = self.invalid_count();
        if invalid == 0 {
            return 0;
        }

        #[cfg(feature = "parallel")]
        self.genomes
            .par_iter_mut()
            .filter(|g| !g.is_valid())
            .for_each(|g| {
                let values = evaluator.evaluate(g.alleles());
                g.set_fitness(values);
            });
        #[cfg(not(feature = "parallel"))]
        for g in self.genomes.iter_mut().filter(|g| !g.is_valid()) {
            let values = evaluator.evaluate(g.alleles());
            g.set_fitness(values);
        }

        invalid
    }

    /// First individual with the best fitness under `weights`.
    pub fn best(&self, weights: &Weights) -> Option<&Genome<T>> {
        weights
            .best_index(self.genomes.iter().map(|g| g.fitness()))
            .map(|i| &self.genomes[i])
    }

    /// Primary objective of every evaluated individual, in population order.
    pub fn fitness_values(&self) -> Vec<f64> {
        self.genomes
            .iter()
            .filter_map(|g| g.fitness().primary())
            .collect()
    }
}

impl<T: Allele> From<Vec<Genome<T>>> for Population<T> {
    fn from(genomes: Vec<Genome<T>>) -> Self {
        Self::new(genomes)
    }
}

impl<'a, T: Allele> IntoIterator for &'a Population<T> {
    type Item = &'a Genome<T>;
    type IntoIter = std::slice::Iter<'a, Genome<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.genomes.iter()
    }
}
