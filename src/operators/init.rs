use crate::{Allele, ConfigError, Genome, Initializer, Population};
use rand::Rng;
use rand::distr::uniform::SampleUniform;

/// `true` with probability `p`.
#[derive(Debug, Clone, Copy)]
pub struct RandomBool {
    pub p: f64,
}

impl Default for RandomBool {
    fn default() -> Self {
        Self { p: 0.5 }
    }
}

impl Initializer<bool> for RandomBool {
    fn allele<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        // NaN would panic inside `random_bool`
        let p = if self.p.is_nan() { 0.5 } else { self.p.clamp(0.0, 1.0) };
        rng.random_bool(p)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_probability("init_p", self.p)
    }
}

/// Uniform integer in `low..=high`.
#[derive(Debug, Clone, Copy)]
pub struct UniformInt<T> {
    pub low: T,
    pub high: T,
}

impl<T> Initializer<T> for UniformInt<T>
where
    T: Allele + SampleUniform + PartialOrd + Copy,
{
    fn allele<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.random_range(self.low..=self.high)
    }
}

pub fn init_genome<T, I, R>(initializer: &I, length: usize, rng: &mut R) -> Genome<T>
where
    T: Allele,
    I: Initializer<T>,
    R: Rng + ?Sized,
{
    Genome::new((0..length).map(|_| initializer.allele(rng)).collect())
}

pub fn init_population<T, I, R>(
    initializer: &I,
    genome_length: usize,
    size: usize,
    rng: &mut R,
) -> Population<T>
where
    T: Allele,
    I: Initializer<T>,
    R: Rng + ?Sized,
{
    Population::new(
        (0..size)
            .map(|_| init_genome(initializer, genome_length, rng))
            .collect(),
    )
}
