use crate::fitness::Fitness;
use serde::{Deserialize, Serialize};

/// Anything that can sit at one position of a genome.
pub trait Allele: Clone + Serialize + for<'de> Deserialize<'de> + Send + Sync {}

impl<T> Allele for T where T: Clone + Serialize + for<'de> Deserialize<'de> + Send + Sync {}

/// Binary toggle used by bit-flip mutation.
pub trait Flip {
    fn flip(&mut self);
}

impl Flip for bool {
    fn flip(&mut self) {
        *self = !*self;
    }
}

macro_rules! impl_flip_for_int {
    ($($t:ty),*) => {
        $(
            impl Flip for $t {
                fn flip(&mut self) {
                    *self = if *self == 0 { 1 } else { 0 };
                }
            }
        )*
    };
}

impl_flip_for_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// One candidate solution: a fixed-length allele sequence plus its cached fitness.
///
/// The alleles are only reachable mutably through [`Genome::alleles_mut`], which
/// invalidates the fitness first. A valid fitness therefore always describes the
/// current alleles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Allele")]
pub struct Genome<T: Allele> {
    alleles: Vec<T>,
    fitness: Fitness,
}

impl<T: Allele> Genome<T> {
    pub fn new(alleles: Vec<T>) -> Self {
        Self {
            alleles,
            fitness: Fitness::Invalid,
        }
    }

    pub fn alleles(&self) -> &[T] {
        &self.alleles
    }

    /// Mutable access to the alleles. Invalidates the cached fitness.
    pub fn alleles_mut(&mut self) -> &mut [T] {
        self.fitness.invalidate();
        &mut self.alleles
    }

    pub fn into_alleles(self) -> Vec<T> {
        self.alleles
    }

    pub fn len(&self) -> usize {
        self.alleles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alleles.is_empty()
    }

    pub fn fitness(&self) -> &Fitness {
        &self.fitness
    }

    /// Stores the result of evaluating the current alleles.
    pub fn set_fitness(&mut self, values: Vec<f64>) {
        self.fitness.assign(values);
    }

    pub fn invalidate(&mut self) {
        self.fitness.invalidate();
    }

    pub fn is_valid(&self) -> bool {
        self.fitness.is_valid()
    }
}

impl<T: Allele> From<Vec<T>> for Genome<T> {
    fn from(alleles: Vec<T>) -> Self {
        Self::new(alleles)
    }
}
