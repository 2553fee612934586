use crate::{Allele, ConfigError, Flip, Genome, Mutator};
use rand::Rng;

/// Bit-flip mutation: each allele is toggled independently with probability `indpb`.
#[derive(Debug, Clone, Copy)]
pub struct FlipBit {
    pub indpb: f64,
}

impl<T: Allele + Flip> Mutator<T> for FlipBit {
    fn mutate<R: Rng + ?Sized>(&self, genome: &mut Genome<T>, rng: &mut R) {
        let indpb = self.indpb.clamp(0.0, 1.0);
        for allele in genome.alleles_mut() {
            if rng.random_bool(indpb) {
                allele.flip();
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_probability("mutation_indpb", self.indpb)
    }
}
