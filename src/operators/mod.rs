//! Bundled operator strategies and the [`Toolbox`] that carries them.
//!
//! Each operator is a plain struct whose fields are its fixed parameters
//! (tournament size, per-allele flip probability, ...). The toolbox is built once
//! and handed to the engine; it is never modified during a run.

mod crossover;
mod init;
mod mutation;
mod selection;

pub use crossover::{TwoPoint, swap_segment};
pub use init::{RandomBool, UniformInt, init_genome, init_population};
pub use mutation::FlipBit;
pub use selection::Tournament;

/// The operator set used by an evolution run.
#[derive(Debug, Clone)]
pub struct Toolbox<I, E, S, C, M> {
    pub initializer: I,
    pub evaluator: E,
    pub selector: S,
    pub crossover: C,
    pub mutator: M,
}

impl<I, E, S, C, M> Toolbox<I, E, S, C, M> {
    pub fn new(initializer: I, evaluator: E, selector: S, crossover: C, mutator: M) -> Self {
        Self {
            initializer,
            evaluator,
            selector,
            crossover,
            mutator,
        }
    }
}
