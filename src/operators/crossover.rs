use crate::{Allele, Crossover, Genome};
use rand::Rng;

/// Swaps `a[start..end]` with `b[start..end]` and invalidates both genomes.
///
/// The range is clamped to the shorter genome; an empty range leaves the
/// alleles untouched but still invalidates.
pub fn swap_segment<T: Allele>(a: &mut Genome<T>, b: &mut Genome<T>, start: usize, end: usize) {
    let size = a.len().min(b.len());
    let end = end.min(size);
    let start = start.min(end);
    a.alleles_mut()[start..end].swap_with_slice(&mut b.alleles_mut()[start..end]);
}

/// Two-point crossover. Draws two distinct cut points `i < j` uniformly from
/// `0..=N`, `N` being the shorter length, and exchanges `[i, j)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPoint;

impl TwoPoint {
    fn cut_points<R: Rng + ?Sized>(size: usize, rng: &mut R) -> (usize, usize) {
        let first = rng.random_range(0..=size);
        let mut second = rng.random_range(0..size);
        if second >= first {
            second += 1;
            (first, second)
        } else {
            (second, first)
        }
    }
}

impl<T: Allele> Crossover<T> for TwoPoint {
    fn mate<R: Rng + ?Sized>(&self, a: &mut Genome<T>, b: &mut Genome<T>, rng: &mut R) {
        let size = a.len().min(b.len());
        if size == 0 {
            a.invalidate();
            b.invalidate();
            return;
        }
        let (start, end) = Self::cut_points(size, rng);
        swap_segment(a, b, start, end);
    }
}
