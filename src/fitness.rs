use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Compare two f64 values, treating NaN as less than all other values.
/// This ensures NaN fitness individuals sort to the end (lowest priority).
fn cmp_f64_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Cached evaluation result of a genome.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Fitness {
    /// Not evaluated, or the alleles changed since the last evaluation.
    #[default]
    Invalid,
    /// Objective values of the current alleles.
    Valid(Vec<f64>),
}

impl Fitness {
    pub fn is_valid(&self) -> bool {
        matches!(self, Fitness::Valid(_))
    }

    pub fn values(&self) -> Option<&[f64]> {
        match self {
            Fitness::Valid(values) => Some(values),
            Fitness::Invalid => None,
        }
    }

    /// First objective value, if valid.
    pub fn primary(&self) -> Option<f64> {
        self.values().and_then(|v| v.first().copied())
    }

    pub fn invalidate(&mut self) {
        *self = Fitness::Invalid;
    }

    pub fn assign(&mut self, values: Vec<f64>) {
        *self = Fitness::Valid(values);
    }
}

/// Objective count and direction: a positive weight maximizes its objective,
/// a negative weight minimizes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weights(Vec<f64>);

impl Weights {
    pub fn new(weights: Vec<f64>) -> Self {
        Self(weights)
    }

    pub fn maximize() -> Self {
        Self(vec![1.0])
    }

    pub fn minimize() -> Self {
        Self(vec![-1.0])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::NoObjectives);
        }
        if let Some(&w) = self.0.iter().find(|w| !w.is_finite() || **w == 0.0) {
            return Err(ConfigError::InvalidWeight(w));
        }
        Ok(())
    }

    /// Orders two fitnesses, `Greater` meaning `a` is better.
    ///
    /// Invalid fitness ranks below any valid one. Valid values are compared
    /// lexicographically after weighting; objectives without a weight are ignored.
    pub fn compare(&self, a: &Fitness, b: &Fitness) -> Ordering {
        match (a.values(), b.values()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => {
                for ((x, y), w) in a.iter().zip(b).zip(&self.0) {
                    match cmp_f64_nan_last(x * w, y * w) {
                        Ordering::Equal => continue,
                        other => return other,
                    }
                }
                Ordering::Equal
            }
        }
    }

    /// Whether the first objective of `fitness` is at least as good as `target`.
    pub fn meets(&self, fitness: &Fitness, target: f64) -> bool {
        match (fitness.primary(), self.0.first()) {
            (Some(value), Some(&w)) => value * w >= target * w,
            _ => false,
        }
    }

    /// Position of the first best fitness, `None` for an empty sequence.
    pub fn best_index<'a, I>(&self, fitnesses: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a Fitness>,
    {
        let mut best: Option<(usize, &Fitness)> = None;
        for (i, f) in fitnesses.into_iter().enumerate() {
            let better = match best {
                Some((_, current)) => self.compare(f, current) == Ordering::Greater,
                None => true,
            };
            if better {
                best = Some((i, f));
            }
        }
        best.map(|(i, _)| i)
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::maximize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_is_observable() {
        let mut f = Fitness::default();
        assert!(!f.is_valid());
        f.assign(vec![3.0]);
        assert!(f.is_valid());
        assert_eq!(f.values(), Some(&[3.0][..]));
        f.invalidate();
        assert!(!f.is_valid());
        assert_eq!(f.primary(), None);
    }

    #[test]
    fn test_compare_respects_direction() {
        let low = Fitness::Valid(vec![1.0]);
        let high = Fitness::Valid(vec![5.0]);

        assert_eq!(Weights::maximize().compare(&high, &low), Ordering::Greater);
        assert_eq!(Weights::minimize().compare(&high, &low), Ordering::Less);
    }

    #[test]
    fn test_invalid_and_nan_rank_lowest() {
        let w = Weights::maximize();
        let valid = Fitness::Valid(vec![-1e9]);
        let nan = Fitness::Valid(vec![f64::NAN]);

        assert_eq!(w.compare(&Fitness::Invalid, &valid), Ordering::Less);
        assert_eq!(w.compare(&nan, &valid), Ordering::Less);
        assert_eq!(w.compare(&Fitness::Invalid, &nan), Ordering::Less);
    }

    #[test]
    fn test_lexicographic_multi_objective() {
        let w = Weights::new(vec![1.0, -1.0]);
        let a = Fitness::Valid(vec![2.0, 3.0]);
        let b = Fitness::Valid(vec![2.0, 1.0]);
        assert_eq!(w.compare(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_meets_target() {
        let f = Fitness::Valid(vec![20.0]);
        assert!(Weights::maximize().meets(&f, 20.0));
        assert!(!Weights::maximize().meets(&f, 21.0));
        assert!(Weights::minimize().meets(&f, 25.0));
        assert!(!Weights::maximize().meets(&Fitness::Invalid, 0.0));
    }

    #[test]
    fn test_best_picks_first_of_ties() {
        let items = [
            Fitness::Valid(vec![1.0]),
            Fitness::Valid(vec![4.0]),
            Fitness::Valid(vec![4.0]),
        ];
        assert_eq!(Weights::maximize().best_index(&items), Some(1));
        assert_eq!(Weights::maximize().best_index(&[]), None);
    }

    #[test]
    fn test_weights_validation() {
        assert!(Weights::maximize().validate().is_ok());
        assert!(matches!(
            Weights::new(vec![]).validate(),
            Err(ConfigError::NoObjectives)
        ));
        assert!(matches!(
            Weights::new(vec![1.0, 0.0]).validate(),
            Err(ConfigError::InvalidWeight(_))
        ));
    }
}
