use thiserror::Error;

/// Rejected configuration, reported before any generation runs.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Genome length must be at least 1")]
    EmptyGenome,
    #[error("Population size must be at least 1")]
    EmptyPopulation,
    #[error("Tournament size {size} must be between 1 and the population size {population}")]
    InvalidTournamentSize { size: usize, population: usize },
    #[error("At least one objective weight is required")]
    NoObjectives,
    #[error("Objective weight must be finite and non-zero, got {0}")]
    InvalidWeight(f64),
    #[error("Genome length mismatch: expected {expected}, found {found}")]
    GenomeLengthMismatch { expected: usize, found: usize },
}

impl ConfigError {
    pub(crate) fn check_probability(
        name: &'static str,
        value: f64,
    ) -> std::result::Result<(), ConfigError> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::InvalidProbability { name, value })
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_probability_bounds() {
        assert_eq!(ConfigError::check_probability("p", 0.0), Ok(()));
        assert_eq!(ConfigError::check_probability("p", 1.0), Ok(()));
        assert_eq!(
            ConfigError::check_probability("p", 1.5),
            Err(ConfigError::InvalidProbability {
                name: "p",
                value: 1.5
            })
        );
        assert!(ConfigError::check_probability("p", f64::NAN).is_err());
    }

    #[test]
    fn test_config_error_converts_into_crate_error() {
        fn checked() -> Result<()> {
            ConfigError::check_probability("crossover_prob", -0.5)?;
            Ok(())
        }
        let err = checked().unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidProbability { .. })));
        assert_eq!(
            err.to_string(),
            "Configuration error: crossover_prob must be a probability in [0, 1], got -0.5"
        );
    }
}
