//! Error types for the Monte Carlo engine configuration.

use crate::rng::RngKind;
use pricer_core::PricingError;
use thiserror::Error;

/// Configuration error for the Monte Carlo engine.
///
/// Raised by [`MonteCarloConfigBuilder::build`](super::MonteCarloConfigBuilder::build)
/// when invalid parameters are provided.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Path count outside valid range [1, 10_000_000].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),
    /// Seed wider than the generator's seed space.
    #[error("Seed {seed} is out of range for {rng}: must not exceed {}", .rng.max_seed())]
    SeedOutOfRange {
        /// Requested seed.
        seed: u64,
        /// Generator that rejected it.
        rng: RngKind,
    },
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidPathCount(_) => {
                PricingError::invalid_parameter("n_paths", err.to_string())
            }
            ConfigError::SeedOutOfRange { .. } => {
                PricingError::invalid_parameter("seed", err.to_string())
            }
            ConfigError::InvalidParameter { name, value } => {
                PricingError::invalid_parameter(name, value)
            }
        }
    }
}
