//! Bump configuration errors.

use pricer_core::PricingError;
use thiserror::Error;

/// Rejected bump configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BumpConfigError {
    /// Bump size is zero, negative or not finite.
    #[error("Invalid bump for '{parameter}': must be positive and finite, got {value}")]
    InvalidBump {
        /// Perturbed parameter name
        parameter: &'static str,
        /// Rejected bump size
        value: f64,
    },
}

impl From<BumpConfigError> for PricingError {
    fn from(err: BumpConfigError) -> Self {
        match err {
            BumpConfigError::InvalidBump { parameter, value } => PricingError::mismatch(
                parameter,
                value,
                "bump size must be positive and finite",
            ),
        }
    }
}
