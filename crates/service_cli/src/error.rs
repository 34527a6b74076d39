//! CLI error types.

use pricer_core::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `autocall` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Valuation or sensitivity failure.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Output could not be serialised.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// I/O failure writing results.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
