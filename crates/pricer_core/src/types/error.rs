//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors raised before or during a valuation
//! - `DateError`: Errors from date construction, parsing and schedules
//! - `InterpolationError`: Errors from curve interpolation
//!
//! Every failure is detected locally and surfaced immediately. Nothing is
//! clamped into range: a perturbed or degenerate input is an error, never a
//! silently adjusted valuation.

use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `InvalidParameter`: An input is outside its valid domain before simulation starts
/// - `NumericalDegeneracy`: A computation would divide by zero or produce NaN
/// - `ConfigurationMismatch`: A bump size pushes a perturbed input out of its domain
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid_parameter("volatility", "must be non-negative, got -0.2");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'volatility': must be non-negative, got -0.2"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Input outside its valid domain (non-positive maturity, negative
    /// volatility, zero path count, barrier ordering violation, ...).
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Division by a zero or near-zero quantity.
    #[error("Numerical degeneracy: {0}")]
    NumericalDegeneracy(String),

    /// Finite-difference bump leaves the parameter's valid domain.
    #[error("Configuration mismatch for '{parameter}' with bump {bump}: {reason}")]
    ConfigurationMismatch {
        /// Perturbed parameter name
        parameter: &'static str,
        /// Bump size that caused the violation
        bump: f64,
        /// Description of the violated domain
        reason: String,
    },
}

impl PricingError {
    /// Creates an `InvalidParameter` error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Creates a `NumericalDegeneracy` error.
    pub fn degeneracy(msg: impl Into<String>) -> Self {
        Self::NumericalDegeneracy(msg.into())
    }

    /// Creates a `ConfigurationMismatch` error.
    pub fn mismatch(parameter: &'static str, bump: f64, reason: impl Into<String>) -> Self {
        Self::ConfigurationMismatch {
            parameter,
            bump,
            reason: reason.into(),
        }
    }
}

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Schedule end date does not fall after its start date.
    #[error("Invalid schedule: end {end} must be after start {start}")]
    InvalidSchedule {
        /// Schedule start (ISO 8601)
        start: String,
        /// Schedule end (ISO 8601)
        end: String,
    },
}

/// Interpolation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpolationError {
    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<InterpolationError> for PricingError {
    fn from(err: InterpolationError) -> Self {
        match err {
            InterpolationError::OutOfBounds { .. } => {
                PricingError::invalid_parameter("spot", err.to_string())
            }
            other => PricingError::invalid_parameter("grid", other.to_string()),
        }
    }
}
