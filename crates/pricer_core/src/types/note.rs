//! Contract terms of the barrier autocallable note.
//!
//! The note observes the underlying on `observation_count` equally spaced
//! dates. On each date:
//!
//! - level ≥ autocall barrier: one coupon is paid and the note is called
//! - coupon barrier ≤ level < autocall barrier: one coupon is paid
//! - otherwise nothing is paid for that date
//!
//! A note that is never called redeems `notional` at maturity, or
//! `notional × terminal / reference_level` when the terminal level is below the
//! coupon (capital protection) barrier.

use super::error::PricingError;
use std::fmt;
use std::str::FromStr;

/// Smallest reference level accepted before the capital-protection ratio is
/// considered degenerate.
pub const REFERENCE_LEVEL_FLOOR: f64 = 1e-12;

/// Cash paid when the note is called early.
///
/// The two variants are the two readings of an autocall event:
///
/// | Variant | Call date | Maturity |
/// |---------|-----------|----------|
/// | `Par` | coupon + full notional | nothing further |
/// | `TerminalLevel` | coupon only | redemption from the terminal level, called or not |
///
/// `TerminalLevel` reproduces the legacy reference valuation; `Par` is the
/// contractual term-sheet behaviour and the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AutocallRedemption {
    /// Called notes redeem at par on the call date.
    #[default]
    Par,
    /// Redemption of every trajectory follows the capital protection rule at maturity.
    TerminalLevel,
}

impl AutocallRedemption {
    /// Returns the configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            AutocallRedemption::Par => "par",
            AutocallRedemption::TerminalLevel => "terminal-level",
        }
    }
}

impl fmt::Display for AutocallRedemption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AutocallRedemption {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "par" => Ok(AutocallRedemption::Par),
            "terminal-level" | "terminal_level" | "terminal" => {
                Ok(AutocallRedemption::TerminalLevel)
            }
            other => Err(PricingError::invalid_parameter(
                "autocall_redemption",
                format!("unknown rule '{}', expected 'par' or 'terminal-level'", other),
            )),
        }
    }
}

/// Contract terms of the note.
///
/// Barrier levels, notional, reference level and coupon share the units of
/// the underlying's spot. Use [`NoteTerms::builder`] to construct validated
/// instances.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{AutocallRedemption, NoteTerms};
///
/// let terms = NoteTerms::builder()
///     .maturity(2.0)
///     .observation_count(4)
///     .autocall_barrier(100.0)
///     .coupon_barrier(70.0)
///     .notional(1000.0)
///     .reference_level(100.0)
///     .coupon_amount(25.0)
///     .autocall_redemption(AutocallRedemption::TerminalLevel)
///     .build()
///     .unwrap();
///
/// assert_eq!(terms.observation_step(), 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteTerms {
    /// Time to the final observation, in years.
    pub maturity: f64,
    /// Number of equally spaced future observation dates (m).
    pub observation_count: usize,
    /// Early redemption trigger level.
    pub autocall_barrier: f64,
    /// Coupon and capital protection level.
    pub coupon_barrier: f64,
    /// Invested amount (I0).
    pub notional: f64,
    /// Initial reference level of the underlying (VIS).
    pub reference_level: f64,
    /// Coupon paid per qualifying observation (Qj).
    pub coupon_amount: f64,
    /// Cash paid on an autocall event.
    #[cfg_attr(feature = "serde", serde(default))]
    pub autocall_redemption: AutocallRedemption,
}

impl NoteTerms {
    /// Creates a new terms builder.
    #[inline]
    pub fn builder() -> NoteTermsBuilder {
        NoteTermsBuilder::default()
    }

    /// Time between two consecutive observations.
    #[inline]
    pub fn observation_step(&self) -> f64 {
        self.maturity / self.observation_count as f64
    }

    /// Validates the terms.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for a non-positive maturity, zero observation
    ///   count, non-positive barrier or notional, negative coupon, or an
    ///   autocall barrier below the coupon barrier
    /// - `NumericalDegeneracy` for a reference level at or near zero
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.maturity.is_finite() || self.maturity <= 0.0 {
            return Err(PricingError::invalid_parameter(
                "maturity",
                format!("must be positive and finite, got {}", self.maturity),
            ));
        }
        if self.observation_count == 0 {
            return Err(PricingError::invalid_parameter(
                "observation_count",
                "at least one observation date is required",
            ));
        }
        positive("autocall_barrier", self.autocall_barrier)?;
        positive("coupon_barrier", self.coupon_barrier)?;
        if self.autocall_barrier < self.coupon_barrier {
            return Err(PricingError::invalid_parameter(
                "autocall_barrier",
                format!(
                    "autocall barrier {} is below coupon barrier {}",
                    self.autocall_barrier, self.coupon_barrier
                ),
            ));
        }
        positive("notional", self.notional)?;
        if !self.coupon_amount.is_finite() || self.coupon_amount < 0.0 {
            return Err(PricingError::invalid_parameter(
                "coupon_amount",
                format!("must be finite and non-negative, got {}", self.coupon_amount),
            ));
        }
        if !self.reference_level.is_finite() || self.reference_level < 0.0 {
            return Err(PricingError::invalid_parameter(
                "reference_level",
                format!("must be finite and positive, got {}", self.reference_level),
            ));
        }
        if self.reference_level < REFERENCE_LEVEL_FLOOR {
            return Err(PricingError::degeneracy(format!(
                "reference level {} too close to zero for capital protection ratio",
                self.reference_level
            )));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), PricingError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PricingError::invalid_parameter(
            name,
            format!("must be positive and finite, got {}", value),
        ));
    }
    Ok(())
}

impl Default for NoteTerms {
    /// Two-year note on a 16.25 reference with five observations, autocall at
    /// 100% and coupon/protection at 70% of the reference, 2.5% coupon.
    fn default() -> Self {
        Self {
            maturity: 731.0 / 365.25,
            observation_count: 5,
            autocall_barrier: 16.25,
            coupon_barrier: 11.375,
            notional: 16.25,
            reference_level: 16.25,
            coupon_amount: 0.025 * 16.25,
            autocall_redemption: AutocallRedemption::Par,
        }
    }
}

/// Builder for [`NoteTerms`].
///
/// All fields except `autocall_redemption` are required; validation runs at
/// [`build`](NoteTermsBuilder::build) time.
#[derive(Clone, Debug, Default)]
pub struct NoteTermsBuilder {
    maturity: Option<f64>,
    observation_count: Option<usize>,
    autocall_barrier: Option<f64>,
    coupon_barrier: Option<f64>,
    notional: Option<f64>,
    reference_level: Option<f64>,
    coupon_amount: Option<f64>,
    autocall_redemption: AutocallRedemption,
}

impl NoteTermsBuilder {
    /// Sets the maturity in years.
    #[inline]
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the number of observation dates.
    #[inline]
    pub fn observation_count(mut self, count: usize) -> Self {
        self.observation_count = Some(count);
        self
    }

    /// Sets the autocall barrier level.
    #[inline]
    pub fn autocall_barrier(mut self, level: f64) -> Self {
        self.autocall_barrier = Some(level);
        self
    }

    /// Sets the coupon (and capital protection) barrier level.
    #[inline]
    pub fn coupon_barrier(mut self, level: f64) -> Self {
        self.coupon_barrier = Some(level);
        self
    }

    /// Sets the notional.
    #[inline]
    pub fn notional(mut self, notional: f64) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the reference level used by the capital protection ratio.
    #[inline]
    pub fn reference_level(mut self, level: f64) -> Self {
        self.reference_level = Some(level);
        self
    }

    /// Sets the coupon paid per qualifying observation.
    #[inline]
    pub fn coupon_amount(mut self, amount: f64) -> Self {
        self.coupon_amount = Some(amount);
        self
    }

    /// Sets the cash rule applied on an autocall event.
    #[inline]
    pub fn autocall_redemption(mut self, rule: AutocallRedemption) -> Self {
        self.autocall_redemption = rule;
        self
    }

    /// Builds and validates the terms.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` for a missing field, or any
    /// error from [`NoteTerms::validate`].
    pub fn build(self) -> Result<NoteTerms, PricingError> {
        let terms = NoteTerms {
            maturity: required("maturity", self.maturity)?,
            observation_count: required("observation_count", self.observation_count)?,
            autocall_barrier: required("autocall_barrier", self.autocall_barrier)?,
            coupon_barrier: required("coupon_barrier", self.coupon_barrier)?,
            notional: required("notional", self.notional)?,
            reference_level: required("reference_level", self.reference_level)?,
            coupon_amount: required("coupon_amount", self.coupon_amount)?,
            autocall_redemption: self.autocall_redemption,
        };
        terms.validate()?;
        Ok(terms)
    }
}

fn required<T>(name: &'static str, value: Option<T>) -> Result<T, PricingError> {
    value.ok_or_else(|| PricingError::invalid_parameter(name, "must be specified"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> NoteTermsBuilder {
        NoteTerms::builder()
            .maturity(2.0)
            .observation_count(5)
            .autocall_barrier(16.25)
            .coupon_barrier(11.375)
            .notional(16.25)
            .reference_level(16.25)
            .coupon_amount(0.40625)
    }

    #[test]
    fn test_builder_valid() {
        let terms = builder().build().unwrap();
        assert_eq!(terms.observation_count, 5);
        assert_eq!(terms.autocall_redemption, AutocallRedemption::Par);
        assert!((terms.observation_step() - 0.4).abs() < 1e-15);
    }

    #[test]
    fn test_default_matches_reference_note() {
        let terms = NoteTerms::default();
        assert!(terms.validate().is_ok());
        assert!((terms.maturity - 2.001_368_925_393_566).abs() < 1e-12);
        assert_eq!(terms.coupon_amount, 0.40625);
    }

    #[test]
    fn test_missing_field() {
        let result = NoteTerms::builder().maturity(1.0).build();
        assert!(matches!(
            result,
            Err(PricingError::InvalidParameter {
                name: "observation_count",
                ..
            })
        ));
    }

    #[test]
    fn test_barrier_ordering_violation() {
        let result = builder().autocall_barrier(10.0).build();
        assert!(matches!(
            result,
            Err(PricingError::InvalidParameter {
                name: "autocall_barrier",
                ..
            })
        ));
    }

    #[test]
    fn test_equal_barriers_accepted() {
        assert!(builder().coupon_barrier(16.25).build().is_ok());
    }

    #[test]
    fn test_non_positive_maturity() {
        for maturity in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                builder().maturity(maturity).build(),
                Err(PricingError::InvalidParameter {
                    name: "maturity",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_zero_observations() {
        assert!(matches!(
            builder().observation_count(0).build(),
            Err(PricingError::InvalidParameter {
                name: "observation_count",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_reference_level_is_degenerate() {
        assert!(matches!(
            builder().reference_level(0.0).build(),
            Err(PricingError::NumericalDegeneracy(_))
        ));
    }

    #[test]
    fn test_redemption_from_str() {
        assert_eq!(
            "par".parse::<AutocallRedemption>().unwrap(),
            AutocallRedemption::Par
        );
        assert_eq!(
            "Terminal-Level".parse::<AutocallRedemption>().unwrap(),
            AutocallRedemption::TerminalLevel
        );
        assert!("maturity".parse::<AutocallRedemption>().is_err());
        assert_eq!(AutocallRedemption::TerminalLevel.to_string(), "terminal-level");
    }
}
