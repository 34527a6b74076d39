//! Monte Carlo valuation engine.
//!
//! # Overview
//!
//! [`price`] runs the full pipeline for one set of [`ValuationInputs`]:
//! 1. Build a fresh [`RandomStream`] from the configured seed
//! 2. Generate GBM paths (via [`generate_gbm_paths`])
//! 3. Evaluate each trajectory (via [`evaluate_paths`])
//! 4. Discount with `exp(-r·T)` and aggregate
//!
//! Because every call owns its stream, two calls with the same seed consume
//! the same draws; this is the contract bump-and-revalue relies on.

use super::inputs::ValuationInputs;
use super::paths::{generate_gbm_paths, GbmParams};
use crate::path_dependent::{evaluate_paths, TrajectoryOutcome};
use crate::rng::RandomStream;
use pricer_core::PricingError;
use tracing::debug;

/// Result of one valuation.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingResult;
///
/// let result = PricingResult {
///     price: 15.2071,
///     std_error: 0.03,
///     autocall_probability: 0.55,
///     expected_coupons: 1.9,
///     n_paths: 10_000,
/// };
///
/// assert_eq!(result.rounded_price(), 15.21);
/// assert!((result.confidence_95() - 1.96 * 0.03).abs() < 1e-12);
/// assert!((result.confidence_99() - 2.576 * 0.03).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Present value: mean of discounted per-trajectory totals.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Fraction of trajectories called early.
    pub autocall_probability: f64,
    /// Mean number of coupons paid per trajectory.
    pub expected_coupons: f64,
    /// Number of trajectories.
    pub n_paths: usize,
}

impl PricingResult {
    /// Price rounded to 2 decimal places, half away from zero.
    #[inline]
    pub fn rounded_price(&self) -> f64 {
        (self.price * 100.0).round() / 100.0
    }

    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Prices the note with a stream built from `inputs.simulation`.
///
/// # Errors
///
/// Returns `PricingError` if any input fails validation.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{MarketParams, NoteTerms};
/// use pricer_pricing::mc::{price, MonteCarloConfig, ValuationInputs};
///
/// let inputs = ValuationInputs::new(
///     MarketParams::default(),
///     NoteTerms::default(),
///     MonteCarloConfig::builder().n_paths(2_000).seed(42).build().unwrap(),
/// );
///
/// let first = price(&inputs).unwrap();
/// let second = price(&inputs).unwrap();
/// assert_eq!(first.price.to_bits(), second.price.to_bits());
/// ```
pub fn price(inputs: &ValuationInputs) -> Result<PricingResult, PricingError> {
    inputs.validate()?;
    let mut rng = RandomStream::new(inputs.simulation.rng(), inputs.simulation.seed())?;
    price_with_stream(inputs, &mut rng)
}

/// Prices the note drawing normals from an explicit stream.
///
/// The stream's own seed is used; `inputs.simulation` only supplies the
/// trajectory count.
///
/// # Errors
///
/// Returns `PricingError` if any input fails validation.
pub fn price_with_stream(
    inputs: &ValuationInputs,
    rng: &mut RandomStream,
) -> Result<PricingResult, PricingError> {
    inputs.validate()?;

    let terms = &inputs.terms;
    let n_paths = inputs.simulation.n_paths();
    let gbm = GbmParams::from_market(&inputs.market, terms);

    let paths = generate_gbm_paths(&gbm, terms.observation_count, n_paths, rng)?;
    let outcomes = evaluate_paths(&paths, terms);
    let result = aggregate(&outcomes, inputs.discount_factor())?;

    debug!(
        spot = inputs.market.spot,
        volatility = inputs.market.volatility,
        rate = inputs.market.rate,
        maturity = terms.maturity,
        n_paths,
        price = result.price,
        std_error = result.std_error,
        "valuation complete"
    );

    Ok(result)
}

/// Aggregates trajectory outcomes into a discounted estimate.
///
/// # Errors
///
/// Returns `PricingError::InvalidParameter` for an empty slice and
/// `PricingError::NumericalDegeneracy` if the estimate is not finite.
pub fn aggregate(
    outcomes: &[TrajectoryOutcome],
    discount_factor: f64,
) -> Result<PricingResult, PricingError> {
    let n = outcomes.len();
    if n == 0 {
        return Err(PricingError::invalid_parameter(
            "n_paths",
            "no trajectories to aggregate",
        ));
    }

    let discounted: Vec<f64> = outcomes
        .iter()
        .map(|o| o.total() * discount_factor)
        .collect();
    let mean = discounted.iter().sum::<f64>() / n as f64;
    if !mean.is_finite() {
        return Err(PricingError::degeneracy(format!(
            "valuation produced a non-finite price ({})",
            mean
        )));
    }

    // Identical totals: the mean can differ from each by an ulp
    let dispersed = discounted.iter().any(|&v| v != discounted[0]);
    let std_error = if dispersed {
        let variance =
            discounted.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt() / (n as f64).sqrt()
    } else {
        0.0
    };

    let called = outcomes.iter().filter(|o| o.is_autocalled()).count();
    let coupons: usize = outcomes.iter().map(|o| o.coupon_count).sum();

    Ok(PricingResult {
        price: mean,
        std_error,
        autocall_probability: called as f64 / n as f64,
        expected_coupons: coupons as f64 / n as f64,
        n_paths: n,
    })
}
