//! Price and sensitivity curves over a spot grid.
//!
//! Every grid point is an independent valuation on its own stream built
//! from the configured seed, so points may be evaluated in any order or in
//! parallel with identical results.

use super::bump::bump_sensitivity;
use super::grid::SpotGrid;
use crate::bumps::{BumpConfig, BumpedParameter};
use crate::parallel::{try_map, ParallelConfig};
use pricer_core::math::differentiation::gradient;
use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
use pricer_core::PricingError;
use pricer_pricing::mc::{price, ValuationInputs};
use tracing::info;

/// Values sampled on a spot grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivityCurve {
    /// What the values measure (`price`, `delta`, `vega`, ...).
    pub label: String,
    /// Spot levels.
    pub spots: Vec<f64>,
    /// One value per spot level.
    pub values: Vec<f64>,
}

impl SensitivityCurve {
    /// Creates a curve.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidParameter` if `spots` and `values` differ in
    /// length.
    pub fn new(
        label: impl Into<String>,
        spots: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<Self, PricingError> {
        if spots.len() != values.len() {
            return Err(PricingError::invalid_parameter(
                "grid",
                format!(
                    "curve needs one value per spot: got {} spots and {} values",
                    spots.len(),
                    values.len()
                ),
            ));
        }
        Ok(Self {
            label: label.into(),
            spots,
            values,
        })
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Whether the curve has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// `(spot, value)` pairs in grid order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.spots.iter().copied().zip(self.values.iter().copied())
    }

    /// Linearly interpolated value at `spot`.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidParameter` if `spot` lies outside the grid.
    pub fn value_at(&self, spot: f64) -> Result<f64, PricingError> {
        let interp = LinearInterpolator::new(&self.spots, &self.values)?;
        Ok(interp.interpolate(spot)?)
    }
}

/// Fair value at every level of `grid`.
///
/// # Errors
///
/// Propagates the first valuation failure.
pub fn price_curve(
    inputs: &ValuationInputs,
    grid: &SpotGrid,
    parallel: &ParallelConfig,
) -> Result<SensitivityCurve, PricingError> {
    inputs.validate()?;
    info!(
        points = grid.len(),
        start = grid.start(),
        end = grid.end(),
        n_paths = inputs.simulation.n_paths(),
        "pricing spot grid"
    );

    let prices = try_map(parallel, grid.points(), |&spot| {
        price(&inputs.with_spot(spot)).map(|r| r.price)
    })?;
    SensitivityCurve::new("price", grid.points().to_vec(), prices)
}

/// Price, Delta and Gamma sampled on one spot grid.
///
/// Delta is the numerical gradient of the price curve and Gamma the
/// gradient of Delta.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeltaGammaCurve {
    /// Spot levels.
    pub spots: Vec<f64>,
    /// Fair values.
    pub prices: Vec<f64>,
    /// ∂V/∂S.
    pub delta: Vec<f64>,
    /// ∂²V/∂S².
    pub gamma: Vec<f64>,
}

impl DeltaGammaCurve {
    /// Delta interpolated at `spot`.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidParameter` if `spot` lies outside the grid.
    pub fn delta_at(&self, spot: f64) -> Result<f64, PricingError> {
        Ok(LinearInterpolator::new(&self.spots, &self.delta)?.interpolate(spot)?)
    }

    /// Gamma interpolated at `spot`.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidParameter` if `spot` lies outside the grid.
    pub fn gamma_at(&self, spot: f64) -> Result<f64, PricingError> {
        Ok(LinearInterpolator::new(&self.spots, &self.gamma)?.interpolate(spot)?)
    }

    /// Price curve.
    pub fn price_curve(&self) -> SensitivityCurve {
        self.curve("price", &self.prices)
    }

    /// Delta curve.
    pub fn delta_curve(&self) -> SensitivityCurve {
        self.curve("delta", &self.delta)
    }

    /// Gamma curve.
    pub fn gamma_curve(&self) -> SensitivityCurve {
        self.curve("gamma", &self.gamma)
    }

    fn curve(&self, label: &str, values: &[f64]) -> SensitivityCurve {
        SensitivityCurve {
            label: label.to_string(),
            spots: self.spots.clone(),
            values: values.to_vec(),
        }
    }
}

/// Prices `grid` and differentiates the curve twice.
///
/// # Errors
///
/// Propagates valuation failures; a grid that is not strictly increasing
/// cannot be built, so the gradient itself does not fail here.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{MarketParams, NoteTerms};
/// use pricer_pricing::mc::{MonteCarloConfig, ValuationInputs};
/// use pricer_risk::parallel::ParallelConfig;
/// use pricer_risk::sensitivity::{delta_gamma_curve, SpotGrid};
///
/// let inputs = ValuationInputs::new(
///     MarketParams::default(),
///     NoteTerms::default(),
///     MonteCarloConfig::builder().n_paths(500).build().unwrap(),
/// );
/// let grid = SpotGrid::linspace(8.0, 24.0, 9).unwrap();
///
/// let curve = delta_gamma_curve(&inputs, &grid, &ParallelConfig::default()).unwrap();
/// assert_eq!(curve.delta.len(), 9);
/// assert!(curve.delta_at(16.25).unwrap().is_finite());
/// ```
pub fn delta_gamma_curve(
    inputs: &ValuationInputs,
    grid: &SpotGrid,
    parallel: &ParallelConfig,
) -> Result<DeltaGammaCurve, PricingError> {
    let prices = price_curve(inputs, grid, parallel)?;
    let delta = gradient(&prices.values, grid.points())?;
    let gamma = gradient(&delta, grid.points())?;

    Ok(DeltaGammaCurve {
        spots: prices.spots,
        prices: prices.values,
        delta,
        gamma,
    })
}

/// Bump-pair sensitivity to `parameter` at every level of `grid`.
///
/// # Errors
///
/// `ConfigurationMismatch` if a bumped leg leaves its domain, otherwise the
/// first valuation failure.
pub fn greek_profile(
    inputs: &ValuationInputs,
    parameter: BumpedParameter,
    bumps: &BumpConfig,
    grid: &SpotGrid,
    parallel: &ParallelConfig,
) -> Result<SensitivityCurve, PricingError> {
    bumps.validate()?;
    let bump = bumps.bump_for(parameter);
    info!(
        parameter = parameter.name(),
        bump,
        points = grid.len(),
        "sweeping sensitivity profile"
    );

    let values = try_map(parallel, grid.points(), |&spot| {
        bump_sensitivity(&inputs.with_spot(spot), parameter, bump)
    })?;
    SensitivityCurve::new(parameter.name(), grid.points().to_vec(), values)
}

/// Coupon-barrier and autocall-barrier sensitivity curves.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierCurves {
    /// ∂V/∂(coupon barrier) across spot.
    pub coupon_barrier: SensitivityCurve,
    /// ∂V/∂(autocall barrier) across spot.
    pub autocall_barrier: SensitivityCurve,
}

/// Sweeps both barrier sensitivities over `grid`.
///
/// # Errors
///
/// As [`greek_profile`].
pub fn barrier_curves(
    inputs: &ValuationInputs,
    bumps: &BumpConfig,
    grid: &SpotGrid,
    parallel: &ParallelConfig,
) -> Result<BarrierCurves, PricingError> {
    Ok(BarrierCurves {
        coupon_barrier: greek_profile(
            inputs,
            BumpedParameter::CouponBarrier,
            bumps,
            grid,
            parallel,
        )?,
        autocall_barrier: greek_profile(
            inputs,
            BumpedParameter::AutocallBarrier,
            bumps,
            grid,
            parallel,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::{AutocallRedemption, MarketParams, NoteTerms};
    use pricer_pricing::mc::MonteCarloConfig;

    fn inputs(n_paths: usize) -> ValuationInputs {
        ValuationInputs::new(
            MarketParams::default(),
            NoteTerms::default(),
            MonteCarloConfig::builder()
                .n_paths(n_paths)
                .seed(42)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_price_curve_points_match_single_valuations() {
        let i = inputs(1_000);
        let grid = SpotGrid::linspace(10.0, 20.0, 5).unwrap();
        let curve = price_curve(&i, &grid, &ParallelConfig::default()).unwrap();

        assert_eq!(curve.label, "price");
        for (spot, value) in curve.points() {
            assert_eq!(value, price(&i.with_spot(spot)).unwrap().price);
        }
    }

    #[test]
    fn test_parallel_equals_sequential() {
        let i = inputs(1_000);
        let grid = SpotGrid::linspace(0.0, 32.5, 12).unwrap();
        let par = delta_gamma_curve(&i, &grid, &ParallelConfig::new(true, 1)).unwrap();
        let seq = delta_gamma_curve(&i, &grid, &ParallelConfig::sequential()).unwrap();
        assert_eq!(par, seq);
    }

    #[test]
    fn test_zero_spot_point_is_priced() {
        // S = 0 is absorbing: every trajectory redeems nothing and pays nothing
        let i = inputs(200);
        let grid = SpotGrid::linspace(0.0, 1.0, 2).unwrap();
        let curve = price_curve(&i, &grid, &ParallelConfig::sequential()).unwrap();
        assert_eq!(curve.values[0], 0.0);
    }

    #[test]
    fn test_delta_positive_below_autocall_barrier() {
        let i = inputs(4_000);
        let grid = SpotGrid::linspace(6.0, 14.0, 9).unwrap();
        let curve = delta_gamma_curve(&i, &grid, &ParallelConfig::default()).unwrap();
        for (spot, d) in grid.points().iter().zip(&curve.delta) {
            assert!(*d > 0.0, "delta {} at spot {}", d, spot);
        }
    }

    #[test]
    fn test_delta_non_negative_at_the_money() {
        let base = inputs(10_000);
        let spot = base.market.spot;
        let grid = SpotGrid::delta_default(spot).unwrap();
        for redemption in [AutocallRedemption::Par, AutocallRedemption::TerminalLevel] {
            let i = base.with_terms(NoteTerms {
                autocall_redemption: redemption,
                ..base.terms
            });
            let curve = delta_gamma_curve(&i, &grid, &ParallelConfig::default()).unwrap();
            let delta = curve.delta_at(spot).unwrap();
            assert!(delta >= 0.0, "{} delta {} at spot {}", redemption, delta, spot);
        }
    }

    #[test]
    fn test_delta_is_gradient_of_prices() {
        let i = inputs(500);
        let grid = SpotGrid::from_points(vec![10.0, 12.0, 15.0, 16.0, 20.0]).unwrap();
        let curve = delta_gamma_curve(&i, &grid, &ParallelConfig::sequential()).unwrap();
        let p = &curve.prices;
        // interior, non-uniform: hs = 3, hd = 1
        let expected = (9.0 * p[3] + (1.0 - 9.0) * p[2] - 1.0 * p[1]) / (3.0 * 1.0 * 4.0);
        assert_relative_eq!(curve.delta[2], expected, epsilon = 1e-12);
        assert_relative_eq!(curve.delta[0], (p[1] - p[0]) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_value_at_interpolates_and_rejects_outside() {
        let curve =
            SensitivityCurve::new("delta", vec![0.0, 10.0, 20.0], vec![0.0, 1.0, 0.5]).unwrap();
        assert_relative_eq!(curve.value_at(15.0).unwrap(), 0.75);
        assert!(matches!(
            curve.value_at(25.0),
            Err(PricingError::InvalidParameter { name: "spot", .. })
        ));
        assert!(SensitivityCurve::new("x", vec![0.0], vec![]).is_err());
    }

    #[test]
    fn test_barrier_curves_finite() {
        let i = inputs(500);
        let grid = SpotGrid::linspace(8.0, 24.0, 5).unwrap();
        let curves = barrier_curves(&i, &BumpConfig::default(), &grid, &ParallelConfig::default())
            .unwrap();
        assert_eq!(curves.coupon_barrier.label, "coupon_barrier");
        assert_eq!(curves.autocall_barrier.len(), 5);
        assert!(curves
            .coupon_barrier
            .values
            .iter()
            .chain(&curves.autocall_barrier.values)
            .all(|v| v.is_finite()));
    }

    #[test]
    fn test_profile_propagates_mismatch() {
        let i = inputs(100);
        let bumps = BumpConfig::builder().volatility(0.5).build().unwrap();
        let grid = SpotGrid::linspace(8.0, 24.0, 3).unwrap();
        assert!(matches!(
            greek_profile(
                &i,
                BumpedParameter::Volatility,
                &bumps,
                &grid,
                &ParallelConfig::default()
            ),
            Err(PricingError::ConfigurationMismatch { .. })
        ));
    }
}
