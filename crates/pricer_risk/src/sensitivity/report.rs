//! Named Greeks at the base spot.

use super::bump::bump_sensitivity;
use super::curve::{delta_gamma_curve, greek_profile, price_curve, SensitivityCurve};
use super::grid::SpotGrid;
use crate::bumps::{BumpConfig, BumpedParameter};
use crate::parallel::{try_map, ParallelConfig};
use pricer_core::PricingError;
use pricer_pricing::mc::{price, ValuationInputs};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// A reported sensitivity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Greek {
    /// ∂V/∂S from the price curve.
    Delta,
    /// ∂²V/∂S² from the Delta curve.
    Gamma,
    /// ∂V/∂σ.
    Vega,
    /// ∂V/∂T, positive when a longer life adds value.
    Theta,
    /// ∂V/∂r.
    Rho,
    /// ∂V/∂q.
    Epsilon,
    /// ∂V/∂(coupon barrier).
    CouponBarrier,
    /// ∂V/∂(autocall barrier).
    AutocallBarrier,
}

impl Greek {
    /// Every reported sensitivity, in report order.
    pub const ALL: [Greek; 8] = [
        Greek::Delta,
        Greek::Gamma,
        Greek::Vega,
        Greek::Theta,
        Greek::Rho,
        Greek::Epsilon,
        Greek::CouponBarrier,
        Greek::AutocallBarrier,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Greek::Delta => "delta",
            Greek::Gamma => "gamma",
            Greek::Vega => "vega",
            Greek::Theta => "theta",
            Greek::Rho => "rho",
            Greek::Epsilon => "epsilon",
            Greek::CouponBarrier => "coupon-barrier",
            Greek::AutocallBarrier => "autocall-barrier",
        }
    }

    fn from_parameter(parameter: BumpedParameter) -> Self {
        match parameter {
            BumpedParameter::Volatility => Greek::Vega,
            BumpedParameter::Maturity => Greek::Theta,
            BumpedParameter::Rate => Greek::Rho,
            BumpedParameter::DividendYield => Greek::Epsilon,
            BumpedParameter::CouponBarrier => Greek::CouponBarrier,
            BumpedParameter::AutocallBarrier => Greek::AutocallBarrier,
        }
    }
}

impl fmt::Display for Greek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Greek {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Greek::ALL
            .into_iter()
            .find(|g| g.name() == key)
            .ok_or_else(|| {
                PricingError::invalid_parameter("greek", format!("unknown greek '{}'", s))
            })
    }
}

/// Fair value and every Greek at the base spot.
///
/// # Examples
///
/// ```rust
/// use pricer_risk::sensitivity::{Greek, GreeksReport};
///
/// let report = GreeksReport { price: 15.3, vega: -7.0, ..Default::default() };
/// assert_eq!(report.get(Greek::Vega), -7.0);
/// assert_eq!(report.iter().count(), 8);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreeksReport {
    /// Unrounded fair value.
    pub price: f64,
    /// Standard error of the fair value.
    pub std_error: f64,
    /// ∂V/∂S.
    pub delta: f64,
    /// ∂²V/∂S².
    pub gamma: f64,
    /// ∂V/∂σ.
    pub vega: f64,
    /// ∂V/∂T.
    pub theta: f64,
    /// ∂V/∂r.
    pub rho: f64,
    /// ∂V/∂q.
    pub epsilon: f64,
    /// ∂V/∂(coupon barrier).
    pub coupon_barrier: f64,
    /// ∂V/∂(autocall barrier).
    pub autocall_barrier: f64,
}

impl GreeksReport {
    /// Value of one Greek.
    pub fn get(&self, greek: Greek) -> f64 {
        match greek {
            Greek::Delta => self.delta,
            Greek::Gamma => self.gamma,
            Greek::Vega => self.vega,
            Greek::Theta => self.theta,
            Greek::Rho => self.rho,
            Greek::Epsilon => self.epsilon,
            Greek::CouponBarrier => self.coupon_barrier,
            Greek::AutocallBarrier => self.autocall_barrier,
        }
    }

    /// `(greek, value)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Greek, f64)> + '_ {
        Greek::ALL.into_iter().map(move |g| (g, self.get(g)))
    }

    fn set(&mut self, greek: Greek, value: f64) {
        match greek {
            Greek::Delta => self.delta = value,
            Greek::Gamma => self.gamma = value,
            Greek::Vega => self.vega = value,
            Greek::Theta => self.theta = value,
            Greek::Rho => self.rho = value,
            Greek::Epsilon => self.epsilon = value,
            Greek::CouponBarrier => self.coupon_barrier = value,
            Greek::AutocallBarrier => self.autocall_barrier = value,
        }
    }
}

/// Prices the note and computes every Greek at the base spot.
///
/// Delta and Gamma come from the curve over `grid`, read at the base spot by
/// linear interpolation; the other six are bump pairs sized by `bumps`.
///
/// # Errors
///
/// - `InvalidParameter` if the base spot lies outside `grid`
/// - `ConfigurationMismatch` if a bump leaves its parameter's domain. A note
///   with equal barriers is valid but has no barrier Greeks: the coupon-barrier
///   up leg and the autocall-barrier down leg both cross the barriers over.
/// - otherwise the first valuation failure
pub fn compute_greeks(
    inputs: &ValuationInputs,
    bumps: &BumpConfig,
    grid: &SpotGrid,
    parallel: &ParallelConfig,
) -> Result<GreeksReport, PricingError> {
    inputs.validate()?;
    bumps.validate()?;
    let spot = inputs.market.spot;
    if !grid.contains(spot) {
        return Err(PricingError::invalid_parameter(
            "spot",
            format!(
                "base spot {} outside the Delta grid [{}, {}]",
                spot,
                grid.start(),
                grid.end()
            ),
        ));
    }

    let base = price(inputs)?;
    let curve = delta_gamma_curve(inputs, grid, parallel)?;

    let mut report = GreeksReport {
        price: base.price,
        std_error: base.std_error,
        delta: curve.delta_at(spot)?,
        gamma: curve.gamma_at(spot)?,
        ..Default::default()
    };

    let bumped = try_map(parallel, &BumpedParameter::ALL, |&p| {
        bump_sensitivity(inputs, p, bumps.bump_for(p)).map(|v| (Greek::from_parameter(p), v))
    })?;
    for (greek, value) in bumped {
        report.set(greek, value);
    }

    info!(
        spot,
        price = report.price,
        delta = report.delta,
        vega = report.vega,
        "greeks computed"
    );
    Ok(report)
}

/// Curve of `greek` across `grid`, or the price curve when `greek` is `None`.
///
/// # Errors
///
/// As [`delta_gamma_curve`] and [`greek_profile`].
pub fn greek_curve(
    inputs: &ValuationInputs,
    greek: Option<Greek>,
    bumps: &BumpConfig,
    grid: &SpotGrid,
    parallel: &ParallelConfig,
) -> Result<SensitivityCurve, PricingError> {
    let profile = |parameter| greek_profile(inputs, parameter, bumps, grid, parallel);
    match greek {
        None => price_curve(inputs, grid, parallel),
        Some(Greek::Delta) => Ok(delta_gamma_curve(inputs, grid, parallel)?.delta_curve()),
        Some(Greek::Gamma) => Ok(delta_gamma_curve(inputs, grid, parallel)?.gamma_curve()),
        Some(Greek::Vega) => profile(BumpedParameter::Volatility),
        Some(Greek::Theta) => profile(BumpedParameter::Maturity),
        Some(Greek::Rho) => profile(BumpedParameter::Rate),
        Some(Greek::Epsilon) => profile(BumpedParameter::DividendYield),
        Some(Greek::CouponBarrier) => profile(BumpedParameter::CouponBarrier),
        Some(Greek::AutocallBarrier) => profile(BumpedParameter::AutocallBarrier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::{MarketParams, NoteTerms};
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
    fn test_greek_names_round_trip() {
        for g in Greek::ALL {
            assert_eq!(g.name().parse::<Greek>().unwrap(), g);
        }
        assert_eq!("coupon_barrier".parse::<Greek>().unwrap(), Greek::CouponBarrier);
        assert!("vanna".parse::<Greek>().is_err());
    }

    #[test]
    fn test_compute_greeks_consistent_with_parts() {
        let i = inputs(1_000);
        let bumps = BumpConfig::default();
        let grid = SpotGrid::delta_default(i.market.spot).unwrap();
        let report = compute_greeks(&i, &bumps, &grid, &ParallelConfig::default()).unwrap();

        assert_eq!(report.price, price(&i).unwrap().price);
        assert_eq!(
            report.vega,
            bump_sensitivity(&i, BumpedParameter::Volatility, 0.05).unwrap()
        );
        let curve = delta_gamma_curve(&i, &grid, &ParallelConfig::sequential()).unwrap();
        assert_eq!(report.delta, curve.delta_at(i.market.spot).unwrap());
        assert!(report.iter().all(|(_, v)| v.is_finite()));
    }

    #[test]
    fn test_spot_outside_grid() {
        let i = inputs(100);
        let grid = SpotGrid::linspace(0.0, 10.0, 5).unwrap();
        assert!(matches!(
            compute_greeks(&i, &BumpConfig::default(), &grid, &ParallelConfig::default()),
            Err(PricingError::InvalidParameter { name: "spot", .. })
        ));
    }

    #[test]
    fn test_equal_barriers_fail_on_coupon_barrier_leg() {
        let base = inputs(100);
        let i = base.with_terms(NoteTerms {
            coupon_barrier: base.terms.autocall_barrier,
            ..base.terms
        });
        assert!(i.validate().is_ok());

        let grid = SpotGrid::delta_default(i.market.spot).unwrap();
        let bumps = BumpConfig::default();
        let result = compute_greeks(&i, &bumps, &grid, &ParallelConfig::sequential());
        assert!(matches!(
            result,
            Err(PricingError::ConfigurationMismatch {
                parameter: "coupon_barrier",
                ..
            })
        ));
        assert!(matches!(
            bump_sensitivity(&i, BumpedParameter::AutocallBarrier, 0.01),
            Err(PricingError::ConfigurationMismatch {
                parameter: "autocall_barrier",
                ..
            })
        ));
    }

    #[test]
    fn test_greek_curve_labels() {
        let i = inputs(200);
        let grid = SpotGrid::linspace(10.0, 20.0, 3).unwrap();
        let bumps = BumpConfig::default();
        let par = ParallelConfig::default();

        assert_eq!(greek_curve(&i, None, &bumps, &grid, &par).unwrap().label, "price");
        let labels: Vec<String> = Greek::ALL
            .into_iter()
            .map(|g| {
                let curve = greek_curve(&i, Some(g), &bumps, &grid, &par).unwrap();
                assert_eq!(curve.len(), 3);
                assert!(curve.values.iter().all(|v| v.is_finite()), "{}", g);
                curve.label
            })
            .collect();
        assert_eq!(
            labels,
            [
                "delta",
                "gamma",
                "volatility",
                "maturity",
                "rate",
                "dividend_yield",
                "coupon_barrier",
                "autocall_barrier"
            ]
        );
    }

    #[test]
    fn test_greek_curve_matches_its_bump_profile() {
        let i = inputs(200);
        let grid = SpotGrid::linspace(10.0, 20.0, 3).unwrap();
        let bumps = BumpConfig::default();
        let par = ParallelConfig::sequential();

        for p in BumpedParameter::ALL {
            let greek = Greek::from_parameter(p);
            let curve = greek_curve(&i, Some(greek), &bumps, &grid, &par).unwrap();
            assert_eq!(curve, greek_profile(&i, p, &bumps, &grid, &par).unwrap(), "{}", greek);
        }
    }
}
