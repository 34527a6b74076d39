//! Perturbable valuation inputs.

use pricer_core::types::{MarketParams, NoteTerms};
use pricer_core::PricingError;
use pricer_pricing::mc::ValuationInputs;
use std::fmt;
use std::str::FromStr;

/// Input moved by a finite-difference pair.
///
/// # Examples
///
/// ```rust
/// use pricer_core::PricingError;
/// use pricer_core::types::{MarketParams, NoteTerms};
/// use pricer_pricing::mc::{MonteCarloConfig, ValuationInputs};
/// use pricer_risk::bumps::BumpedParameter;
///
/// let base = ValuationInputs::new(
///     MarketParams::default(),
///     NoteTerms::default(),
///     MonteCarloConfig::builder().n_paths(100).build().unwrap(),
/// );
///
/// let up = BumpedParameter::Volatility.apply(&base, 0.05).unwrap();
/// assert!((up.market.volatility - 0.25).abs() < 1e-12);
///
/// // 0.2 - 0.5 leaves the volatility domain
/// assert!(matches!(
///     BumpedParameter::Volatility.apply(&base, -0.5),
///     Err(PricingError::ConfigurationMismatch { .. })
/// ));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BumpedParameter {
    /// σ, for Vega.
    Volatility,
    /// T, for Theta (sensitivity to a longer time to maturity).
    Maturity,
    /// r, for Rho.
    Rate,
    /// q, for Epsilon.
    DividendYield,
    /// Coupon (and capital protection) barrier.
    CouponBarrier,
    /// Autocall barrier.
    AutocallBarrier,
}

impl BumpedParameter {
    /// Every perturbable input.
    pub const ALL: [BumpedParameter; 6] = [
        BumpedParameter::Volatility,
        BumpedParameter::Maturity,
        BumpedParameter::Rate,
        BumpedParameter::DividendYield,
        BumpedParameter::CouponBarrier,
        BumpedParameter::AutocallBarrier,
    ];

    /// Field name of the perturbed input.
    pub fn name(&self) -> &'static str {
        match self {
            BumpedParameter::Volatility => "volatility",
            BumpedParameter::Maturity => "maturity",
            BumpedParameter::Rate => "rate",
            BumpedParameter::DividendYield => "dividend_yield",
            BumpedParameter::CouponBarrier => "coupon_barrier",
            BumpedParameter::AutocallBarrier => "autocall_barrier",
        }
    }

    /// Current value of the input in `inputs`.
    pub fn value(&self, inputs: &ValuationInputs) -> f64 {
        match self {
            BumpedParameter::Volatility => inputs.market.volatility,
            BumpedParameter::Maturity => inputs.terms.maturity,
            BumpedParameter::Rate => inputs.market.rate,
            BumpedParameter::DividendYield => inputs.market.dividend_yield,
            BumpedParameter::CouponBarrier => inputs.terms.coupon_barrier,
            BumpedParameter::AutocallBarrier => inputs.terms.autocall_barrier,
        }
    }

    /// Copy of `inputs` with this input shifted by `shift`.
    ///
    /// The simulation settings are carried over untouched, so the shifted
    /// valuation draws the same normals as the base one.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::ConfigurationMismatch` if the shifted inputs
    /// fail validation: a negative volatility, a non-positive maturity or
    /// barrier, or a coupon barrier above the autocall barrier.
    pub fn apply(&self, inputs: &ValuationInputs, shift: f64) -> Result<ValuationInputs, PricingError> {
        let market = inputs.market;
        let terms = inputs.terms;
        let value = self.value(inputs) + shift;

        let bumped = match self {
            BumpedParameter::Volatility => inputs.with_market(MarketParams {
                volatility: value,
                ..market
            }),
            BumpedParameter::Rate => inputs.with_market(MarketParams {
                rate: value,
                ..market
            }),
            BumpedParameter::DividendYield => inputs.with_market(MarketParams {
                dividend_yield: value,
                ..market
            }),
            BumpedParameter::Maturity => inputs.with_terms(NoteTerms {
                maturity: value,
                ..terms
            }),
            BumpedParameter::CouponBarrier => inputs.with_terms(NoteTerms {
                coupon_barrier: value,
                ..terms
            }),
            BumpedParameter::AutocallBarrier => inputs.with_terms(NoteTerms {
                autocall_barrier: value,
                ..terms
            }),
        };

        bumped
            .validate()
            .map_err(|err| PricingError::mismatch(self.name(), shift, err.to_string()))?;
        Ok(bumped)
    }
}

impl fmt::Display for BumpedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BumpedParameter {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "volatility" | "vol" => Ok(BumpedParameter::Volatility),
            "maturity" => Ok(BumpedParameter::Maturity),
            "rate" => Ok(BumpedParameter::Rate),
            "dividend_yield" | "dividend" => Ok(BumpedParameter::DividendYield),
            "coupon_barrier" => Ok(BumpedParameter::CouponBarrier),
            "autocall_barrier" => Ok(BumpedParameter::AutocallBarrier),
            _ => Err(PricingError::invalid_parameter(
                "parameter",
                format!("unknown bumped parameter '{}'", s),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_pricing::mc::MonteCarloConfig;

    fn base() -> ValuationInputs {
        ValuationInputs::new(
            MarketParams::default(),
            NoteTerms::default(),
            MonteCarloConfig::builder().n_paths(10).build().unwrap(),
        )
    }

    #[test]
    fn test_apply_moves_only_one_input() {
        let b = base();
        for p in BumpedParameter::ALL {
            let up = p.apply(&b, 0.01).unwrap();
            assert_relative_eq!(p.value(&up), p.value(&b) + 0.01, epsilon = 1e-12);
            for other in BumpedParameter::ALL.into_iter().filter(|o| *o != p) {
                assert_eq!(other.value(&up), other.value(&b));
            }
            assert_eq!(up.market.spot, b.market.spot);
            assert_eq!(up.simulation, b.simulation);
        }
    }

    #[test]
    fn test_negative_volatility_is_mismatch() {
        let err = BumpedParameter::Volatility.apply(&base(), -0.25).unwrap_err();
        match err {
            PricingError::ConfigurationMismatch {
                parameter, bump, ..
            } => {
                assert_eq!(parameter, "volatility");
                assert_eq!(bump, -0.25);
            }
            other => panic!("Expected ConfigurationMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_maturity_down_to_zero_is_mismatch() {
        let b = base();
        let shift = -b.terms.maturity;
        assert!(matches!(
            BumpedParameter::Maturity.apply(&b, shift),
            Err(PricingError::ConfigurationMismatch {
                parameter: "maturity",
                ..
            })
        ));
    }

    #[test]
    fn test_barrier_crossing_is_mismatch() {
        let b = base().with_terms(NoteTerms {
            coupon_barrier: 16.245,
            ..NoteTerms::default()
        });
        assert!(matches!(
            BumpedParameter::CouponBarrier.apply(&b, 0.01),
            Err(PricingError::ConfigurationMismatch { .. })
        ));
        assert!(matches!(
            BumpedParameter::AutocallBarrier.apply(&b, -0.01),
            Err(PricingError::ConfigurationMismatch { .. })
        ));
        assert!(BumpedParameter::CouponBarrier.apply(&b, -0.01).is_ok());
    }

    #[test]
    fn test_rates_may_go_negative() {
        let b = base();
        let down = BumpedParameter::Rate.apply(&b, -0.05).unwrap();
        assert!(down.market.rate < 0.0);
        assert!(BumpedParameter::DividendYield.apply(&b, -0.10).is_ok());
    }

    #[test]
    fn test_from_str_round_trips_names() {
        for p in BumpedParameter::ALL {
            assert_eq!(p.name().parse::<BumpedParameter>().unwrap(), p);
        }
        assert_eq!(
            "coupon-barrier".parse::<BumpedParameter>().unwrap(),
            BumpedParameter::CouponBarrier
        );
        assert!("spot".parse::<BumpedParameter>().is_err());
    }
}
