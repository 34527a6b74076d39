//! Market parameters of the lognormal (GBM) model.

use super::error::PricingError;

/// Market inputs for one valuation.
///
/// Rates are continuously compounded and annualised; either may be negative.
/// Values are immutable per valuation call: a perturbed valuation works on a
/// new copy built with struct update syntax.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketParams;
///
/// let market = MarketParams::new(16.25, 0.04, 0.02, 0.2);
/// let bumped = MarketParams { volatility: market.volatility + 0.05, ..market };
///
/// assert!(bumped.validate().is_ok());
/// assert_eq!(market.volatility, 0.2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketParams {
    /// Initial asset level (S₀).
    pub spot: f64,
    /// Risk-free rate (r), annualised.
    pub rate: f64,
    /// Continuous dividend yield (q), annualised.
    pub dividend_yield: f64,
    /// Lognormal volatility (σ), annualised.
    pub volatility: f64,
}

impl MarketParams {
    /// Creates new market parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, dividend_yield: f64, volatility: f64) -> Self {
        Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        }
    }

    /// Risk-neutral drift `r - q`.
    #[inline]
    pub fn carry(&self) -> f64 {
        self.rate - self.dividend_yield
    }

    /// Validates the parameters.
    ///
    /// A zero spot is the absorbing state of GBM and a zero volatility gives a
    /// deterministic forward path; both are accepted.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` if:
    /// - `spot` is negative or not finite
    /// - `rate` or `dividend_yield` is not finite
    /// - `volatility` is negative or not finite
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.spot.is_finite() || self.spot < 0.0 {
            return Err(PricingError::invalid_parameter(
                "spot",
                format!("must be finite and non-negative, got {}", self.spot),
            ));
        }
        if !self.rate.is_finite() {
            return Err(PricingError::invalid_parameter(
                "rate",
                format!("must be finite, got {}", self.rate),
            ));
        }
        if !self.dividend_yield.is_finite() {
            return Err(PricingError::invalid_parameter(
                "dividend_yield",
                format!("must be finite, got {}", self.dividend_yield),
            ));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(PricingError::invalid_parameter(
                "volatility",
                format!("must be finite and non-negative, got {}", self.volatility),
            ));
        }
        Ok(())
    }
}

impl Default for MarketParams {
    fn default() -> Self {
        Self {
            spot: 16.25,
            rate: 0.04,
            dividend_yield: 0.02,
            volatility: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MarketParams::default().validate().is_ok());
    }

    #[test]
    fn test_zero_spot_and_zero_vol_accepted() {
        assert!(MarketParams::new(0.0, 0.04, 0.02, 0.2).validate().is_ok());
        assert!(MarketParams::new(16.25, 0.04, 0.02, 0.0).validate().is_ok());
    }

    #[test]
    fn test_negative_rates_accepted() {
        assert!(MarketParams::new(100.0, -0.005, -0.01, 0.2)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_invalid_inputs() {
        let cases = [
            (MarketParams::new(-1.0, 0.04, 0.02, 0.2), "spot"),
            (MarketParams::new(f64::NAN, 0.04, 0.02, 0.2), "spot"),
            (MarketParams::new(10.0, f64::INFINITY, 0.02, 0.2), "rate"),
            (MarketParams::new(10.0, 0.04, f64::NAN, 0.2), "dividend_yield"),
            (MarketParams::new(10.0, 0.04, 0.02, -0.1), "volatility"),
        ];

        for (params, expected) in cases {
            match params.validate() {
                Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected InvalidParameter({}), got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_carry() {
        let market = MarketParams::new(100.0, 0.05, 0.02, 0.2);
        assert!((market.carry() - 0.03).abs() < 1e-15);
    }
}
