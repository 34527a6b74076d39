//! Immutable inputs of one valuation.

use super::config::MonteCarloConfig;
use pricer_core::types::{MarketParams, NoteTerms};
use pricer_core::PricingError;

/// Everything a valuation reads: market, contract and simulation settings.
///
/// Values are passed by reference into every valuation and never mutated;
/// a perturbed valuation works on a new value built with the `with_*`
/// methods or struct update syntax.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{MarketParams, NoteTerms};
/// use pricer_pricing::mc::{MonteCarloConfig, ValuationInputs};
///
/// let base = ValuationInputs::new(
///     MarketParams::default(),
///     NoteTerms::default(),
///     MonteCarloConfig::builder().n_paths(1_000).build().unwrap(),
/// );
/// let bumped = base.with_market(MarketParams { volatility: 0.25, ..base.market });
///
/// assert_eq!(base.market.volatility, 0.2);
/// assert_eq!(bumped.market.volatility, 0.25);
/// assert_eq!(bumped.simulation, base.simulation);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValuationInputs {
    /// Market parameters.
    pub market: MarketParams,
    /// Contract terms.
    pub terms: NoteTerms,
    /// Trajectory count and seeded stream.
    pub simulation: MonteCarloConfig,
}

impl ValuationInputs {
    /// Creates new valuation inputs.
    #[inline]
    pub fn new(market: MarketParams, terms: NoteTerms, simulation: MonteCarloConfig) -> Self {
        Self {
            market,
            terms,
            simulation,
        }
    }

    /// Copy with different market parameters.
    #[inline]
    pub fn with_market(&self, market: MarketParams) -> Self {
        Self { market, ..*self }
    }

    /// Copy with different contract terms.
    #[inline]
    pub fn with_terms(&self, terms: NoteTerms) -> Self {
        Self { terms, ..*self }
    }

    /// Copy with a different spot.
    #[inline]
    pub fn with_spot(&self, spot: f64) -> Self {
        self.with_market(MarketParams { spot, ..self.market })
    }

    /// Discount factor to maturity, `exp(-r·T)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.market.rate * self.terms.maturity).exp()
    }

    /// Validates market, terms and simulation settings.
    ///
    /// # Errors
    ///
    /// Returns the first `PricingError` found.
    pub fn validate(&self) -> Result<(), PricingError> {
        self.market.validate()?;
        self.terms.validate()?;
        self.simulation.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs() -> ValuationInputs {
        ValuationInputs::new(
            MarketParams::default(),
            NoteTerms::default(),
            MonteCarloConfig::builder().n_paths(100).build().unwrap(),
        )
    }

    #[test]
    fn test_discount_factor() {
        let i = inputs();
        assert_relative_eq!(i.discount_factor(), (-0.04 * 731.0 / 365.25_f64).exp());
    }

    #[test]
    fn test_with_spot_leaves_original_untouched() {
        let base = inputs();
        let moved = base.with_spot(20.0);
        assert_eq!(base.market.spot, 16.25);
        assert_eq!(moved.market.spot, 20.0);
        assert_eq!(moved.terms, base.terms);
    }

    #[test]
    fn test_validate_reports_terms_errors() {
        let base = inputs();
        let broken = base.with_terms(NoteTerms {
            coupon_barrier: 20.0,
            ..base.terms
        });
        assert!(matches!(
            broken.validate(),
            Err(PricingError::InvalidParameter {
                name: "autocall_barrier",
                ..
            })
        ));
    }
}
