//! Closed-form value of a note with one observation date.
//!
//! With m = 1 the only observation is maturity. The payoff at T is
//!
//! ```text
//! (I0 + Q) · 1{S_T ≥ CB}  +  (I0 / VIS) · S_T · 1{S_T < CB}
//! ```
//!
//! whether or not the autocall barrier is reached, since `AB ≥ CB`. Under GBM
//! this prices as
//!
//! ```text
//! V = e^{-rT} (I0 + Q) N(d2) + (I0 / VIS) S0 e^{-qT} N(-d1)
//! d1 = (ln(S0 / CB) + (r - q + σ²/2) T) / (σ √T),   d2 = d1 - σ √T
//! ```

use pricer_core::math::distributions::norm_cdf;
use pricer_core::types::{MarketParams, NoteTerms};
use pricer_core::PricingError;

/// Components of the single-observation value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SingleObservationBreakdown {
    /// Present value of the cash digital paying `notional + coupon`.
    pub digital: f64,
    /// Present value of the capital-at-risk leg below the coupon barrier.
    pub asset_put: f64,
}

impl SingleObservationBreakdown {
    /// Total value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.digital + self.asset_put
    }
}

/// Value of a single-observation note, split into its two legs.
///
/// A zero volatility or a zero spot is priced on the deterministic terminal
/// level.
///
/// # Errors
///
/// - `InvalidParameter` if `observation_count != 1` or inputs fail validation
/// - `NumericalDegeneracy` if the reference level is zero
pub fn single_observation_breakdown(
    market: &MarketParams,
    terms: &NoteTerms,
) -> Result<SingleObservationBreakdown, PricingError> {
    market.validate()?;
    terms.validate()?;
    if terms.observation_count != 1 {
        return Err(PricingError::invalid_parameter(
            "observation_count",
            format!(
                "closed form requires a single observation, got {}",
                terms.observation_count
            ),
        ));
    }

    let t = terms.maturity;
    let s0 = market.spot;
    let cb = terms.coupon_barrier;
    let cash = terms.notional + terms.coupon_amount;
    let participation = terms.notional / terms.reference_level;
    let discount = (-market.rate * t).exp();
    let carry_discount = (-market.dividend_yield * t).exp();
    let vol_sqrt_t = market.volatility * t.sqrt();

    if s0 == 0.0 || vol_sqrt_t == 0.0 {
        let terminal = s0 * (market.carry() * t).exp();
        return Ok(if terminal >= cb {
            SingleObservationBreakdown {
                digital: discount * cash,
                asset_put: 0.0,
            }
        } else {
            SingleObservationBreakdown {
                digital: 0.0,
                asset_put: discount * participation * terminal,
            }
        });
    }

    let d1 = ((s0 / cb).ln() + (market.carry() + 0.5 * market.volatility * market.volatility) * t)
        / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    Ok(SingleObservationBreakdown {
        digital: discount * cash * norm_cdf(d2),
        asset_put: participation * s0 * carry_discount * norm_cdf(-d1),
    })
}

/// Closed-form value of a single-observation note.
///
/// # Errors
///
/// See [`single_observation_breakdown`].
pub fn single_observation_value(
    market: &MarketParams,
    terms: &NoteTerms,
) -> Result<f64, PricingError> {
    single_observation_breakdown(market, terms).map(|b| b.value())
}
