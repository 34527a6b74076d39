//! Central finite differences with common random numbers.

use crate::bumps::BumpedParameter;
use pricer_core::math::differentiation::central_difference;
use pricer_core::PricingError;
use pricer_pricing::mc::{price, ValuationInputs};
use tracing::debug;

/// `(V(x + ε) − V(x − ε)) / (2ε)` for the input named by `parameter`.
///
/// Both legs keep `inputs.simulation`, so they are priced on streams built
/// from the same seed and consume identical normals; the difference carries
/// no sampling noise from independent draws. Prices are not rounded before
/// differencing.
///
/// # Errors
///
/// - `InvalidParameter` (or `NumericalDegeneracy`) if the base inputs are invalid
/// - `ConfigurationMismatch` if `bump` is not positive and finite, or if
///   either leg leaves the parameter's domain
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{MarketParams, NoteTerms};
/// use pricer_pricing::mc::{MonteCarloConfig, ValuationInputs};
/// use pricer_risk::bumps::BumpedParameter;
/// use pricer_risk::sensitivity::bump_sensitivity;
///
/// let inputs = ValuationInputs::new(
///     MarketParams::default(),
///     NoteTerms::default(),
///     MonteCarloConfig::builder().n_paths(2_000).build().unwrap(),
/// );
///
/// let rho = bump_sensitivity(&inputs, BumpedParameter::Rate, 0.05).unwrap();
/// assert!(rho.is_finite());
/// ```
pub fn bump_sensitivity(
    inputs: &ValuationInputs,
    parameter: BumpedParameter,
    bump: f64,
) -> Result<f64, PricingError> {
    inputs.validate()?;
    if !bump.is_finite() || bump <= 0.0 {
        return Err(PricingError::mismatch(
            parameter.name(),
            bump,
            "bump size must be positive and finite",
        ));
    }

    let up_inputs = parameter.apply(inputs, bump)?;
    let down_inputs = parameter.apply(inputs, -bump)?;

    let (up, down) = rayon::join(|| price(&up_inputs), || price(&down_inputs));
    let (up, down) = (up?.price, down?.price);
    let sensitivity = central_difference(up, down, bump)?;

    debug!(
        parameter = parameter.name(),
        bump,
        spot = inputs.market.spot,
        up,
        down,
        sensitivity,
        "bump pair priced"
    );

    Ok(sensitivity)
}
