//! Finite-difference operators.
//!
//! - [`central_difference`]: two-sided difference quotient of a bump pair
//! - [`gradient`]: numerical derivative of values sampled on a grid
//!
//! # Examples
//!
//! ```
//! use pricer_core::math::differentiation::gradient;
//!
//! let xs = [0.0_f64, 1.0, 2.0, 3.0];
//! let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
//!
//! let dy = gradient(&ys, &xs).unwrap();
//! assert_eq!(dy, vec![1.0, 2.0, 4.0, 5.0]);
//! ```

use crate::types::PricingError;

/// Central difference `(up - down) / (2·bump)`.
///
/// # Errors
///
/// Returns `PricingError::NumericalDegeneracy` if `bump` is zero, negative
/// or not finite.
#[inline]
pub fn central_difference(up: f64, down: f64, bump: f64) -> Result<f64, PricingError> {
    if !bump.is_finite() || bump <= 0.0 {
        return Err(PricingError::degeneracy(format!(
            "central difference requires a positive bump, got {}",
            bump
        )));
    }
    Ok((up - down) / (2.0 * bump))
}

/// Numerical gradient of `values` sampled at strictly increasing `coords`.
///
/// Interior points use the second-order accurate three-point formula for
/// non-uniform spacing; with `hs = x[i] - x[i-1]` and `hd = x[i+1] - x[i]`:
///
/// ```text
/// f'(x[i]) ≈ (hs²·f[i+1] + (hd² - hs²)·f[i] - hd²·f[i-1]) / (hs·hd·(hd + hs))
/// ```
///
/// Both end points use first-order one-sided differences. On a uniform grid
/// the interior formula reduces to `(f[i+1] - f[i-1]) / (2h)`.
///
/// # Errors
///
/// - `InvalidParameter` if the slices differ in length or hold fewer than
///   two points
/// - `NumericalDegeneracy` if two consecutive coordinates are not strictly
///   increasing
pub fn gradient(values: &[f64], coords: &[f64]) -> Result<Vec<f64>, PricingError> {
    let n = values.len();
    if coords.len() != n {
        return Err(PricingError::invalid_parameter(
            "grid",
            format!(
                "values and coordinates must have the same length: got {} and {}",
                n,
                coords.len()
            ),
        ));
    }
    if n < 2 {
        return Err(PricingError::invalid_parameter(
            "grid",
            format!("gradient needs at least 2 points, got {}", n),
        ));
    }

    let steps: Vec<f64> = coords.windows(2).map(|w| w[1] - w[0]).collect();
    if let Some(i) = steps.iter().position(|h| !(*h > 0.0)) {
        return Err(PricingError::degeneracy(format!(
            "grid coordinates must be strictly increasing (index {} -> {})",
            i,
            i + 1
        )));
    }

    let mut out = Vec::with_capacity(n);
    out.push((values[1] - values[0]) / steps[0]);

    for i in 1..n - 1 {
        let hs = steps[i - 1];
        let hd = steps[i];
        let numerator =
            hs * hs * values[i + 1] + (hd * hd - hs * hs) * values[i] - hd * hd * values[i - 1];
        out.push(numerator / (hs * hd * (hd + hs)));
    }

    out.push((values[n - 1] - values[n - 2]) / steps[n - 2]);
    Ok(out)
}
