//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! Both are generic over `T: Float`.

use num_traits::Float;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

#[inline]
fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Complementary error function approximation.
///
/// Abramowitz and Stegun formula 7.1.26, maximum absolute error 1.5e-7,
/// evaluated with Horner's method.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    let a1 = constant::<T>(0.254829592);
    let a2 = constant::<T>(-0.284496736);
    let a3 = constant::<T>(1.421413741);
    let a4 = constant::<T>(-1.453152027);
    let a5 = constant::<T>(1.061405429);
    let p = constant::<T>(0.3275911);

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < T::zero() {
        constant::<T>(2.0) - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½ · erfc(−x / √2), accurate to about 1e-7.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    constant::<T>(0.5) * erfc_approx(-x / constant::<T>(SQRT_2))
}

/// Standard normal probability density function.
///
/// φ(x) = exp(−x² / 2) / √(2π)
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    constant::<T>(FRAC_1_SQRT_2PI) * (-constant::<T>(0.5) * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_cdf_known_values() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(1.0_f64), 0.841_344_746_068_543, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.96_f64), 0.024_997_895_148_220, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [0.1_f64, 0.5, 1.0, 2.5, 4.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_norm_cdf_tails() {
        assert!(norm_cdf(-40.0_f64) >= 0.0);
        assert!(norm_cdf(-40.0_f64) < 1e-12);
        assert_relative_eq!(norm_cdf(40.0_f64), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_norm_pdf() {
        assert_relative_eq!(norm_pdf(1.0_f64), 0.241_970_724_519_143, epsilon = 1e-12);
        assert_relative_eq!(norm_pdf(-1.0_f64), norm_pdf(1.0_f64));
    }

    #[test]
    fn test_f32_support() {
        assert!((norm_cdf(0.0_f32) - 0.5).abs() < 1e-6);
    }
}
