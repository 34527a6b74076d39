//! Interpolation of sampled curves.
//!
//! The risk layer samples price and Greek curves on a spot grid and reads
//! values at the base spot through an [`Interpolator`].
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let xs = [0.0_f64, 1.0, 2.0, 3.0];
//! let ys = [0.0, 1.0, 4.0, 9.0];
//!
//! let interp = LinearInterpolator::new(&xs, &ys).unwrap();
//! assert_eq!(interp.domain(), (0.0, 3.0));
//!
//! let y = interp.interpolate(1.5).unwrap();
//! assert!((y - 2.5).abs() < 1e-10);
//! ```

mod linear;

pub use linear::LinearInterpolator;

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolation over a closed domain.
pub trait Interpolator<T: Float> {
    /// Interpolated value at `x`.
    ///
    /// # Errors
    /// Returns `InterpolationError::OutOfBounds` if `x` lies outside [`domain`](Interpolator::domain).
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Valid interpolation range `(x_min, x_max)`.
    fn domain(&self) -> (T, T);
}
