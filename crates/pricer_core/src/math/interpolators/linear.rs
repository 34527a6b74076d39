//! Piecewise linear interpolation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator.
///
/// Data points are sorted by x-coordinate at construction; at least two
/// points are required.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// // Delta sampled on a spot grid, read at the base spot
/// let spots = [0.0_f64, 10.0, 20.0];
/// let deltas = [0.0_f64, 0.8, 0.4];
///
/// let curve = LinearInterpolator::new(&spots, &deltas).unwrap();
/// assert!((curve.interpolate(15.0).unwrap() - 0.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Constructs a linear interpolator from x and y data points.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::InvalidInput` - Mismatched lengths or a NaN coordinate
    /// * `InterpolationError::InsufficientData` - Fewer than 2 data points
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }
        if xs.iter().any(|x| x.is_nan()) {
            return Err(InterpolationError::InvalidInput(
                "x-coordinates must not be NaN".to_string(),
            ));
        }

        let mut pairs: Vec<(T, T)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        let (xs, ys): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();

        Ok(Self { xs, ys })
    }

    /// Sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// y-values in sorted x order.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Number of data points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed interpolator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Index `i` with `xs[i] <= x < xs[i+1]`, clamped to [0, n-2].
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        if pos == 0 {
            0
        } else if pos >= self.xs.len() {
            self.xs.len() - 2
        } else {
            pos - 1
        }
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    /// `y = y0 + (y1 - y0) · (x - x0) / (x1 - x0)` on the enclosing segment.
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if !(x >= x_min && x <= x_max) {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }

        let i = self.find_segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        // Duplicate knots: take the left value
        if x1 == x0 {
            return Ok(y0);
        }
        Ok(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_insufficient_data() {
        match LinearInterpolator::new(&[1.0_f64], &[2.0]) {
            Err(InterpolationError::InsufficientData { got, need }) => {
                assert_eq!(got, 1);
                assert_eq!(need, 2);
            }
            other => panic!("Expected InsufficientData, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_lengths() {
        assert!(matches!(
            LinearInterpolator::new(&[0.0_f64, 1.0, 2.0], &[0.0, 1.0]),
            Err(InterpolationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_sorts_unsorted_data() {
        let interp =
            LinearInterpolator::new(&[3.0_f64, 1.0, 2.0, 0.0], &[9.0, 1.0, 4.0, 0.0]).unwrap();
        assert_eq!(interp.xs(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(interp.ys(), &[0.0, 1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_knots_and_midpoints() {
        let interp = LinearInterpolator::new(&[0.0_f64, 1.0, 2.0], &[0.0, 2.0, 3.0]).unwrap();
        assert_relative_eq!(interp.interpolate(0.0).unwrap(), 0.0);
        assert_relative_eq!(interp.interpolate(1.0).unwrap(), 2.0);
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 3.0);
        assert_relative_eq!(interp.interpolate(1.5).unwrap(), 2.5);
    }

    #[test]
    fn test_out_of_bounds() {
        let interp = LinearInterpolator::new(&[0.0_f64, 1.0], &[0.0, 1.0]).unwrap();
        assert!(matches!(
            interp.interpolate(1.5),
            Err(InterpolationError::OutOfBounds { .. })
        ));
        assert!(interp.interpolate(f64::NAN).is_err());
    }
}
