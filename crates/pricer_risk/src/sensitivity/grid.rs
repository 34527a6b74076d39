//! Spot grids for curve sweeps.

use pricer_core::PricingError;

/// Number of points on the reference grids.
pub const DEFAULT_GRID_POINTS: usize = 50;

/// Strictly increasing, non-negative spot levels.
///
/// # Examples
///
/// ```rust
/// use pricer_risk::sensitivity::SpotGrid;
///
/// let grid = SpotGrid::linspace(0.0, 2.0, 5).unwrap();
/// assert_eq!(grid.points(), &[0.0, 0.5, 1.0, 1.5, 2.0]);
///
/// let delta = SpotGrid::delta_default(16.25).unwrap();
/// assert_eq!(delta.len(), 50);
/// assert_eq!(delta.end(), 32.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpotGrid {
    points: Vec<f64>,
}

impl SpotGrid {
    /// `n` evenly spaced levels from `start` to `end` inclusive.
    ///
    /// Level `i` is `start + i·(end - start)/(n - 1)`; the last level is set
    /// to `end` exactly.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidParameter` unless `n ≥ 2`, `start ≥ 0` and
    /// `end > start`, all finite.
    pub fn linspace(start: f64, end: f64, n: usize) -> Result<Self, PricingError> {
        if n < 2 {
            return Err(PricingError::invalid_parameter(
                "grid",
                format!("at least 2 points are required, got {}", n),
            ));
        }
        if !start.is_finite() || !end.is_finite() || start < 0.0 || end <= start {
            return Err(PricingError::invalid_parameter(
                "grid",
                format!(
                    "range must satisfy 0 <= start < end, got [{}, {}]",
                    start, end
                ),
            ));
        }

        let step = (end - start) / (n - 1) as f64;
        let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
        points[n - 1] = end;
        Ok(Self { points })
    }

    /// Grid from explicit levels.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidParameter` for fewer than 2 levels, a negative
    /// or non-finite level, or levels that are not strictly increasing.
    pub fn from_points(points: Vec<f64>) -> Result<Self, PricingError> {
        if points.len() < 2 {
            return Err(PricingError::invalid_parameter(
                "grid",
                format!("at least 2 points are required, got {}", points.len()),
            ));
        }
        if points.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(PricingError::invalid_parameter(
                "grid",
                "spot levels must be finite and non-negative",
            ));
        }
        if points.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PricingError::invalid_parameter(
                "grid",
                "spot levels must be strictly increasing",
            ));
        }
        Ok(Self { points })
    }

    /// 50 levels on `[0, 2·spot]`, the Delta/Gamma grid.
    pub fn delta_default(spot: f64) -> Result<Self, PricingError> {
        Self::linspace(0.0, 2.0 * spot, DEFAULT_GRID_POINTS)
    }

    /// 50 levels on `[0, 3·spot]`, the Vega grid.
    pub fn vega_default(spot: f64) -> Result<Self, PricingError> {
        Self::linspace(0.0, 3.0 * spot, DEFAULT_GRID_POINTS)
    }

    /// Spot levels.
    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of levels.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Lowest level.
    #[inline]
    pub fn start(&self) -> f64 {
        self.points[0]
    }

    /// Highest level.
    #[inline]
    pub fn end(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Whether `spot` lies within `[start, end]`.
    #[inline]
    pub fn contains(&self, spot: f64) -> bool {
        spot >= self.start() && spot <= self.end()
    }
}
