//! Rayon-based parallelisation utilities.
//!
//! Spot-grid sweeps and bump pairs are independent valuations: each point
//! builds its own seeded stream, so evaluating them on the Rayon pool gives
//! exactly the same numbers as a sequential loop.

use rayon::prelude::*;

/// Minimum number of grid points before a sweep is spread over threads.
pub const DEFAULT_MIN_POINTS: usize = 4;

/// Configuration for parallel execution.
///
/// # Examples
///
/// ```rust
/// use pricer_risk::parallel::ParallelConfig;
///
/// let config = ParallelConfig::default();
/// assert!(config.should_parallelize(50));
/// assert!(!ParallelConfig::sequential().should_parallelize(50));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParallelConfig {
    /// Whether sweeps may use the Rayon pool at all
    pub enabled: bool,
    /// Minimum items before using parallelism
    pub min_points: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_points: DEFAULT_MIN_POINTS,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(enabled: bool, min_points: usize) -> Self {
        Self {
            enabled,
            min_points,
        }
    }

    /// Configuration that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            min_points: DEFAULT_MIN_POINTS,
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        self.enabled && n_items >= self.min_points
    }
}

/// Maps `items` through a fallible function, on the Rayon pool when `config`
/// allows it, stopping at the first error.
///
/// Output order always matches input order.
pub fn try_map<T, R, E, F>(config: &ParallelConfig, items: &[T], mapper: F) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    F: Fn(&T) -> Result<R, E> + Sync + Send,
{
    if config.should_parallelize(items.len()) {
        items.par_iter().map(mapper).collect()
    } else {
        items.iter().map(mapper).collect()
    }
}
