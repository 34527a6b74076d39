//! Monte Carlo simulation configuration.

use super::error::ConfigError;
use crate::rng::RngKind;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying the trajectory count and the seeded
/// random stream. Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
/// use pricer_pricing::rng::RngKind;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .seed(42)
///     .rng(RngKind::Mt19937)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.rng(), RngKind::Mt19937);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    /// Number of simulated trajectories.
    n_paths: usize,
    /// Seed of every stream built from this configuration.
    seed: u64,
    /// Generator behind the stream.
    rng: RngKind,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the generator kind.
    #[inline]
    pub fn rng(&self) -> RngKind {
        self.rng
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPathCount` if `n_paths` is 0 or greater
    /// than 10,000,000, and `ConfigError::SeedOutOfRange` if the seed does not
    /// fit the generator (MT19937 takes 32-bit seeds).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.seed > self.rng.max_seed() {
            return Err(ConfigError::SeedOutOfRange {
                seed: self.seed,
                rng: self.rng,
            });
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// `n_paths` is required; the seed defaults to [`DEFAULT_SEED`] and the
/// generator to [`RngKind::StdRng`].
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    seed: Option<u64>,
    rng: RngKind,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths, in [1, 10_000_000].
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the generator kind.
    #[inline]
    pub fn rng(mut self, rng: RngKind) -> Self {
        self.rng = rng;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_paths` is not set or out of range, or the
    /// seed is too wide for the generator.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_paths,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            rng: self.rng,
        };

        config.validate()?;
        Ok(config)
    }
}
