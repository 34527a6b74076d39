//! Path generation for Monte Carlo simulation.
//!
//! This module implements Geometric Brownian Motion (GBM) path generation
//! with the exact lognormal transition, so the only discretisation is the
//! choice of observation dates.
//!
//! # Draw Order
//!
//! Normals are consumed step-major: for step t = 1..m, one draw per
//! trajectory in trajectory order. Two runs with the same stream therefore
//! see the same Z matrix whatever their drift or volatility.
//!
//! # Memory Layout
//!
//! Levels are stored step-major: `levels[step * n_paths + path]`, where
//! `step = 0` holds the initial spot for every trajectory.

use crate::rng::RandomStream;
use pricer_core::types::{MarketParams, NoteTerms};
use pricer_core::PricingError;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Model
///
/// Under the risk-neutral measure with continuous dividend yield:
/// ```text
/// dS = (r - q) S dt + σ S dW
/// ```
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams {
///     spot: 16.25,
///     rate: 0.04,
///     dividend_yield: 0.02,
///     volatility: 0.2,
///     maturity: 2.0,
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r), annualised.
    pub rate: f64,
    /// Continuous dividend yield (q), annualised.
    pub dividend_yield: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Horizon (T), in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, dividend_yield: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            dividend_yield,
            volatility,
            maturity,
        }
    }

    /// Combines market parameters with the note's maturity.
    #[inline]
    pub fn from_market(market: &MarketParams, terms: &NoteTerms) -> Self {
        Self::new(
            market.spot,
            market.rate,
            market.dividend_yield,
            market.volatility,
            terms.maturity,
        )
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` for a negative spot, negative
    /// volatility, non-positive maturity, or any non-finite input.
    pub fn validate(&self) -> Result<(), PricingError> {
        MarketParams::new(self.spot, self.rate, self.dividend_yield, self.volatility).validate()?;
        if !self.maturity.is_finite() || self.maturity <= 0.0 {
            return Err(PricingError::invalid_parameter(
                "maturity",
                format!("must be positive and finite, got {}", self.maturity),
            ));
        }
        Ok(())
    }
}

/// Simulated asset levels, `(n_steps + 1) × n_paths`.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    n_steps: usize,
    n_paths: usize,
    levels: Vec<f64>,
}

impl PathMatrix {
    /// Number of time steps (rows minus one).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Number of trajectories (columns).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Levels of every trajectory at `step`.
    ///
    /// # Panics
    ///
    /// Panics if `step > n_steps`.
    #[inline]
    pub fn row(&self, step: usize) -> &[f64] {
        let start = step * self.n_paths;
        &self.levels[start..start + self.n_paths]
    }

    /// Level of trajectory `path` at `step`.
    #[inline]
    pub fn level(&self, step: usize, path: usize) -> f64 {
        self.levels[step * self.n_paths + path]
    }

    /// Levels of one trajectory from `step = 0` to `n_steps`.
    pub fn trajectory(&self, path: usize) -> impl Iterator<Item = f64> + '_ {
        self.levels.iter().skip(path).step_by(self.n_paths).copied()
    }

    /// Final row.
    #[inline]
    pub fn terminal(&self) -> &[f64] {
        self.row(self.n_steps)
    }
}

/// Draws the step-major normal matrix consumed by [`generate_gbm_paths`].
///
/// Returns `n_steps × n_paths` variates; row t holds the draws for step t+1.
pub fn draw_normals(rng: &mut RandomStream, n_steps: usize, n_paths: usize) -> Vec<f64> {
    let mut normals = vec![0.0; n_steps * n_paths];
    for row in normals.chunks_mut(n_paths.max(1)) {
        rng.fill_normal(row);
    }
    normals
}

/// Generates GBM paths with the exact lognormal transition.
///
/// ```text
/// S[t] = S[t-1] · exp((r - q - σ²/2)·dt + σ·√dt·Z),   dt = T / n_steps
/// ```
///
/// A zero spot stays at zero (absorbing), a zero volatility gives the
/// deterministic forward path, and `n_steps = 0` returns the single spot
/// row without touching the stream.
///
/// # Errors
///
/// Returns `PricingError::InvalidParameter` for invalid [`GbmParams`] or a
/// zero path count.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{generate_gbm_paths, GbmParams};
/// use pricer_pricing::rng::{RandomStream, RngKind};
///
/// let params = GbmParams::new(100.0, 0.03, 0.0, 0.0, 1.0);
/// let mut rng = RandomStream::new(RngKind::StdRng, 42).unwrap();
///
/// let paths = generate_gbm_paths(&params, 4, 3, &mut rng).unwrap();
/// let forward = 100.0 * (0.03_f64).exp();
/// assert!(paths.terminal().iter().all(|s| (s - forward).abs() < 1e-9));
/// ```
pub fn generate_gbm_paths(
    params: &GbmParams,
    n_steps: usize,
    n_paths: usize,
    rng: &mut RandomStream,
) -> Result<PathMatrix, PricingError> {
    params.validate()?;
    if n_paths == 0 {
        return Err(PricingError::invalid_parameter(
            "n_paths",
            "at least one trajectory is required",
        ));
    }

    let normals = draw_normals(rng, n_steps, n_paths);
    Ok(generate_gbm_paths_from_normals(params, n_steps, n_paths, &normals))
}

/// Builds GBM paths from an explicit step-major normal matrix.
///
/// `normals` must hold `n_steps × n_paths` values as produced by
/// [`draw_normals`]. Parameters are assumed validated.
pub fn generate_gbm_paths_from_normals(
    params: &GbmParams,
    n_steps: usize,
    n_paths: usize,
    normals: &[f64],
) -> PathMatrix {
    debug_assert_eq!(normals.len(), n_steps * n_paths);

    let mut levels = vec![0.0; (n_steps + 1) * n_paths];
    levels[..n_paths].fill(params.spot);

    if n_steps > 0 {
        let dt = params.maturity / n_steps as f64;
        let drift_dt =
            (params.rate - params.dividend_yield - 0.5 * params.volatility * params.volatility) * dt;
        let vol_sqrt_dt = params.volatility * dt.sqrt();

        for step in 1..=n_steps {
            let (done, rest) = levels.split_at_mut(step * n_paths);
            let previous = &done[(step - 1) * n_paths..];
            let current = &mut rest[..n_paths];
            let z = &normals[(step - 1) * n_paths..step * n_paths];

            for ((s, &prev), &zi) in current.iter_mut().zip(previous).zip(z) {
                *s = prev * (drift_dt + vol_sqrt_dt * zi).exp();
            }
        }
    }

    PathMatrix {
        n_steps,
        n_paths,
        levels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngKind;
    use approx::assert_relative_eq;

    fn stream() -> RandomStream {
        RandomStream::new(RngKind::StdRng, 42).unwrap()
    }

    #[test]
    fn test_shape_and_initial_row() {
        let params = GbmParams::new(16.25, 0.04, 0.02, 0.2, 2.0);
        let paths = generate_gbm_paths(&params, 5, 100, &mut stream()).unwrap();

        assert_eq!(paths.n_steps(), 5);
        assert_eq!(paths.n_paths(), 100);
        assert!(paths.row(0).iter().all(|&s| s == 16.25));
        assert!(paths.terminal().iter().all(|&s| s > 0.0 && s.is_finite()));
    }

    #[test]
    fn test_zero_steps_consumes_no_draws() {
        let params = GbmParams::new(10.0, 0.04, 0.02, 0.2, 1.0);
        let mut rng = stream();
        let paths = generate_gbm_paths(&params, 0, 4, &mut rng).unwrap();

        assert_eq!(paths.terminal(), &[10.0; 4]);
        assert_eq!(rng.gen_normal(), stream().gen_normal());
    }

    #[test]
    fn test_zero_volatility_is_deterministic_forward() {
        let params = GbmParams::new(100.0, 0.05, 0.01, 0.0, 2.0);
        let paths = generate_gbm_paths(&params, 8, 10, &mut stream()).unwrap();
        let forward = 100.0 * (0.04_f64 * 2.0).exp();

        for &s in paths.terminal() {
            assert_relative_eq!(s, forward, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_zero_spot_is_absorbing() {
        let params = GbmParams::new(0.0, 0.05, 0.0, 0.3, 1.0);
        let paths = generate_gbm_paths(&params, 3, 10, &mut stream()).unwrap();
        assert!(paths.terminal().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_exact_transition() {
        let params = GbmParams::new(100.0, 0.05, 0.02, 0.25, 1.0);
        let normals = vec![0.5, -1.0, 1.5, 0.0];
        let paths = generate_gbm_paths_from_normals(&params, 2, 2, &normals);

        let dt = 0.5_f64;
        let drift = (0.05 - 0.02 - 0.5 * 0.25 * 0.25) * dt;
        let vol = 0.25 * dt.sqrt();
        assert_relative_eq!(paths.level(1, 0), 100.0 * (drift + vol * 0.5).exp());
        assert_relative_eq!(paths.level(1, 1), 100.0 * (drift - vol).exp());
        assert_relative_eq!(
            paths.level(2, 0),
            paths.level(1, 0) * (drift + vol * 1.5).exp()
        );
        assert_relative_eq!(paths.level(2, 1), paths.level(1, 1) * drift.exp());

        let traj: Vec<f64> = paths.trajectory(1).collect();
        assert_eq!(traj, vec![100.0, paths.level(1, 1), paths.level(2, 1)]);
    }

    #[test]
    fn test_same_seed_same_normals_regardless_of_parameters() {
        let mut plus = RandomStream::new(RngKind::Mt19937, 42).unwrap();
        let mut minus = RandomStream::new(RngKind::Mt19937, 42).unwrap();
        assert_eq!(draw_normals(&mut plus, 5, 50), draw_normals(&mut minus, 5, 50));

        let low = GbmParams::new(16.25, 0.04, 0.02, 0.15, 2.0);
        let high = GbmParams { volatility: 0.25, ..low };
        let mt = || RandomStream::new(RngKind::Mt19937, 42).unwrap();
        let a = generate_gbm_paths(&low, 5, 50, &mut mt()).unwrap();
        let b = generate_gbm_paths(&high, 5, 50, &mut mt()).unwrap();

        // Identical shocks: the ordering of trajectories by terminal level is preserved
        let rank = |p: &PathMatrix| {
            let mut idx: Vec<usize> = (0..p.n_paths()).collect();
            idx.sort_by(|&i, &j| p.terminal()[i].total_cmp(&p.terminal()[j]));
            idx
        };
        assert_eq!(rank(&a), rank(&b));
    }

    #[test]
    fn test_invalid_inputs() {
        let bad_vol = GbmParams::new(100.0, 0.05, 0.0, -0.2, 1.0);
        assert!(matches!(
            generate_gbm_paths(&bad_vol, 1, 1, &mut stream()),
            Err(PricingError::InvalidParameter {
                name: "volatility",
                ..
            })
        ));

        let bad_maturity = GbmParams::new(100.0, 0.05, 0.0, 0.2, 0.0);
        assert!(matches!(
            generate_gbm_paths(&bad_maturity, 1, 1, &mut stream()),
            Err(PricingError::InvalidParameter {
                name: "maturity",
                ..
            })
        ));

        let ok = GbmParams::new(100.0, 0.05, 0.0, 0.2, 1.0);
        assert!(matches!(
            generate_gbm_paths(&ok, 1, 0, &mut stream()),
            Err(PricingError::InvalidParameter { name: "n_paths", .. })
        ));
    }

    #[test]
    fn test_martingale_discounted_forward() {
        let params = GbmParams::new(100.0, 0.03, 0.01, 0.2, 1.0);
        let paths = generate_gbm_paths(&params, 4, 200_000, &mut stream()).unwrap();
        let mean = paths.terminal().iter().sum::<f64>() / paths.n_paths() as f64;
        let forward = 100.0 * (0.02_f64).exp();
        assert!((mean - forward).abs() / forward < 0.005);
    }
}
