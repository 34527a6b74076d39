//! # Pricer Risk (L3: Sensitivities)
//!
//! Finite-difference risk for the autocallable note, built on the
//! Monte Carlo engine in `pricer_pricing`.
//!
//! This crate provides:
//! - Bump sizes per perturbable input, with domain checks on each leg
//! - Central differences priced on common random numbers
//! - Price, Delta and Gamma curves over a spot grid
//! - Greek and barrier-sensitivity profiles across spot
//! - Rayon-based parallelisation of grid sweeps
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L3)             │
//! ├─────────────────────────────────────────┤
//! │  bumps/        - BumpConfig,            │
//! │                  BumpedParameter        │
//! │  sensitivity/  - curves, profiles,      │
//! │                  GreeksReport           │
//! │  parallel/     - Rayon utilities        │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L2)           │
//! │  Monte Carlo engine, seeded streams     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::{MarketParams, NoteTerms};
//! use pricer_pricing::mc::{MonteCarloConfig, ValuationInputs};
//! use pricer_risk::bumps::BumpConfig;
//! use pricer_risk::parallel::ParallelConfig;
//! use pricer_risk::sensitivity::{compute_greeks, SpotGrid};
//!
//! let inputs = ValuationInputs::new(
//!     MarketParams::default(),
//!     NoteTerms::default(),
//!     MonteCarloConfig::builder().n_paths(500).seed(42).build().unwrap(),
//! );
//! let grid = SpotGrid::delta_default(inputs.market.spot).unwrap();
//!
//! let report = compute_greeks(
//!     &inputs,
//!     &BumpConfig::default(),
//!     &grid,
//!     &ParallelConfig::default(),
//! )
//! .unwrap();
//! assert!(report.delta.is_finite());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod bumps;
pub mod parallel;
pub mod sensitivity;

// Re-export commonly used types
pub use bumps::{BumpConfig, BumpedParameter};
pub use parallel::ParallelConfig;
pub use sensitivity::{
    barrier_curves, bump_sensitivity, compute_greeks, delta_gamma_curve, greek_curve,
    greek_profile, price_curve, Greek, GreeksReport, SensitivityCurve, SpotGrid,
};
