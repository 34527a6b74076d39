//! Finite-difference sensitivities of the note.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Sensitivity framework                 │
//! ├──────────────────────────────────────────────────────┤
//! │  bump_sensitivity  - central difference, same seed    │
//! │  SpotGrid          - levels for curve sweeps          │
//! │  delta_gamma_curve - gradient of the price curve      │
//! │  greek_profile     - bump pair at every grid level    │
//! │  compute_greeks    - all Greeks at the base spot      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Delta and Gamma are never single bump pairs: they are gradients of a
//! price curve swept over a spot grid, read at the base spot.

mod bump;
mod curve;
mod grid;
mod report;

pub use bump::bump_sensitivity;
pub use curve::{
    barrier_curves, delta_gamma_curve, greek_profile, price_curve, BarrierCurves,
    DeltaGammaCurve, SensitivityCurve,
};
pub use grid::{SpotGrid, DEFAULT_GRID_POINTS};
pub use report::{compute_greeks, greek_curve, Greek, GreeksReport};
