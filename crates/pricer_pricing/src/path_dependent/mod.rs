//! Path-dependent payoff evaluation.
//!
//! # Key Components
//!
//! - [`AutocallObserver`]: Per-trajectory state machine walking the
//!   observation dates in order
//! - [`AutocallState`]: `Active` or `Autocalled { date }`
//! - [`TrajectoryOutcome`]: Undiscounted coupons and redemption of one trajectory
//! - [`evaluate_paths`]: Applies the observer to every column of a
//!   [`PathMatrix`](crate::mc::PathMatrix)
//!
//! Observations are streamed one level at a time, so the observer never
//! needs the full path.

mod autocall;

pub use autocall::{
    evaluate_paths, evaluate_trajectory, AutocallObserver, AutocallState, TrajectoryOutcome,
};
