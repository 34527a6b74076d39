//! Closed-form checks for Monte Carlo valuations.
//!
//! # Available Solutions
//!
//! - **Single observation note**: with one observation date the note is a
//!   cash digital on the coupon barrier plus a scaled asset-or-nothing put
//!
//! # Usage
//!
//! ```rust
//! use pricer_core::types::{MarketParams, NoteTerms};
//! use pricer_pricing::analytical::single_observation_value;
//!
//! let terms = NoteTerms { observation_count: 1, ..NoteTerms::default() };
//! let value = single_observation_value(&MarketParams::default(), &terms).unwrap();
//! assert!(value > 0.0);
//! ```

pub mod single_observation;

pub use single_observation::{
    single_observation_breakdown, single_observation_value, SingleObservationBreakdown,
};
