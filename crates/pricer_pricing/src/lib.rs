//! # Pricer Engine (Layer 2: Monte Carlo Valuation)
//!
//! ## Layer 2 Role
//!
//! pricer_pricing turns market parameters and note terms into a fair value:
//! - Seeded random streams (`rng`)
//! - GBM path generation and discounted aggregation (`mc`)
//! - The autocall payoff state machine (`path_dependent`)
//! - A closed-form check for single-observation notes (`analytical`)
//!
//! ## Determinism
//!
//! A valuation is a pure function of its [`ValuationInputs`](mc::ValuationInputs).
//! Each call builds its own [`RandomStream`](rng::RandomStream) from the
//! configured seed, so repeated calls are bit-for-bit identical and bumped
//! calls share their draws.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::{MarketParams, NoteTerms};
//! use pricer_pricing::mc::{price, MonteCarloConfig, ValuationInputs};
//!
//! let inputs = ValuationInputs::new(
//!     MarketParams::default(),
//!     NoteTerms::default(),
//!     MonteCarloConfig::builder().n_paths(5_000).seed(42).build().unwrap(),
//! );
//!
//! let result = price(&inputs).unwrap();
//! println!("Fair value: {:.2} ± {:.4}", result.price, result.confidence_95());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialisation of configurations, generator kinds and results

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod mc;
pub mod path_dependent;
pub mod rng;

pub use mc::{price, GbmParams, MonteCarloConfig, PricingResult, ValuationInputs};
pub use path_dependent::TrajectoryOutcome;
pub use rng::{RandomStream, RngKind};
