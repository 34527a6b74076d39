//! # pricer_core: Foundation Layer for the Autocallable Note Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace and provides:
//! - Market and contract parameter types: `MarketParams`, `NoteTerms` (`types`)
//! - The error taxonomy shared by every layer: `PricingError`, `DateError` (`types::error`)
//! - Dates, ACT/365.25 year fractions and observation schedules (`types::time`)
//! - Numerical helpers: normal distribution, numerical gradient, linear
//!   interpolation (`math`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{AutocallRedemption, MarketParams, NoteTerms};
//!
//! let market = MarketParams::new(16.25, 0.04, 0.02, 0.2);
//! let terms = NoteTerms::builder()
//!     .maturity(2.0)
//!     .observation_count(5)
//!     .autocall_barrier(16.25)
//!     .coupon_barrier(11.375)
//!     .notional(16.25)
//!     .reference_level(16.25)
//!     .coupon_amount(0.40625)
//!     .build()
//!     .unwrap();
//!
//! assert!(market.validate().is_ok());
//! assert_eq!(terms.autocall_redemption, AutocallRedemption::Par);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for parameter types, dates and redemption rules

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

pub use types::PricingError;
