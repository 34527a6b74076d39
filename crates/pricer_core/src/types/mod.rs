//! Market, contract, time and error types.
//!
//! This module provides:
//! - `market`: Market parameters of the lognormal model (`MarketParams`)
//! - `note`: Contract terms of the autocallable note (`NoteTerms`, `AutocallRedemption`)
//! - `time`: Dates, ACT/365.25 year fractions and observation schedules
//! - `error`: Structured error types for pricing and date operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod error;
pub mod market;
pub mod note;
pub mod time;

pub use error::{DateError, InterpolationError, PricingError};
pub use market::MarketParams;
pub use note::{AutocallRedemption, NoteTerms, NoteTermsBuilder};
pub use time::{Date, DayCountConvention, ObservationSchedule};
