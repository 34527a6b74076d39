//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod barrier;
pub mod check;
pub mod curve;
pub mod greeks;
pub mod price;
