//! Bump sizes and the parameters they perturb.
//!
//! - [`BumpConfig`]: absolute bump size per perturbable input
//! - [`BumpedParameter`]: which input a finite-difference pair moves, and
//!   the domain check applied to each leg

mod config;
mod error;
mod parameter;

pub use config::{
    BumpConfig, BumpConfigBuilder, DEFAULT_AUTOCALL_BARRIER_BUMP, DEFAULT_COUPON_BARRIER_BUMP,
    DEFAULT_DIVIDEND_BUMP, DEFAULT_MATURITY_BUMP, DEFAULT_RATE_BUMP, DEFAULT_VOLATILITY_BUMP,
};
pub use error::BumpConfigError;
pub use parameter::BumpedParameter;
