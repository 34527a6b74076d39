//! Monte Carlo valuation of the autocallable note.
//!
//! # Architecture
//!
//! ```text
//! price(&ValuationInputs)
//! ├── MonteCarloConfig   (trajectory count, seed, generator)
//! ├── RandomStream       (built fresh per call)
//! └── Pipeline
//!     ├── generate_gbm_paths()   (m + 1) × N levels
//!     ├── evaluate_paths()       per-trajectory outcomes
//!     └── aggregate()            discounted mean and standard error
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::types::{AutocallRedemption, MarketParams, NoteTerms};
//! use pricer_pricing::mc::{price, MonteCarloConfig, ValuationInputs};
//! use pricer_pricing::rng::RngKind;
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(10_000)
//!     .seed(42)
//!     .rng(RngKind::Mt19937)
//!     .build()
//!     .unwrap();
//!
//! let terms = NoteTerms {
//!     autocall_redemption: AutocallRedemption::TerminalLevel,
//!     ..NoteTerms::default()
//! };
//! let inputs = ValuationInputs::new(MarketParams::default(), terms, config);
//!
//! let result = price(&inputs).unwrap();
//! assert_eq!(result.rounded_price(), 15.21);
//! ```

pub mod config;
pub mod error;
pub mod inputs;
pub mod paths;
pub mod pricer;

pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_SEED, MAX_PATHS};
pub use error::ConfigError;
pub use inputs::ValuationInputs;
pub use paths::{
    draw_normals, generate_gbm_paths, generate_gbm_paths_from_normals, GbmParams, PathMatrix,
};
pub use pricer::{aggregate, price, price_with_stream, PricingResult};
