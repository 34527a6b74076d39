//! Numerical helpers shared by the pricing and risk layers.
//!
//! - [`distributions`]: Standard normal CDF and PDF
//! - [`differentiation`]: Finite differences and the numerical gradient on a
//!   non-uniform grid
//! - [`interpolators`]: Piecewise linear interpolation of sampled curves

pub mod differentiation;
pub mod distributions;
pub mod interpolators;
