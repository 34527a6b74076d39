//! Greeks command implementation
//!
//! Reports every sensitivity of the configured note at its base spot.

use pricer_risk::sensitivity::compute_greeks;
use tracing::info;

use crate::config::AppConfig;
use crate::output::{render_greeks, OutputFormat};
use crate::Result;

/// Run the greeks command
pub fn run(config: &AppConfig, format: OutputFormat) -> Result<String> {
    let inputs = config.valuation_inputs()?;
    let grid = config.grid.delta_grid(inputs.market.spot)?;
    info!(grid_points = grid.len(), "Computing Greeks");

    let report = compute_greeks(&inputs, &config.bumps, &grid, &config.parallel)?;
    render_greeks(&report, format)
}
