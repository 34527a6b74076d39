//! Barrier-curves command implementation

use pricer_risk::sensitivity::barrier_curves;
use tracing::info;

use crate::config::AppConfig;
use crate::output::{render_curves, OutputFormat};
use crate::Result;

/// Run the barrier-curves command
pub fn run(config: &AppConfig, format: OutputFormat) -> Result<String> {
    let inputs = config.valuation_inputs()?;
    let grid = config.grid.delta_grid(inputs.market.spot)?;
    info!(points = grid.len(), "Sweeping barrier sensitivities");

    let curves = barrier_curves(&inputs, &config.bumps, &grid, &config.parallel)?;
    render_curves(&[&curves.coupon_barrier, &curves.autocall_barrier], format)
}
