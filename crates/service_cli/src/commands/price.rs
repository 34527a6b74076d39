//! Price command implementation
//!
//! Values the configured note with the Monte Carlo engine.

use pricer_pricing::mc::price;
use tracing::info;

use crate::config::AppConfig;
use crate::output::{render_price, OutputFormat};
use crate::Result;

/// Run the price command
pub fn run(config: &AppConfig, format: OutputFormat) -> Result<String> {
    let inputs = config.valuation_inputs()?;
    info!(
        paths = inputs.simulation.n_paths(),
        seed = inputs.simulation.seed(),
        rng = %inputs.simulation.rng(),
        redemption = %inputs.terms.autocall_redemption,
        "Starting pricing"
    );

    let result = price(&inputs)?;
    info!(price = result.price, std_error = result.std_error, "Pricing complete");
    render_price(&result, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::AutocallRedemption;
    use pricer_pricing::rng::RngKind;

    #[test]
    fn test_reference_configuration_prints_golden_value() {
        let mut config = AppConfig::default();
        config.simulation.rng = RngKind::Mt19937;
        config.note.autocall_redemption = AutocallRedemption::TerminalLevel;

        let csv = run(&config, OutputFormat::Csv).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("15.21,"));
    }
}
