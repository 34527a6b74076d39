//! Check command implementation
//!
//! Validates the resolved configuration without running a simulation.

use std::fmt::Write as _;

use crate::config::AppConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &AppConfig) -> Result<String> {
    config.validate()?;
    let inputs = config.valuation_inputs()?;
    let grid = config.grid.delta_grid(inputs.market.spot)?;

    let mut s = String::from("Configuration OK\n");
    let _ = writeln!(
        s,
        "  market:     spot={} rate={} q={} vol={}",
        inputs.market.spot, inputs.market.rate, inputs.market.dividend_yield, inputs.market.volatility
    );
    let _ = writeln!(
        s,
        "  note:       T={:.6} dates={} AB={} CB={} notional={} coupon={} redemption={}",
        inputs.terms.maturity,
        inputs.terms.observation_count,
        inputs.terms.autocall_barrier,
        inputs.terms.coupon_barrier,
        inputs.terms.notional,
        inputs.terms.coupon_amount,
        inputs.terms.autocall_redemption
    );
    if let Some(schedule) = config.note.schedule()? {
        let dates: Vec<String> = schedule
            .observation_dates()
            .iter()
            .map(|d| d.to_string())
            .collect();
        let _ = writeln!(
            s,
            "  schedule:   {} -> {} ({}) observations {}",
            schedule.start(),
            schedule.end(),
            config.note.day_count,
            dates.join(", ")
        );
    }
    let _ = writeln!(
        s,
        "  simulation: paths={} seed={} rng={}",
        inputs.simulation.n_paths(),
        inputs.simulation.seed(),
        inputs.simulation.rng()
    );
    let _ = writeln!(
        s,
        "  grid:       {} points on [{}, {}]",
        grid.len(),
        grid.start(),
        grid.end()
    );
    let _ = writeln!(s, "  log level:  {}", config.log_level);
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_reports_invalid_config() {
        let mut config = AppConfig::default();
        assert!(run(&config).unwrap().starts_with("Configuration OK"));

        config.market.volatility = -1.0;
        assert!(run(&config).is_err());
    }

    #[test]
    fn test_check_lists_observation_dates() {
        let config = AppConfig::from_toml(
            r#"
            [note]
            start_date = "2024-01-15"
            end_date = "2026-01-15"
            observation_count = 2
            "#,
        )
        .unwrap();
        let out = run(&config).unwrap();
        assert!(out.contains("2024-01-15 -> 2026-01-15"));
        assert!(out.contains("observations 2025-01-15, 2026-01-15"));
    }
}
