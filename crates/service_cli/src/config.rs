//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command-line flags.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`AUTOCALL_PATHS`, `AUTOCALL_SEED`, `AUTOCALL_LOG_LEVEL`)
//! 3. Config file
//! 4. Default values (the reference note)

use pricer_core::types::{
    AutocallRedemption, Date, DayCountConvention, MarketParams, NoteTerms, ObservationSchedule,
};
use pricer_pricing::mc::{MonteCarloConfig, ValuationInputs, DEFAULT_SEED};
use pricer_pricing::rng::RngKind;
use pricer_risk::bumps::BumpConfig;
use pricer_risk::parallel::ParallelConfig;
use pricer_risk::sensitivity::{SpotGrid, DEFAULT_GRID_POINTS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding the trajectory count.
pub const ENV_PATHS: &str = "AUTOCALL_PATHS";
/// Environment variable overriding the seed.
pub const ENV_SEED: &str = "AUTOCALL_SEED";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "AUTOCALL_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Config file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable could not be parsed.
    #[error("Environment variable {name}: cannot parse '{value}'")]
    EnvError {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },

    /// Note maturity given both directly and as a date range.
    #[error("[note] sets both 'maturity' and 'start_date'/'end_date'; choose one")]
    AmbiguousMaturity,

    /// Only one end of the date range was given.
    #[error("[note] needs both 'start_date' and 'end_date'")]
    IncompleteSchedule,

    /// Date range rejected.
    #[error("Invalid observation schedule: {0}")]
    Schedule(#[from] pricer_core::types::DateError),

    /// Configured values fail validation.
    #[error("{0}")]
    Invalid(#[from] pricer_core::PricingError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace
    Trace,
    /// Debug
    Debug,
    /// Info
    Info,
    /// Warn
    #[default]
    Warn,
    /// Error
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// `[market]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSection {
    /// Initial asset level
    pub spot: f64,
    /// Risk-free rate
    pub rate: f64,
    /// Continuous dividend yield
    pub dividend_yield: f64,
    /// Lognormal volatility
    pub volatility: f64,
}

impl Default for MarketSection {
    fn default() -> Self {
        let m = MarketParams::default();
        Self {
            spot: m.spot,
            rate: m.rate,
            dividend_yield: m.dividend_yield,
            volatility: m.volatility,
        }
    }
}

impl From<MarketSection> for MarketParams {
    fn from(s: MarketSection) -> Self {
        MarketParams::new(s.spot, s.rate, s.dividend_yield, s.volatility)
    }
}

/// `[note]` section.
///
/// The maturity is either given in years or derived from `start_date` and
/// `end_date` under `day_count`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteSection {
    /// Maturity in years
    pub maturity: Option<f64>,
    /// Issue date
    pub start_date: Option<Date>,
    /// Final observation date
    pub end_date: Option<Date>,
    /// Day count for the date range
    pub day_count: DayCountConvention,
    /// Number of observation dates
    pub observation_count: usize,
    /// Early redemption trigger
    pub autocall_barrier: f64,
    /// Coupon and capital protection barrier
    pub coupon_barrier: f64,
    /// Notional
    pub notional: f64,
    /// Initial reference level
    pub reference_level: f64,
    /// Coupon per qualifying date
    pub coupon_amount: f64,
    /// Redemption of a called trajectory
    pub autocall_redemption: AutocallRedemption,
}

impl Default for NoteSection {
    fn default() -> Self {
        let t = NoteTerms::default();
        Self {
            maturity: None,
            start_date: None,
            end_date: None,
            day_count: DayCountConvention::default(),
            observation_count: t.observation_count,
            autocall_barrier: t.autocall_barrier,
            coupon_barrier: t.coupon_barrier,
            notional: t.notional,
            reference_level: t.reference_level,
            coupon_amount: t.coupon_amount,
            autocall_redemption: t.autocall_redemption,
        }
    }
}

impl NoteSection {
    /// Maturity in years.
    ///
    /// # Errors
    ///
    /// `AmbiguousMaturity` when both forms are given, `IncompleteSchedule`
    /// for a half-open date range, `Schedule` if the range is not increasing.
    pub fn resolve_maturity(&self) -> Result<f64, ConfigError> {
        match (self.maturity, self.schedule()?) {
            (Some(t), None) => Ok(t),
            (None, Some(schedule)) => Ok(schedule.maturity_years()),
            (None, None) => Ok(NoteTerms::default().maturity),
            (Some(_), Some(_)) => Err(ConfigError::AmbiguousMaturity),
        }
    }

    /// Observation schedule, when the note is given by start and end dates.
    ///
    /// # Errors
    ///
    /// `AmbiguousMaturity` when `maturity` is also given, `IncompleteSchedule`
    /// for a half-open date range, `Schedule` if the range is not increasing.
    pub fn schedule(&self) -> Result<Option<ObservationSchedule>, ConfigError> {
        match (self.start_date, self.end_date) {
            (Some(_), _) | (_, Some(_)) if self.maturity.is_some() => {
                Err(ConfigError::AmbiguousMaturity)
            }
            (Some(start), Some(end)) => Ok(Some(ObservationSchedule::with_day_count(
                start,
                end,
                self.observation_count.max(1),
                self.day_count,
            )?)),
            (Some(_), None) | (None, Some(_)) => Err(ConfigError::IncompleteSchedule),
            (None, None) => Ok(None),
        }
    }

    /// Builds validated note terms.
    ///
    /// # Errors
    ///
    /// Maturity resolution failures and term validation failures.
    pub fn to_terms(&self) -> Result<NoteTerms, ConfigError> {
        let terms = NoteTerms::builder()
            .maturity(self.resolve_maturity()?)
            .observation_count(self.observation_count)
            .autocall_barrier(self.autocall_barrier)
            .coupon_barrier(self.coupon_barrier)
            .notional(self.notional)
            .reference_level(self.reference_level)
            .coupon_amount(self.coupon_amount)
            .autocall_redemption(self.autocall_redemption)
            .build()?;
        Ok(terms)
    }
}

/// `[simulation]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    /// Number of trajectories
    pub paths: usize,
    /// Random seed
    pub seed: u64,
    /// Normal generator
    pub rng: RngKind,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            paths: 10_000,
            seed: DEFAULT_SEED,
            rng: RngKind::default(),
        }
    }
}

/// `[grid]` section: spot grids as multiples of the base spot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSection {
    /// Levels per grid
    pub points: usize,
    /// Delta/Gamma and barrier grids span `[0, delta_multiple·spot]`
    pub delta_multiple: f64,
    /// Vega and other profile grids span `[0, vega_multiple·spot]`
    pub vega_multiple: f64,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            points: DEFAULT_GRID_POINTS,
            delta_multiple: 2.0,
            vega_multiple: 3.0,
        }
    }
}

impl GridSection {
    /// Grid for Delta, Gamma and barrier curves.
    pub fn delta_grid(&self, spot: f64) -> Result<SpotGrid, ConfigError> {
        Ok(SpotGrid::linspace(0.0, self.delta_multiple * spot, self.points)?)
    }

    /// Grid for bump-pair profiles.
    pub fn vega_grid(&self, spot: f64) -> Result<SpotGrid, ConfigError> {
        Ok(SpotGrid::linspace(0.0, self.vega_multiple * spot, self.points)?)
    }
}

/// Full CLI configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Market parameters
    pub market: MarketSection,
    /// Contract terms
    pub note: NoteSection,
    /// Simulation settings
    pub simulation: SimulationSection,
    /// Finite-difference bump sizes
    pub bumps: BumpConfig,
    /// Spot grids
    pub grid: GridSection,
    /// Parallel sweeps
    pub parallel: ParallelConfig,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Command-line overrides.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Trajectory count
    pub paths: Option<usize>,
    /// Random seed
    pub seed: Option<u64>,
    /// Spot level
    pub spot: Option<f64>,
    /// Volatility
    pub volatility: Option<f64>,
    /// Redemption rule for called trajectories
    pub redemption: Option<AutocallRedemption>,
    /// Normal generator
    pub rng: Option<RngKind>,
    /// Log level
    pub log_level: Option<LogLevel>,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Applies `AUTOCALL_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_PATHS) {
            self.simulation.paths = value.trim().parse().map_err(|_| ConfigError::EnvError {
                name: ENV_PATHS,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            self.simulation.seed = value.trim().parse().map_err(|_| ConfigError::EnvError {
                name: ENV_SEED,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(value.trim())?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(paths) = cli.paths {
            self.simulation.paths = paths;
        }
        if let Some(seed) = cli.seed {
            self.simulation.seed = seed;
        }
        if let Some(rng) = cli.rng {
            self.simulation.rng = rng;
        }
        if let Some(spot) = cli.spot {
            self.market.spot = spot;
        }
        if let Some(volatility) = cli.volatility {
            self.market.volatility = volatility;
        }
        if let Some(rule) = cli.redemption {
            self.note.autocall_redemption = rule;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
    }

    /// Valuation inputs described by this configuration.
    ///
    /// # Errors
    ///
    /// The first invalid market, note or simulation setting.
    pub fn valuation_inputs(&self) -> Result<ValuationInputs, ConfigError> {
        let market: MarketParams = self.market.into();
        market.validate()?;
        let terms = self.note.to_terms()?;
        let simulation = MonteCarloConfig::builder()
            .n_paths(self.simulation.paths)
            .seed(self.simulation.seed)
            .rng(self.simulation.rng)
            .build()
            .map_err(pricer_core::PricingError::from)?;
        Ok(ValuationInputs::new(market, terms, simulation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.valuation_inputs()?;
        self.bumps
            .validate()
            .map_err(pricer_core::PricingError::from)?;
        self.grid.delta_grid(self.market.spot)?;
        self.grid.vega_grid(self.market.spot)?;
        Ok(())
    }
}

/// Build configuration from all sources
pub fn build_config(path: Option<&Path>, cli: &CliOverrides) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    config.apply_env(|name| std::env::var(name).ok())?;
    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_reference_note() {
        let config = AppConfig::default();
        let inputs = config.valuation_inputs().unwrap();
        assert_eq!(inputs.market, MarketParams::default());
        assert_eq!(inputs.terms, NoteTerms::default());
        assert_eq!(inputs.simulation.n_paths(), 10_000);
        assert_eq!(inputs.simulation.seed(), 42);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"

            [market]
            spot = 100.0
            volatility = 0.3

            [note]
            maturity = 3.0
            observation_count = 6
            autocall_barrier = 100.0
            coupon_barrier = 60.0
            notional = 100.0
            reference_level = 100.0
            coupon_amount = 2.0
            autocall_redemption = "terminal-level"

            [simulation]
            paths = 20000
            seed = 7
            rng = "mt19937"

            [bumps]
            volatility = 0.01

            [grid]
            points = 21

            [parallel]
            enabled = false
        "#;

        let config = AppConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.market.spot, 100.0);
        assert_eq!(config.market.rate, 0.04);
        assert_eq!(config.note.autocall_redemption, AutocallRedemption::TerminalLevel);
        assert_eq!(config.simulation.rng, RngKind::Mt19937);
        assert_eq!(
            config.bumps.bump_for(pricer_risk::bumps::BumpedParameter::Volatility),
            0.01
        );
        assert_eq!(
            config.bumps.bump_for(pricer_risk::bumps::BumpedParameter::Maturity),
            1.0
        );
        assert_eq!(config.grid.points, 21);
        assert!(!config.parallel.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_file_matches_defaults() {
        let sample = AppConfig::from_toml(include_str!("../../../autocall.toml")).unwrap();
        let defaults = AppConfig::default();

        assert_eq!(
            sample.valuation_inputs().unwrap(),
            defaults.valuation_inputs().unwrap()
        );
        assert_eq!(sample.bumps, defaults.bumps);
        assert_eq!(sample.grid, defaults.grid);
        assert_eq!(sample.parallel, defaults.parallel);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml("[simulation]\npaths = 500\n").unwrap();
        assert_eq!(config.simulation.paths, 500);
        assert_eq!(config.market, MarketSection::default());
        assert_eq!(config.note, NoteSection::default());
    }

    #[test]
    fn test_maturity_from_dates() {
        let config = AppConfig::from_toml(
            r#"
            [note]
            start_date = "2024-01-15"
            end_date = "2026-01-15"
            "#,
        )
        .unwrap();
        let terms = config.note.to_terms().unwrap();
        assert_relative_eq!(terms.maturity, 731.0 / 365.25, epsilon = 1e-12);

        let dates = config.note.schedule().unwrap().unwrap().observation_dates();
        assert_eq!(dates.len(), terms.observation_count);
        assert_eq!(dates[terms.observation_count - 1], Date::from_ymd(2026, 1, 15).unwrap());
        assert!(AppConfig::default().note.schedule().unwrap().is_none());
    }

    #[test]
    fn test_maturity_conflicts() {
        let both = NoteSection {
            maturity: Some(2.0),
            start_date: Some(Date::from_ymd(2024, 1, 15).unwrap()),
            end_date: Some(Date::from_ymd(2026, 1, 15).unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            both.resolve_maturity(),
            Err(ConfigError::AmbiguousMaturity)
        ));

        let half = NoteSection {
            start_date: Some(Date::from_ymd(2024, 1, 15).unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            half.resolve_maturity(),
            Err(ConfigError::IncompleteSchedule)
        ));

        let reversed = NoteSection {
            start_date: Some(Date::from_ymd(2026, 1, 15).unwrap()),
            end_date: Some(Date::from_ymd(2024, 1, 15).unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            reversed.resolve_maturity(),
            Err(ConfigError::Schedule(_))
        ));
    }

    #[test]
    fn test_precedence_cli_over_env_over_file() {
        let mut config = AppConfig::from_toml("[simulation]\npaths = 500\nseed = 1\n").unwrap();
        let env: HashMap<&str, &str> = [(ENV_PATHS, "800"), (ENV_SEED, "2"), (ENV_LOG_LEVEL, "info")]
            .into_iter()
            .collect();
        config
            .apply_env(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.simulation.paths, 800);
        assert_eq!(config.simulation.seed, 2);
        assert_eq!(config.log_level, LogLevel::Info);

        config.merge_with_cli(&CliOverrides {
            seed: Some(3),
            volatility: Some(0.35),
            redemption: Some(AutocallRedemption::TerminalLevel),
            ..Default::default()
        });
        assert_eq!(config.simulation.paths, 800);
        assert_eq!(config.simulation.seed, 3);
        assert_eq!(config.market.volatility, 0.35);
        assert_eq!(config.note.autocall_redemption, AutocallRedemption::TerminalLevel);
    }

    #[test]
    fn test_bad_env_value() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(|name| (name == ENV_PATHS).then(|| "many".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvError { name: ENV_PATHS, .. }));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AppConfig::default();
        config.simulation.paths = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.note.coupon_barrier = 20.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.grid.points = 1;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.simulation.rng = RngKind::Mt19937;
        config.simulation.seed = 1 << 32;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(
                pricer_core::PricingError::InvalidParameter { name: "seed", .. }
            ))
        ));

        assert!(AppConfig::from_toml("log_level = \"loud\"").is_err());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(format!("{}", LogLevel::Error), "error");
        assert!(LogLevel::from_str("invalid").is_err());
    }
}
