//! Autocall CLI - Command Line Pricing for Barrier Autocallable Notes
//!
//! This is the operational entry point for the autocallable note pricer.
//!
//! # Commands
//!
//! - `autocall price` - Fair value by Monte Carlo
//! - `autocall greeks` - Delta, Gamma, Vega, Theta, Rho, Epsilon and barrier sensitivities
//! - `autocall curve --kind <KIND>` - Price or one Greek across a spot grid
//! - `autocall barrier-curves` - Both barrier sensitivities across a spot grid
//! - `autocall check` - Validate the configuration only
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate resolves configuration
//! (file, environment, flags), sets up logging and renders results; all
//! numerics live in `pricer_pricing` and `pricer_risk`.

use clap::{Parser, Subcommand};
use pricer_core::types::AutocallRedemption;
use pricer_pricing::rng::RngKind;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::curve::CurveKind;
use config::{build_config, CliOverrides, LogLevel};
use output::OutputFormat;

pub use error::{CliError, Result};

/// Autocallable note pricer CLI
#[derive(Parser)]
#[command(name = "autocall")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Number of Monte Carlo paths
    #[arg(long, global = true)]
    paths: Option<usize>,

    /// Random seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Normal generator (std-rng, mt19937)
    #[arg(long, global = true)]
    rng: Option<RngKind>,

    /// Spot level
    #[arg(long, global = true)]
    spot: Option<f64>,

    /// Volatility
    #[arg(long, global = true)]
    volatility: Option<f64>,

    /// Redemption of a called trajectory (par, terminal-level)
    #[arg(long, global = true)]
    redemption: Option<AutocallRedemption>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the note
    Price,

    /// Compute every Greek at the base spot
    Greeks,

    /// Sweep the price or one Greek across a spot grid
    Curve {
        /// Quantity to sweep
        #[arg(short, long, value_enum, default_value_t = CurveKind::Price)]
        kind: CurveKind,
    },

    /// Sweep both barrier sensitivities across a spot grid
    BarrierCurves,

    /// Validate the configuration without pricing
    Check,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            paths: self.paths,
            seed: self.seed,
            spot: self.spot,
            volatility: self.volatility,
            redemption: self.redemption,
            rng: self.rng,
            log_level: self.verbose.then_some(LogLevel::Debug),
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(cli.config.as_deref(), &cli.overrides())?;

    init_tracing(config.log_level.as_filter_str());
    info!("autocall v{}", env!("CARGO_PKG_VERSION"));
    debug!(?config, "Configuration loaded");

    let output = match cli.command {
        Commands::Price => commands::price::run(&config, cli.format)?,
        Commands::Greeks => commands::greeks::run(&config, cli.format)?,
        Commands::Curve { kind } => commands::curve::run(&config, kind, cli.format)?,
        Commands::BarrierCurves => commands::barrier::run(&config, cli.format)?,
        Commands::Check => commands::check::run(&config)?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
