//! Curve command implementation
//!
//! Sweeps the price or one Greek across a spot grid for external plotting.

use clap::ValueEnum;
use pricer_risk::sensitivity::{greek_curve, Greek};
use tracing::info;

use crate::config::AppConfig;
use crate::output::{render_curves, OutputFormat};
use crate::Result;

/// Quantity sampled along the spot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CurveKind {
    /// Fair value
    Price,
    /// ∂V/∂S
    Delta,
    /// ∂²V/∂S²
    Gamma,
    /// ∂V/∂σ
    Vega,
    /// ∂V/∂T
    Theta,
    /// ∂V/∂r
    Rho,
    /// ∂V/∂q
    Epsilon,
    /// ∂V/∂(coupon barrier)
    CouponBarrier,
    /// ∂V/∂(autocall barrier)
    AutocallBarrier,
}

impl CurveKind {
    /// Greek sampled by this curve; `None` for the price curve.
    pub fn greek(&self) -> Option<Greek> {
        match self {
            CurveKind::Price => None,
            CurveKind::Delta => Some(Greek::Delta),
            CurveKind::Gamma => Some(Greek::Gamma),
            CurveKind::Vega => Some(Greek::Vega),
            CurveKind::Theta => Some(Greek::Theta),
            CurveKind::Rho => Some(Greek::Rho),
            CurveKind::Epsilon => Some(Greek::Epsilon),
            CurveKind::CouponBarrier => Some(Greek::CouponBarrier),
            CurveKind::AutocallBarrier => Some(Greek::AutocallBarrier),
        }
    }

    /// Whether the sweep uses the wider `[0, vega_multiple·spot]` grid.
    pub fn uses_vega_grid(&self) -> bool {
        matches!(
            self,
            CurveKind::Vega | CurveKind::Theta | CurveKind::Rho | CurveKind::Epsilon
        )
    }
}

/// Run the curve command
pub fn run(config: &AppConfig, kind: CurveKind, format: OutputFormat) -> Result<String> {
    let inputs = config.valuation_inputs()?;
    let spot = inputs.market.spot;
    let grid = if kind.uses_vega_grid() {
        config.grid.vega_grid(spot)?
    } else {
        config.grid.delta_grid(spot)?
    };
    info!(kind = ?kind, points = grid.len(), end = grid.end(), "Sweeping curve");

    let curve = greek_curve(&inputs, kind.greek(), &config.bumps, &grid, &config.parallel)?;
    render_curves(&[&curve], format)
}
