//! Result rendering for stdout.
//!
//! Tables are for people; JSON and CSV are for plotting and downstream
//! tools. Every renderer returns a `String` so commands stay testable.

use clap::ValueEnum;
use pricer_pricing::mc::PricingResult;
use pricer_risk::sensitivity::{GreeksReport, SensitivityCurve};
use serde_json::json;
use std::fmt::Write as _;

use crate::Result;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// JSON document
    Json,
    /// Comma-separated values with a header row
    Csv,
}

/// Renders one valuation.
pub fn render_price(result: &PricingResult, format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Table => {
            let mut s = String::new();
            let _ = writeln!(s, "┌──────────────────────┬──────────────┐");
            let _ = writeln!(s, "│ Fair value           │ {:>12.2} │", result.rounded_price());
            let _ = writeln!(s, "│ Unrounded            │ {:>12.6} │", result.price);
            let _ = writeln!(s, "│ Std error            │ {:>12.6} │", result.std_error);
            let _ = writeln!(s, "│ 95% half-width       │ {:>12.6} │", result.confidence_95());
            let _ = writeln!(s, "│ Autocall probability │ {:>12.4} │", result.autocall_probability);
            let _ = writeln!(s, "│ Expected coupons     │ {:>12.4} │", result.expected_coupons);
            let _ = writeln!(s, "│ Paths                │ {:>12} │", result.n_paths);
            let _ = writeln!(s, "└──────────────────────┴──────────────┘");
            s
        }
        OutputFormat::Json => {
            let value = json!({
                "fair_value": result.rounded_price(),
                "result": result,
            });
            serde_json::to_string_pretty(&value)? + "\n"
        }
        OutputFormat::Csv => format!(
            "fair_value,price,std_error,autocall_probability,expected_coupons,n_paths\n{:.2},{},{},{},{},{}\n",
            result.rounded_price(),
            result.price,
            result.std_error,
            result.autocall_probability,
            result.expected_coupons,
            result.n_paths
        ),
    };
    Ok(out)
}

/// Renders a Greeks report.
pub fn render_greeks(report: &GreeksReport, format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Table => {
            let mut s = String::new();
            let _ = writeln!(s, "┌──────────────────┬──────────────┐");
            let _ = writeln!(s, "│ price            │ {:>12.6} │", report.price);
            let _ = writeln!(s, "│ std error        │ {:>12.6} │", report.std_error);
            let _ = writeln!(s, "├──────────────────┼──────────────┤");
            for (greek, value) in report.iter() {
                let _ = writeln!(s, "│ {:<16} │ {:>12.6} │", greek.name(), value);
            }
            let _ = writeln!(s, "└──────────────────┴──────────────┘");
            s
        }
        OutputFormat::Json => serde_json::to_string_pretty(report)? + "\n",
        OutputFormat::Csv => {
            let mut s = String::from("name,value\n");
            let _ = writeln!(s, "price,{}", report.price);
            let _ = writeln!(s, "std_error,{}", report.std_error);
            for (greek, value) in report.iter() {
                let _ = writeln!(s, "{},{}", greek.name(), value);
            }
            s
        }
    };
    Ok(out)
}

/// Renders curves sharing one spot grid.
///
/// CSV and tables put one curve per column.
pub fn render_curves(curves: &[&SensitivityCurve], format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(curves)? + "\n",
        OutputFormat::Csv => {
            let mut s = String::from("spot");
            for c in curves {
                let _ = write!(s, ",{}", c.label);
            }
            s.push('\n');
            for (i, spot) in spots(curves).iter().enumerate() {
                let _ = write!(s, "{}", spot);
                for c in curves {
                    let _ = write!(s, ",{}", c.values[i]);
                }
                s.push('\n');
            }
            s
        }
        OutputFormat::Table => {
            let mut s = format!("{:>12}", "spot");
            for c in curves {
                let _ = write!(s, " {:>18}", c.label);
            }
            s.push('\n');
            for (i, spot) in spots(curves).iter().enumerate() {
                let _ = write!(s, "{:>12.4}", spot);
                for c in curves {
                    let _ = write!(s, " {:>18.6}", c.values[i]);
                }
                s.push('\n');
            }
            s
        }
    };
    Ok(out)
}

fn spots<'a>(curves: &[&'a SensitivityCurve]) -> &'a [f64] {
    curves.first().map(|c| c.spots.as_slice()).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> PricingResult {
        PricingResult {
            price: 15.207,
            std_error: 0.03,
            autocall_probability: 0.5,
            expected_coupons: 2.0,
            n_paths: 10_000,
        }
    }

    #[test]
    fn test_price_csv() {
        let csv = render_price(&result(), OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("fair_value,price"));
        assert!(lines.next().unwrap().starts_with("15.21,15.207,"));
    }

    #[test]
    fn test_price_json() {
        let out = render_price(&result(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["fair_value"], 15.21);
        assert_eq!(value["result"]["n_paths"], 10_000);
    }

    #[test]
    fn test_greeks_csv_lists_every_greek() {
        let csv = render_greeks(&GreeksReport::default(), OutputFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 1 + 2 + 8);
        assert!(csv.contains("coupon-barrier,0"));
    }

    #[test]
    fn test_curves_csv_columns() {
        let a = SensitivityCurve::new("coupon_barrier", vec![0.0, 1.0], vec![0.5, 0.25]).unwrap();
        let b = SensitivityCurve::new("autocall_barrier", vec![0.0, 1.0], vec![-1.0, 2.0]).unwrap();
        let csv = render_curves(&[&a, &b], OutputFormat::Csv).unwrap();
        assert_eq!(
            csv,
            "spot,coupon_barrier,autocall_barrier\n0,0.5,-1\n1,0.25,2\n"
        );
    }

    #[test]
    fn test_curves_json_round_trip() {
        let a = SensitivityCurve::new("price", vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        let out = render_curves(&[&a], OutputFormat::Json).unwrap();
        let parsed: Vec<SensitivityCurve> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, vec![a]);
    }
}
