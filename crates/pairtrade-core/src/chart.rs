use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::strategy::spread_signal::SignalReport;

/// A named time series handed to the charting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub name: String,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

/// The two curves of a pair evaluation: the z-score with its entry bands
/// and the cumulative return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub z_score: Curve,
    /// Horizontal entry bands drawn at ±threshold on the z-score panel
    pub entry_threshold: f64,
    pub cumulative_return: Curve,
}

impl ChartSpec {
    pub fn from_report(report: &SignalReport, entry_threshold: f64) -> Self {
        Self {
            z_score: Curve {
                name: format!("Z-score of {} − {} spread", report.symbol_a, report.symbol_b),
                dates: report.dates.clone(),
                values: report.z_score.clone(),
            },
            entry_threshold,
            cumulative_return: Curve {
                name: "Cumulative strategy return".into(),
                dates: report.dates.clone(),
                values: report.cumulative_returns.clone(),
            },
        }
    }
}

/// Charting collaborator: a render-only side channel. Nothing it produces
/// flows back into the computation.
pub trait ChartSink {
    fn render(&mut self, spec: &ChartSpec);
}

/// Sink that drops everything. Stands in when no chart was requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullChartSink;

impl ChartSink for NullChartSink {
    fn render(&mut self, _spec: &ChartSpec) {}
}
