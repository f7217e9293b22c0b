use serde::{Deserialize, Serialize};

use crate::stats::{self, engle_granger, CointegrationTest};
use crate::types::AlignedPair;
use crate::{PairTradeError, PairTradeResult};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

pub const DEFAULT_SIGNIFICANCE: f64 = 0.05;
pub const DEFAULT_ENTRY_THRESHOLD: f64 = 2.0;

/// Tunable parameters of the engine. Defaults reproduce the classic
/// configuration: trade beyond two standard deviations, accept
/// cointegration below p = 0.05.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// P-value cutoff below which the pair is treated as cointegrated
    pub significance: f64,
    /// Z-score magnitude at which a spread position is entered
    pub entry_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            significance: DEFAULT_SIGNIFICANCE,
            entry_threshold: DEFAULT_ENTRY_THRESHOLD,
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> PairTradeResult<()> {
        if !(self.significance > 0.0 && self.significance <= 1.0) {
            return Err(PairTradeError::InvalidInput {
                field: "significance".into(),
                reason: format!("must be in (0, 1], got {}", self.significance),
            });
        }
        if !(self.entry_threshold > 0.0 && self.entry_threshold.is_finite()) {
            return Err(PairTradeError::InvalidInput {
                field: "entry_threshold".into(),
                reason: format!("must be positive, got {}", self.entry_threshold),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Full signal trace for a cointegrated pair. Every vector is aligned to
/// `dates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    pub symbol_a: String,
    pub symbol_b: String,
    pub dates: Vec<chrono::NaiveDate>,
    /// price_a − price_b per date
    pub spread: Vec<f64>,
    /// Full-window z-score of the spread
    pub z_score: Vec<f64>,
    /// −1 short spread, +1 long spread, 0 flat
    pub signals: Vec<i8>,
    /// Relative return of the spread position held during each period;
    /// period t is driven by the signal observed at t − 1
    pub strategy_returns: Vec<f64>,
    /// Compounded growth of one unit, Π(1 + strategy_return)
    pub cumulative_returns: Vec<f64>,
    pub spread_mean: f64,
    pub spread_std: f64,
    /// Pearson correlation of the two close series (diagnostic)
    pub correlation: f64,
    /// Last cumulative return — the headline number
    pub final_return: f64,
}

/// Outcome of a pair evaluation. Rejection is a defined negative result,
/// not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Evaluation {
    Cointegrated {
        test: CointegrationTest,
        report: SignalReport,
    },
    Rejected {
        test: CointegrationTest,
    },
}

impl Evaluation {
    pub fn report(&self) -> Option<&SignalReport> {
        match self {
            Evaluation::Cointegrated { report, .. } => Some(report),
            Evaluation::Rejected { .. } => None,
        }
    }

    pub fn test(&self) -> &CointegrationTest {
        match self {
            Evaluation::Cointegrated { test, .. } => test,
            Evaluation::Rejected { test } => test,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Stateless one-shot evaluator: cointegration gate, then spread, z-score,
/// threshold signals, lagged strategy returns and their compounding.
#[derive(Debug, Clone, Default)]
pub struct SpreadSignalEngine {
    config: EngineConfig,
}

impl SpreadSignalEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate an aligned pair.
    ///
    /// Runs the Engle-Granger test with series A regressed on series B. A
    /// p-value at or above the significance cutoff yields
    /// `Evaluation::Rejected` and nothing else is computed.
    pub fn evaluate(&self, pair: &AlignedPair) -> PairTradeResult<Evaluation> {
        self.config.validate()?;

        let test = engle_granger(&pair.closes_a, &pair.closes_b)?;
        if test.p_value >= self.config.significance {
            return Ok(Evaluation::Rejected { test });
        }

        let report = compute_signal_report(pair, self.config.entry_threshold)?;
        Ok(Evaluation::Cointegrated { test, report })
    }
}

/// The pure signal computation, usable without the cointegration gate.
///
/// Spread = a − b. Z-score is taken over the whole window, not rolling.
/// Signal(t) is −1 above `entry_threshold`, +1 below its negative, 0
/// inside the band. StrategyReturn(t) applies Signal(t−1) to the relative
/// price change at t; the first period, having no prior signal, is 0.
pub fn compute_signal_report(
    pair: &AlignedPair,
    entry_threshold: f64,
) -> PairTradeResult<SignalReport> {
    if pair.is_empty() {
        return Err(PairTradeError::InputAlignment {
            reason: "aligned pair is empty".into(),
        });
    }
    if pair.closes_a.len() != pair.dates.len() || pair.closes_b.len() != pair.dates.len() {
        return Err(PairTradeError::InputAlignment {
            reason: "aligned pair vectors disagree in length".into(),
        });
    }

    let n = pair.len();
    let spread: Vec<f64> = pair
        .closes_a
        .iter()
        .zip(&pair.closes_b)
        .map(|(a, b)| a - b)
        .collect();

    let spread_mean = stats::mean(&spread);
    let spread_std = stats::sample_std(&spread);
    if spread_std == 0.0 {
        return Err(PairTradeError::DegenerateSpread {
            context: format!("{} − {} spread", pair.symbol_a, pair.symbol_b),
        });
    }

    let z_score: Vec<f64> = spread.iter().map(|s| (s - spread_mean) / spread_std).collect();

    let signals: Vec<i8> = z_score
        .iter()
        .map(|&z| {
            if z > entry_threshold {
                -1 // spread rich: short it
            } else if z < -entry_threshold {
                1 // spread cheap: long it
            } else {
                0
            }
        })
        .collect();

    let ret_a = stats::pct_change(&pair.closes_a);
    let ret_b = stats::pct_change(&pair.closes_b);

    let mut strategy_returns = Vec::with_capacity(n);
    strategy_returns.push(0.0);
    for t in 1..n {
        strategy_returns.push((ret_a[t] - ret_b[t]) * f64::from(signals[t - 1]));
    }

    let mut cumulative_returns = Vec::with_capacity(n);
    let mut growth = 1.0;
    for r in &strategy_returns {
        growth *= 1.0 + r;
        cumulative_returns.push(growth);
    }

    let correlation = stats::pearson_correlation(&pair.closes_a, &pair.closes_b);
    let final_return = *cumulative_returns.last().unwrap_or(&1.0);

    Ok(SignalReport {
        symbol_a: pair.symbol_a.clone(),
        symbol_b: pair.symbol_b.clone(),
        dates: pair.dates.clone(),
        spread,
        z_score,
        signals,
        strategy_returns,
        cumulative_returns,
        spread_mean,
        spread_std,
        correlation,
        final_return,
    })
}
