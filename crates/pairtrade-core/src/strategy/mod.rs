pub mod spread_signal;

use chrono::NaiveDate;

use crate::chart::{ChartSink, ChartSpec};
use crate::source::MarketDataSource;
use crate::strategy::spread_signal::{Evaluation, EngineConfig, SpreadSignalEngine};
use crate::types::AlignedPair;
use crate::PairTradeResult;

/// Library-level entry point: fetch both instruments, align on their
/// common dates, run the engine, and hand the curves to the chart sink if
/// one was supplied. Explicitly caller-invoked; nothing runs at load time.
pub fn run_pair_analysis(
    source: &dyn MarketDataSource,
    symbol_a: &str,
    symbol_b: &str,
    start: NaiveDate,
    end: NaiveDate,
    config: EngineConfig,
    chart: Option<&mut dyn ChartSink>,
) -> PairTradeResult<Evaluation> {
    let series_a = source.fetch_adjusted_close(symbol_a, start, end)?;
    let series_b = source.fetch_adjusted_close(symbol_b, start, end)?;

    let pair = AlignedPair::align(&series_a, &series_b)?;
    let evaluation = SpreadSignalEngine::new(config).evaluate(&pair)?;

    if let (Some(sink), Some(report)) = (chart, evaluation.report()) {
        sink.render(&ChartSpec::from_report(report, config.entry_threshold));
    }

    Ok(evaluation)
}
