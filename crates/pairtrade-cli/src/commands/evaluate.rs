use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use pairtrade_core::chart::ChartSink;
use pairtrade_core::strategy::run_pair_analysis;
use pairtrade_core::strategy::spread_signal::{
    EngineConfig, DEFAULT_ENTRY_THRESHOLD, DEFAULT_SIGNIFICANCE,
};

use crate::commands::{resolve_source, SeriesInput};
use crate::output::chart::AsciiChart;

/// Arguments for the full pair evaluation
#[derive(Args)]
pub struct EvaluateArgs {
    /// First ticker symbol (long leg of the price difference)
    #[arg(long)]
    pub symbol_a: String,

    /// Second ticker symbol
    #[arg(long)]
    pub symbol_b: String,

    /// Range start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Range end date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub end: NaiveDate,

    /// Directory of <SYMBOL>.csv files (date,adj_close)
    #[arg(long)]
    pub data: Option<std::path::PathBuf>,

    /// JSON/YAML file holding both series
    #[arg(long)]
    pub input: Option<String>,

    /// Comma-separated closes for symbol A (dates assigned from --start)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub prices_a: Option<Vec<f64>>,

    /// Comma-separated closes for symbol B
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub prices_b: Option<Vec<f64>>,

    /// P-value cutoff for accepting cointegration
    #[arg(long, default_value_t = DEFAULT_SIGNIFICANCE)]
    pub significance: f64,

    /// Z-score magnitude at which a spread position is entered
    #[arg(long, default_value_t = DEFAULT_ENTRY_THRESHOLD)]
    pub entry_threshold: f64,

    /// Render the z-score and cumulative-return curves to the terminal
    #[arg(long)]
    pub chart: bool,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let source = resolve_source(SeriesInput {
        data_dir: &args.data,
        input_file: &args.input,
        prices_a: &args.prices_a,
        prices_b: &args.prices_b,
        symbol_a: &args.symbol_a,
        symbol_b: &args.symbol_b,
        start: args.start,
    })?;

    let config = EngineConfig {
        significance: args.significance,
        entry_threshold: args.entry_threshold,
    };

    let mut ascii = AsciiChart::default();
    let sink: Option<&mut dyn ChartSink> = if args.chart {
        Some(&mut ascii)
    } else {
        None
    };

    let evaluation = run_pair_analysis(
        source.as_ref(),
        &args.symbol_a,
        &args.symbol_b,
        args.start,
        args.end,
        config,
        sink,
    )?;

    Ok(serde_json::to_value(evaluation)?)
}
