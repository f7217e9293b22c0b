use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use pairtrade_core::source::MarketDataSource;
use pairtrade_core::stats::engle_granger;
use pairtrade_core::AlignedPair;

use crate::commands::{resolve_source, SeriesInput};

/// Arguments for the standalone cointegration test
#[derive(Args)]
pub struct CointArgs {
    /// First ticker symbol (regressand of the cointegrating regression)
    #[arg(long)]
    pub symbol_a: String,

    /// Second ticker symbol (regressor)
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
}

pub fn run_coint(args: CointArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let source = resolve_source(SeriesInput {
        data_dir: &args.data,
        input_file: &args.input,
        prices_a: &args.prices_a,
        prices_b: &args.prices_b,
        symbol_a: &args.symbol_a,
        symbol_b: &args.symbol_b,
        start: args.start,
    })?;

    let series_a = source.fetch_adjusted_close(&args.symbol_a, args.start, args.end)?;
    let series_b = source.fetch_adjusted_close(&args.symbol_b, args.start, args.end)?;
    let pair = AlignedPair::align(&series_a, &series_b)?;

    let test = engle_granger(&pair.closes_a, &pair.closes_b)?;
    Ok(serde_json::to_value(test)?)
}
