pub mod coint;
pub mod evaluate;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pairtrade_core::source::{MarketDataSource, StaticMarketData};
use pairtrade_core::PriceSeries;

use crate::input;

/// A pair of price series supplied as one document (file or stdin).
#[derive(Debug, Serialize, Deserialize)]
pub struct PairDocument {
    pub series_a: PriceSeries,
    pub series_b: PriceSeries,
}

/// Where the two price series come from, in priority order: a CSV data
/// directory, a JSON/YAML document, inline price lists, or piped stdin.
pub struct SeriesInput<'a> {
    pub data_dir: &'a Option<std::path::PathBuf>,
    pub input_file: &'a Option<String>,
    pub prices_a: &'a Option<Vec<f64>>,
    pub prices_b: &'a Option<Vec<f64>>,
    pub symbol_a: &'a str,
    pub symbol_b: &'a str,
    pub start: NaiveDate,
}

/// Resolve the series input to a market data source.
pub fn resolve_source(
    series: SeriesInput<'_>,
) -> Result<Box<dyn MarketDataSource>, Box<dyn std::error::Error>> {
    if let Some(dir) = series.data_dir {
        return Ok(Box::new(input::csv_source::CsvMarketData::new(dir)));
    }

    if let Some(path) = series.input_file {
        let doc: PairDocument = input::file::read_document(path)?;
        return Ok(Box::new(
            StaticMarketData::new()
                .with_series(doc.series_a)
                .with_series(doc.series_b),
        ));
    }

    if let (Some(a), Some(b)) = (series.prices_a, series.prices_b) {
        // Inline lists carry no dates; assign consecutive days from --start.
        return Ok(Box::new(
            StaticMarketData::new()
                .with_series(PriceSeries::from_closes(series.symbol_a, series.start, a)?)
                .with_series(PriceSeries::from_closes(series.symbol_b, series.start, b)?),
        ));
    }

    if let Some(value) = input::stdin::read_stdin()? {
        let doc: PairDocument = serde_json::from_value(value)?;
        return Ok(Box::new(
            StaticMarketData::new()
                .with_series(doc.series_a)
                .with_series(doc.series_b),
        ));
    }

    Err("Provide --data <dir>, --input <file>, --prices-a/--prices-b, \
         or pipe a JSON pair document via stdin"
        .into())
}
