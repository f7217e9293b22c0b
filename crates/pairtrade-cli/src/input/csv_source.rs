use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

use pairtrade_core::source::MarketDataSource;
use pairtrade_core::{PairTradeError, PairTradeResult, PricePoint, PriceSeries};

/// One CSV row: `date,adj_close`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    adj_close: f64,
}

/// Market data source backed by a directory of per-symbol CSV files
/// (`<dir>/<SYMBOL>.csv`, header `date,adj_close`, rows in date order).
#[derive(Debug, Clone)]
pub struct CsvMarketData {
    dir: PathBuf,
}

impl CsvMarketData {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn load_series(&self, symbol: &str) -> PairTradeResult<PriceSeries> {
        let path = self.dir.join(format!("{}.csv", symbol));
        let mut reader = csv::Reader::from_path(&path).map_err(|e| {
            PairTradeError::DataSource(format!("cannot open '{}': {}", path.display(), e))
        })?;

        let mut points = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row.map_err(|e| {
                PairTradeError::DataSource(format!("bad row in '{}': {}", path.display(), e))
            })?;
            points.push(PricePoint {
                date: row.date,
                close: row.adj_close,
            });
        }

        PriceSeries::new(symbol, points)
    }
}

impl MarketDataSource for CsvMarketData {
    fn fetch_adjusted_close(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> PairTradeResult<PriceSeries> {
        self.load_series(symbol)?.clipped(start, end)
    }
}
