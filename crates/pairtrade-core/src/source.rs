use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::PriceSeries;
use crate::{PairTradeError, PairTradeResult};

/// The market-data collaborator: supplies adjusted closes for one symbol
/// over an inclusive date range, or fails with a data-unavailable error.
/// Called once per instrument; no retries happen downstream.
pub trait MarketDataSource {
    fn fetch_adjusted_close(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> PairTradeResult<PriceSeries>;
}

/// In-memory source over preloaded series. Backs inline CLI input and
/// tests; anything file- or network-shaped lives behind the same trait
/// elsewhere.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketData {
    series: HashMap<String, PriceSeries>,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.symbol.clone(), series);
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }
}

impl MarketDataSource for StaticMarketData {
    fn fetch_adjusted_close(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> PairTradeResult<PriceSeries> {
        let series = self.series.get(symbol).ok_or_else(|| {
            PairTradeError::DataSource(format!("no data loaded for symbol '{}'", symbol))
        })?;
        series.clipped(start, end)
    }
}
