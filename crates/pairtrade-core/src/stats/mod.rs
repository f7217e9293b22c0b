pub mod cointegration;
pub mod descriptive;

pub use cointegration::{engle_granger, CointegrationTest, CriticalValues, MIN_OBSERVATIONS};
pub use descriptive::{mean, pct_change, pearson_correlation, sample_std};
