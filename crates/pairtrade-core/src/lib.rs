pub mod chart;
pub mod error;
pub mod source;
pub mod stats;
pub mod strategy;
pub mod types;

pub use error::PairTradeError;
pub use types::{AlignedPair, PricePoint, PriceSeries};

/// Standard result type for all pairtrade operations
pub type PairTradeResult<T> = Result<T, PairTradeError>;
