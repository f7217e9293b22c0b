use thiserror::Error;

#[derive(Debug, Error)]
pub enum PairTradeError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Input alignment failure: {reason}")]
    InputAlignment { reason: String },

    #[error("Degenerate spread in {context}: zero variance, no z-score can be formed")]
    DegenerateSpread { context: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Market data source error: {0}")]
    DataSource(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PairTradeError {
    fn from(e: serde_json::Error) -> Self {
        PairTradeError::SerializationError(e.to_string())
    }
}
