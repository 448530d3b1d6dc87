use crate::domain::forecast::OhlcTarget;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the feature pipeline and the prediction step.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    #[error("Invalid price series: {reason}")]
    InvalidSeries { reason: String },

    #[error("Insufficient history: no complete feature row (need at least {required} records)")]
    NoHistory { required: usize },

    #[error("Model inference failed for {target}: {reason}")]
    ModelInference { target: OhlcTarget, reason: String },
}

impl ForecastError {
    /// True when the caller should report "insufficient data" rather than a failure.
    pub fn is_data_problem(&self) -> bool {
        matches!(
            self,
            ForecastError::InvalidSeries { .. } | ForecastError::NoHistory { .. }
        )
    }
}

/// Errors related to market data retrieval
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("No market data found for {symbol}: {reason}")]
    SymbolNotFound { symbol: String, reason: String },

    #[error("Invalid market data for {symbol}: {reason}")]
    InvalidData { symbol: String, reason: String },

    #[error("Market data request failed ({status}): {reason}")]
    Request { status: u16, reason: String },

    #[error("Rate limit exceeded: retry after {retry_after_secs}s")]
    RateLimitExceeded { retry_after_secs: u64 },
}

/// Errors related to loading the scaler and model artifacts
#[derive(Debug, Error)]
pub enum ModelStoreError {
    #[error("Model artifact not found: {path:?}")]
    NotFound { path: PathBuf },

    #[error("Failed to read model artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse model artifact {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Model artifact {path:?} has the wrong shape: {reason}")]
    Shape { path: PathBuf, reason: String },
}
