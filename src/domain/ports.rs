use crate::domain::market::PriceBar;
use crate::domain::ml::{FeatureRow, ScaledFeatureRow};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

// Need async_trait for async functions in traits
#[async_trait]
pub trait MarketDataService: Send + Sync {
    /// Daily bars for `symbol` from `start` (inclusive) up to the latest available day.
    /// May return an empty list when the provider knows nothing about the symbol.
    async fn get_daily_bars(&self, symbol: &str, start: NaiveDate) -> Result<Vec<PriceBar>>;

    fn name(&self) -> &str;
}

/// Interface for the pre-trained regressors (one per OHLC component)
pub trait RegressionModel: Send + Sync {
    /// Estimate a single scalar from one scaled feature row.
    fn predict(&self, features: &ScaledFeatureRow) -> Result<f64, String>;

    /// Get model name/type
    fn name(&self) -> &str;
}

/// Learned normalization applied between the feature pipeline and the models.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, row: &FeatureRow) -> ScaledFeatureRow;

    fn transform_matrix(&self, rows: &[FeatureRow]) -> Vec<ScaledFeatureRow> {
        rows.iter().map(|r| self.transform(r)).collect()
    }
}
