use crate::application::feature_engineering_service::build_feature_matrix;
use crate::application::ml::{ModelSet, predict_next_day};
use crate::domain::errors::ForecastError;
use crate::domain::forecast::{ForecastReport, RecentRecord};
use crate::domain::market::PriceSeries;
use crate::domain::ports::{FeatureScaler, MarketDataService};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSettings {
    pub history_start: NaiveDate,
    pub recent_rows: usize,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            history_start: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
            recent_rows: 5,
        }
    }
}

/// Runs one end-to-end forecast: fetch → features → scale → predict.
pub struct ForecastService {
    market_data: Arc<dyn MarketDataService>,
    scaler: Arc<dyn FeatureScaler>,
    models: ModelSet,
    settings: ForecastSettings,
}

impl ForecastService {
    pub fn new(
        market_data: Arc<dyn MarketDataService>,
        scaler: Arc<dyn FeatureScaler>,
        models: ModelSet,
        settings: ForecastSettings,
    ) -> Self {
        Self {
            market_data,
            scaler,
            models,
            settings,
        }
    }

    pub fn settings(&self) -> &ForecastSettings {
        &self.settings
    }

    /// Forecast for `symbol`.
    ///
    /// Core failures carry a [`ForecastError`] and provider failures a
    /// `MarketDataError`; both can be recovered with `downcast_ref`.
    pub async fn forecast(&self, symbol: &str) -> Result<ForecastReport> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ForecastError::InvalidSeries {
                reason: "empty symbol".to_string(),
            }
            .into());
        }

        info!(
            "ForecastService: Fetching daily bars for {} from {} via {}",
            symbol,
            self.settings.history_start,
            self.market_data.name()
        );
        let bars = self
            .market_data
            .get_daily_bars(symbol, self.settings.history_start)
            .await
            .with_context(|| format!("Failed to fetch market data for {}", symbol))?;

        if bars.is_empty() {
            warn!("ForecastService: No data found for {}", symbol);
        }

        let series = PriceSeries::new(symbol, bars)?;
        self.forecast_series(&series)
    }

    /// The synchronous core: everything after the download.
    pub fn forecast_series(&self, series: &PriceSeries) -> Result<ForecastReport> {
        let matrix = build_feature_matrix(series);
        info!(
            "ForecastService: {} records -> {} feature rows for {}",
            series.len(),
            matrix.len(),
            series.symbol()
        );

        let scaled = self.scaler.transform_matrix(matrix.rows());
        let prediction = predict_next_day(&scaled, series.last_date(), &self.models)?;

        info!(
            "ForecastService: {} {} -> O={:.2} H={:.2} L={:.2} C={:.2}",
            series.symbol(),
            prediction.date,
            prediction.open,
            prediction.high,
            prediction.low,
            prediction.close
        );

        let recent = matrix
            .tail(self.settings.recent_rows)
            .iter()
            .filter_map(|row| series.find(row.date).map(|bar| RecentRecord::join(bar, row)))
            .collect();

        Ok(ForecastReport {
            symbol: series.symbol().to_string(),
            last_trading_date: series.last_date(),
            history_records: series.len(),
            feature_rows: matrix.len(),
            prediction,
            recent,
        })
    }
}
