//! Prediction step: four independent regressors applied to the latest
//! scaled feature row, plus the date the estimate is for.

use crate::domain::errors::ForecastError;
use crate::domain::forecast::{OhlcTarget, Prediction};
use crate::domain::market::next_business_day;
use crate::domain::ml::{REQUIRED_HISTORY, ScaledFeatureRow};
use crate::domain::ports::RegressionModel;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

/// One model per OHLC component.
#[derive(Clone)]
pub struct ModelSet {
    open: Arc<dyn RegressionModel>,
    high: Arc<dyn RegressionModel>,
    low: Arc<dyn RegressionModel>,
    close: Arc<dyn RegressionModel>,
}

impl ModelSet {
    pub fn new(
        open: Arc<dyn RegressionModel>,
        high: Arc<dyn RegressionModel>,
        low: Arc<dyn RegressionModel>,
        close: Arc<dyn RegressionModel>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    pub fn get(&self, target: OhlcTarget) -> &dyn RegressionModel {
        match target {
            OhlcTarget::Open => self.open.as_ref(),
            OhlcTarget::High => self.high.as_ref(),
            OhlcTarget::Low => self.low.as_ref(),
            OhlcTarget::Close => self.close.as_ref(),
        }
    }

    pub fn describe(&self) -> Vec<(OhlcTarget, String)> {
        OhlcTarget::ALL
            .iter()
            .map(|t| (*t, self.get(*t).name().to_string()))
            .collect()
    }
}

impl std::fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSet")
            .field("open", &self.open.name())
            .field("high", &self.high.name())
            .field("low", &self.low.name())
            .field("close", &self.close.name())
            .finish()
    }
}

fn invoke(
    models: &ModelSet,
    target: OhlcTarget,
    row: &ScaledFeatureRow,
) -> Result<f64, ForecastError> {
    let model = models.get(target);
    let value = model
        .predict(row)
        .map_err(|reason| ForecastError::ModelInference { target, reason })?;

    if !value.is_finite() {
        return Err(ForecastError::ModelInference {
            target,
            reason: format!("{} returned non-finite value {}", model.name(), value),
        });
    }

    debug!("Predictor: {} ({}) -> {:.4}", target, model.name(), value);
    Ok(value)
}

/// Predicts the next business day's OHLC from the most recent scaled row.
///
/// `last_trading_date` is the last date of the price series, not of the
/// feature matrix.
pub fn predict_next_day(
    scaled: &[ScaledFeatureRow],
    last_trading_date: NaiveDate,
    models: &ModelSet,
) -> Result<Prediction, ForecastError> {
    let row = scaled.last().ok_or(ForecastError::NoHistory {
        required: REQUIRED_HISTORY,
    })?;

    Ok(Prediction {
        date: next_business_day(last_trading_date),
        open: invoke(models, OhlcTarget::Open, row)?,
        high: invoke(models, OhlcTarget::High, row)?,
        low: invoke(models, OhlcTarget::Low, row)?,
        close: invoke(models, OhlcTarget::Close, row)?,
    })
}
