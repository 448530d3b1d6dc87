use crate::domain::market::PriceBar;
use crate::domain::ml::FeatureRow;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four price components a model can be trained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OhlcTarget {
    Open,
    High,
    Low,
    Close,
}

impl OhlcTarget {
    pub const ALL: [OhlcTarget; 4] = [
        OhlcTarget::Open,
        OhlcTarget::High,
        OhlcTarget::Low,
        OhlcTarget::Close,
    ];

    /// Artifact file stem, e.g. `model_open`.
    pub fn model_file_stem(&self) -> &'static str {
        match self {
            OhlcTarget::Open => "model_open",
            OhlcTarget::High => "model_high",
            OhlcTarget::Low => "model_low",
            OhlcTarget::Close => "model_close",
        }
    }
}

impl fmt::Display for OhlcTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OhlcTarget::Open => "Open",
            OhlcTarget::High => "High",
            OhlcTarget::Low => "Low",
            OhlcTarget::Close => "Close",
        };
        f.write_str(label)
    }
}

/// Next-day OHLC estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Prediction {
    pub fn value(&self, target: OhlcTarget) -> f64 {
        match target {
            OhlcTarget::Open => self.open,
            OhlcTarget::High => self.high,
            OhlcTarget::Low => self.low,
            OhlcTarget::Close => self.close,
        }
    }
}

/// A bar joined with the features derived for its date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentRecord {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    #[serde(rename = "Return")]
    pub ret: f64,
    #[serde(rename = "MA_5")]
    pub ma_5: f64,
    #[serde(rename = "MA_10")]
    pub ma_10: f64,
    #[serde(rename = "MA_20")]
    pub ma_20: f64,
}

impl RecentRecord {
    pub fn join(bar: &PriceBar, features: &FeatureRow) -> Self {
        Self {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            ret: features.ret,
            ma_5: features.ma_5,
            ma_10: features.ma_10,
            ma_20: features.ma_20,
        }
    }
}

/// Everything a presentation layer needs for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub symbol: String,
    pub last_trading_date: NaiveDate,
    pub history_records: usize,
    pub feature_rows: usize,
    pub prediction: Prediction,
    pub recent: Vec<RecentRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_value_by_target() {
        let p = Prediction {
            date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
        };
        let values: Vec<f64> = OhlcTarget::ALL.iter().map(|t| p.value(*t)).collect();
        assert_eq!(values, vec![1.0, 2.0, 0.5, 1.5]);
    }

    #[test]
    fn test_model_file_stems() {
        assert_eq!(OhlcTarget::Open.model_file_stem(), "model_open");
        assert_eq!(OhlcTarget::Close.model_file_stem(), "model_close");
        assert_eq!(OhlcTarget::Low.to_string(), "Low");
    }
}
