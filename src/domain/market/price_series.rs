use crate::domain::errors::ForecastError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// One daily OHLCV record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl PriceBar {
    pub fn close_f64(&self) -> f64 {
        self.close.to_f64().unwrap_or(f64::NAN)
    }
}

/// Chronologically ordered daily bars for a single symbol.
///
/// Construction guarantees the series is non-empty and that dates are
/// strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, ForecastError> {
        let symbol = symbol.into();

        if bars.is_empty() {
            return Err(ForecastError::InvalidSeries {
                reason: format!("no records for {}", symbol),
            });
        }

        if let Some(pair) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
            let kind = if pair[1].date == pair[0].date {
                "duplicate"
            } else {
                "out-of-order"
            };
            return Err(ForecastError::InvalidSeries {
                reason: format!(
                    "{} date {} follows {} in {}",
                    kind, pair[1].date, pair[0].date, symbol
                ),
            });
        }

        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false: an empty series cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last_date(&self) -> NaiveDate {
        // non-empty by construction
        self.bars[self.bars.len() - 1].date
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(PriceBar::close_f64).collect()
    }

    pub fn find(&self, date: NaiveDate) -> Option<&PriceBar> {
        self.bars
            .binary_search_by_key(&date, |b| b.date)
            .ok()
            .map(|idx| &self.bars[idx])
    }
}
