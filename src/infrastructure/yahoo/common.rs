use crate::domain::errors::MarketDataError;
use crate::domain::market::PriceBar;
use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;

// ===== Chart API payload =====

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub exchange_name: Option<String>,
    /// Seconds east of UTC for the listing exchange.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

fn at(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten()
}

fn to_decimal(symbol: &str, value: f64) -> Result<Decimal, MarketDataError> {
    Decimal::from_f64(value).ok_or_else(|| MarketDataError::InvalidData {
        symbol: symbol.to_string(),
        reason: format!("price {} is not representable", value),
    })
}

fn trading_date(symbol: &str, ts: i64, gmtoffset: i64) -> Result<NaiveDate, MarketDataError> {
    DateTime::from_timestamp(ts + gmtoffset, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| MarketDataError::InvalidData {
            symbol: symbol.to_string(),
            reason: format!("invalid timestamp {}", ts),
        })
}

/// Converts a chart payload into daily bars.
///
/// Days without a close are skipped. A missing open/high/low falls back to
/// the close and a missing volume to zero. When the feed repeats a date
/// (the in-progress session), the later entry wins.
pub fn parse_chart(symbol: &str, response: ChartResponse) -> Result<Vec<PriceBar>, MarketDataError> {
    if let Some(err) = response.chart.error {
        return Err(MarketDataError::SymbolNotFound {
            symbol: symbol.to_string(),
            reason: format!("{}: {}", err.code, err.description),
        });
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(MarketDataError::SymbolNotFound {
            symbol: symbol.to_string(),
            reason: "empty chart result".to_string(),
        });
    };

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let offset = result.meta.gmtoffset;
    let mut bars: Vec<PriceBar> = Vec::with_capacity(result.timestamp.len());

    for (i, &ts) in result.timestamp.iter().enumerate() {
        let Some(close) = at(&quote.close, i) else {
            continue;
        };

        let bar = PriceBar {
            date: trading_date(symbol, ts, offset)?,
            open: to_decimal(symbol, at(&quote.open, i).unwrap_or(close))?,
            high: to_decimal(symbol, at(&quote.high, i).unwrap_or(close))?,
            low: to_decimal(symbol, at(&quote.low, i).unwrap_or(close))?,
            close: to_decimal(symbol, close)?,
            volume: to_decimal(symbol, at(&quote.volume, i).unwrap_or(0.0))?,
        };

        match bars.last_mut() {
            Some(prev) if prev.date == bar.date => *prev = bar,
            _ => bars.push(bar),
        }
    }

    Ok(bars)
}
