//! Offline provider reading `{dir}/{symbol}.csv`.
//!
//! Expected header: `date,open,high,low,close,volume` (volume may be empty).

use crate::domain::errors::MarketDataError;
use crate::domain::market::PriceBar;
use crate::domain::ports::MarketDataService;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize)]
struct CsvBarRecord {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
}

pub struct CsvMarketDataService {
    dir: PathBuf,
}

impl CsvMarketDataService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol))
    }

    fn read_bars(path: &Path, symbol: &str, start: NaiveDate) -> Result<Vec<PriceBar>> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open CSV file {:?}", path))?;

        let mut bars = Vec::new();
        for (line, record) in reader.deserialize::<CsvBarRecord>().enumerate() {
            let record = record.with_context(|| format!("Invalid CSV row {} in {:?}", line + 2, path))?;
            if record.date < start {
                continue;
            }

            let dec = |value: f64| {
                Decimal::from_f64(value).ok_or_else(|| MarketDataError::InvalidData {
                    symbol: symbol.to_string(),
                    reason: format!("value {} on {} is not a finite number", value, record.date),
                })
            };

            bars.push(PriceBar {
                date: record.date,
                open: dec(record.open)?,
                high: dec(record.high)?,
                low: dec(record.low)?,
                close: dec(record.close)?,
                volume: dec(record.volume.unwrap_or(0.0))?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

#[async_trait]
impl MarketDataService for CsvMarketDataService {
    async fn get_daily_bars(&self, symbol: &str, start: NaiveDate) -> Result<Vec<PriceBar>> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(MarketDataError::SymbolNotFound {
                symbol: symbol.to_string(),
                reason: format!("{:?} does not exist", path),
            }
            .into());
        }

        let symbol_owned = symbol.to_string();
        let bars = tokio::task::spawn_blocking(move || Self::read_bars(&path, &symbol_owned, start))
            .await
            .context("CSV reader task failed")??;

        info!(
            "CsvMarketDataService: Loaded {} daily bars for {}",
            bars.len(),
            symbol
        );
        Ok(bars)
    }

    fn name(&self) -> &str {
        "csv"
    }
}
