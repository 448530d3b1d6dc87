use crate::domain::market::{PriceBar, next_business_day};
use crate::domain::ports::MarketDataService;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, error};

/// In-memory daily bars keyed by symbol. Unknown symbols yield no bars.
#[derive(Clone, Default)]
pub struct MockMarketDataService {
    bars: Arc<RwLock<HashMap<String, Vec<PriceBar>>>>,
}

impl MockMarketDataService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, symbol: &str, bars: Vec<PriceBar>) {
        let mut guard = match self.bars.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                error!("MockMarketDataService: lock poisoned during write, recovering");
                poisoned.into_inner()
            }
        };
        guard.insert(symbol.to_string(), bars);
    }

    /// Inserts `count` weekday bars whose close rises by `step` from `first_close`.
    pub fn insert_linear(
        &self,
        symbol: &str,
        start: NaiveDate,
        count: usize,
        first_close: f64,
        step: f64,
    ) {
        let mut date = start;
        if !crate::domain::market::is_business_day(date) {
            date = next_business_day(date);
        }

        let mut bars = Vec::with_capacity(count);
        for i in 0..count {
            let close = Decimal::from_f64(first_close + step * i as f64).unwrap_or_default();
            bars.push(PriceBar {
                date,
                open: close,
                high: close + Decimal::ONE,
                low: close - Decimal::ONE,
                close,
                volume: Decimal::from(1_000 + i as i64),
            });
            date = next_business_day(date);
        }
        self.insert(symbol, bars);
    }
}

#[async_trait]
impl MarketDataService for MockMarketDataService {
    async fn get_daily_bars(&self, symbol: &str, start: NaiveDate) -> Result<Vec<PriceBar>> {
        let guard = match self.bars.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let bars: Vec<PriceBar> = guard
            .get(symbol)
            .map(|bars| bars.iter().filter(|b| b.date >= start).cloned().collect())
            .unwrap_or_default();

        debug!("MockMarketDataService: {} bars for {}", bars.len(), symbol);
        Ok(bars)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::is_business_day;

    #[tokio::test]
    async fn test_insert_linear_skips_weekends() {
        let mock = MockMarketDataService::new();
        // 2024-03-09 is a Saturday
        mock.insert_linear("SPY", "2024-03-09".parse().unwrap(), 6, 10.0, 0.5);

        let bars = mock
            .get_daily_bars("SPY", "2024-01-01".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(bars.len(), 6);
        assert_eq!(bars[0].date, "2024-03-11".parse::<NaiveDate>().unwrap());
        assert!(bars.iter().all(|b| is_business_day(b.date)));
        assert_eq!(bars[5].close, Decimal::from_f64(12.5).unwrap());
    }

    #[tokio::test]
    async fn test_start_filter_and_unknown_symbol() {
        let mock = MockMarketDataService::new();
        mock.insert_linear("SPY", "2024-03-04".parse().unwrap(), 10, 10.0, 1.0);

        let bars = mock
            .get_daily_bars("SPY", "2024-03-11".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(bars.len(), 5);

        let none = mock
            .get_daily_bars("QQQ", "2024-01-01".parse().unwrap())
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
