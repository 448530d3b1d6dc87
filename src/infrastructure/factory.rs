use crate::config::{Config, DataProvider};
use crate::domain::ports::MarketDataService;
use crate::infrastructure::csv_market_data::CsvMarketDataService;
use crate::infrastructure::mock::MockMarketDataService;
use crate::infrastructure::yahoo::YahooMarketDataService;
use std::sync::Arc;
use tracing::info;

/// Builds the market data service selected by `config.data_provider`.
pub fn create_market_data_service(config: &Config) -> Arc<dyn MarketDataService> {
    info!("Creating {:?} market data service", config.data_provider);

    match config.data_provider {
        DataProvider::Yahoo => Arc::new(YahooMarketDataService::new(&config.yahoo)),
        DataProvider::Csv => Arc::new(CsvMarketDataService::new(config.csv_data_dir.clone())),
        DataProvider::Mock => {
            let mock = MockMarketDataService::new();
            let start = config.history_start;
            mock.insert_linear(&config.default_symbol, start, 120, 100.0, 0.25);
            mock.insert_linear("DEMO", start, 120, 50.0, -0.1);
            Arc::new(mock)
        }
    }
}
