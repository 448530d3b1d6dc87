pub mod core;
pub mod csv_market_data;
pub mod factory;
pub mod mock;
pub mod yahoo;

pub use csv_market_data::CsvMarketDataService;
pub use mock::MockMarketDataService;
pub use yahoo::YahooMarketDataService;
