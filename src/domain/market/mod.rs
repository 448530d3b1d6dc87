pub mod calendar;
pub mod price_series;

pub use calendar::{is_business_day, next_business_day};
pub use price_series::{PriceBar, PriceSeries};
