use super::common::{ChartResponse, parse_chart};
use crate::config::YahooConfig;
use crate::domain::errors::MarketDataError;
use crate::domain::market::PriceBar;
use crate::domain::ports::MarketDataService;
use crate::infrastructure::core::http_client_factory::{
    HttpClientFactory, build_url_with_query, encode,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, error, info};

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Daily history from the Yahoo Finance chart endpoint.
pub struct YahooMarketDataService {
    client: ClientWithMiddleware,
    base_url: String,
}

impl YahooMarketDataService {
    pub fn new(config: &YahooConfig) -> Self {
        Self {
            client: HttpClientFactory::create_client(&config.user_agent),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn chart_url(&self, symbol: &str, start: NaiveDate) -> String {
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = Utc::now().timestamp();
        let url = format!("{}/v8/finance/chart/{}", self.base_url, encode(symbol));

        build_url_with_query(
            &url,
            &[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ],
        )
    }
}

#[async_trait]
impl MarketDataService for YahooMarketDataService {
    async fn get_daily_bars(&self, symbol: &str, start: NaiveDate) -> Result<Vec<PriceBar>> {
        let url = self.chart_url(symbol, start);
        debug!("YahooMarketDataService: GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch chart from Yahoo Finance")?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return Err(MarketDataError::RateLimitExceeded { retry_after_secs }.into());
        }

        let body = response
            .text()
            .await
            .context("Failed to read Yahoo Finance response body")?;

        // 404 still carries a chart.error payload describing the unknown symbol
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            error!(
                "YahooMarketDataService: {} for {}: {}",
                status, symbol, body
            );
            return Err(MarketDataError::Request {
                status: status.as_u16(),
                reason: body.chars().take(200).collect(),
            }
            .into());
        }

        let payload: ChartResponse = serde_json::from_str(&body).map_err(|e| {
            MarketDataError::InvalidData {
                symbol: symbol.to_string(),
                reason: format!("unparsable chart payload: {}", e),
            }
        })?;

        let bars = parse_chart(symbol, payload)?;
        info!(
            "YahooMarketDataService: Fetched {} daily bars for {}",
            bars.len(),
            symbol
        );
        Ok(bars)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}
