//! Market data provider configuration.
//!
//! This module handles loading configuration for the supported providers:
//! - Yahoo Finance chart API (default)
//! - Local CSV files
//! - In-memory mock data

use anyhow::Result;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Where daily history comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataProvider {
    Yahoo,
    Csv,
    Mock,
}

impl FromStr for DataProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" => Ok(DataProvider::Yahoo),
            "csv" => Ok(DataProvider::Csv),
            "mock" => Ok(DataProvider::Mock),
            _ => anyhow::bail!(
                "Invalid DATA_PROVIDER: {}. Must be 'yahoo', 'csv', or 'mock'",
                s
            ),
        }
    }
}

/// Yahoo Finance API configuration
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl YahooConfig {
    pub fn from_lookup(get: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: get("YAHOO_BASE_URL").unwrap_or_else(|| DEFAULT_YAHOO_BASE_URL.to_string()),
            user_agent: get("YAHOO_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

/// Aggregated provider configuration
#[derive(Debug, Clone)]
pub struct ProviderEnvConfig {
    pub provider: DataProvider,
    pub yahoo: YahooConfig,
    pub csv_data_dir: PathBuf,
}

impl ProviderEnvConfig {
    pub fn from_lookup(get: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let provider = get("DATA_PROVIDER")
            .unwrap_or_else(|| "yahoo".to_string())
            .parse::<DataProvider>()?;

        Ok(Self {
            provider,
            yahoo: YahooConfig::from_lookup(get),
            csv_data_dir: PathBuf::from(get("CSV_DATA_DIR").unwrap_or_else(|| "data".to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("Yahoo".parse::<DataProvider>().unwrap(), DataProvider::Yahoo);
        assert_eq!(" csv ".parse::<DataProvider>().unwrap(), DataProvider::Csv);
        assert_eq!("mock".parse::<DataProvider>().unwrap(), DataProvider::Mock);
        assert!("bloomberg".parse::<DataProvider>().is_err());
    }

    #[test]
    fn test_provider_defaults() {
        let config = ProviderEnvConfig::from_lookup(&|_| None).unwrap();
        assert_eq!(config.provider, DataProvider::Yahoo);
        assert_eq!(config.yahoo.base_url, DEFAULT_YAHOO_BASE_URL);
        assert_eq!(config.csv_data_dir, PathBuf::from("data"));
    }
}
