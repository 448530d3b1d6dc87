//! Configuration module.
//!
//! Loads settings from environment variables (after `.env`), organized by
//! concern: market data provider, model artifacts and forecast defaults.
//! Parsing goes through a key lookup so tests never touch the process
//! environment.

mod provider_config;

pub use provider_config::{DataProvider, ProviderEnvConfig, YahooConfig};

use crate::application::forecast_service::ForecastSettings;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // Provider
    pub data_provider: DataProvider,
    pub yahoo: YahooConfig,
    pub csv_data_dir: PathBuf,

    // Models
    pub models_dir: PathBuf,

    // Forecast
    pub history_start: NaiveDate,
    pub default_symbol: String,
    pub recent_rows: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let provider = ProviderEnvConfig::from_lookup(&get)?;

        let history_start_str = get("HISTORY_START").unwrap_or_else(|| "2015-01-01".to_string());
        let history_start = history_start_str
            .trim()
            .parse::<NaiveDate>()
            .with_context(|| format!("Failed to parse HISTORY_START: {}", history_start_str))?;

        let recent_rows = get("RECENT_ROWS")
            .unwrap_or_else(|| "5".to_string())
            .trim()
            .parse::<usize>()
            .context("Failed to parse RECENT_ROWS")?;
        if recent_rows == 0 {
            anyhow::bail!("RECENT_ROWS must be at least 1");
        }

        let default_symbol = get("DEFAULT_SYMBOL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "^NSEI".to_string());

        Ok(Self {
            data_provider: provider.provider,
            yahoo: provider.yahoo,
            csv_data_dir: provider.csv_data_dir,
            models_dir: PathBuf::from(get("MODELS_DIR").unwrap_or_else(|| "models".to_string())),
            history_start,
            default_symbol,
            recent_rows,
        })
    }

    pub fn forecast_settings(&self) -> ForecastSettings {
        ForecastSettings {
            history_start: self.history_start,
            recent_rows: self.recent_rows,
        }
    }
}
