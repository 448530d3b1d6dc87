//! Headless next-day OHLC prediction.
//!
//! # Usage
//! ```sh
//! cargo run --bin predict -- --symbol RELIANCE.NS
//! cargo run --bin predict -- --provider csv --csv-dir data/prices --symbol DEMO --json
//! ```
//!
//! Flags override the corresponding environment variables (`DEFAULT_SYMBOL`,
//! `HISTORY_START`, `MODELS_DIR`, `DATA_PROVIDER`, `CSV_DATA_DIR`, `RECENT_ROWS`).

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use ohlc_forecast::application::client::classify_error;
use ohlc_forecast::application::forecast_service::ForecastService;
use ohlc_forecast::application::ml::ModelStore;
use ohlc_forecast::config::{Config, DataProvider};
use ohlc_forecast::infrastructure::factory::create_market_data_service;
use ohlc_forecast::interfaces::report::render_report;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Ticker symbol, e.g. ^NSEI or RELIANCE.NS
    #[arg(long)]
    symbol: Option<String>,

    /// First date of history to fetch (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Directory holding scaler.json and model_{open,high,low,close}.json
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Market data provider: yahoo, csv or mock
    #[arg(long)]
    provider: Option<String>,

    /// Directory of {SYMBOL}.csv files for the csv provider
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Number of recent rows to print
    #[arg(long)]
    rows: Option<usize>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn apply_overrides(config: &mut Config, args: &Args) -> Result<()> {
    if let Some(symbol) = &args.symbol {
        config.default_symbol = symbol.trim().to_string();
    }
    if let Some(start) = args.start {
        config.history_start = start;
    }
    if let Some(dir) = &args.models_dir {
        config.models_dir = dir.clone();
    }
    if let Some(provider) = &args.provider {
        config.data_provider = provider.parse::<DataProvider>()?;
    }
    if let Some(dir) = &args.csv_dir {
        config.csv_data_dir = dir.clone();
    }
    if let Some(rows) = args.rows {
        anyhow::ensure!(rows > 0, "--rows must be at least 1");
        config.recent_rows = rows;
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env().context("Failed to load config")?;
    apply_overrides(&mut config, &args)?;
    info!(
        "Configuration loaded: Provider={:?}, Symbol={}, Start={}",
        config.data_provider, config.default_symbol, config.history_start
    );

    let store = ModelStore::new(&config.models_dir);
    let (scaler, models) = store
        .load_all()
        .with_context(|| format!("Failed to load models from {}", store.dir().display()))?;

    let service = ForecastService::new(
        create_market_data_service(&config),
        Arc::new(scaler),
        models,
        config.forecast_settings(),
    );

    let report = service.forecast(&config.default_symbol).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_report(&report));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // stdout carries the report; logs go to stderr
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", classify_error(&e).headline());
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
