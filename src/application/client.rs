use crate::application::forecast_service::ForecastService;
use crate::domain::errors::{ForecastError, MarketDataError};
use crate::domain::forecast::ForecastReport;
use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use tracing::{error, info};

/// Coarse failure categories for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Unknown symbol or the provider returned nothing.
    NoData,
    /// Too few records to form a feature row.
    InsufficientHistory,
    /// A model failed on well-formed input.
    Model,
    Other,
}

impl FailureKind {
    pub fn headline(&self) -> &'static str {
        match self {
            FailureKind::NoData => "No data found. Check the stock symbol.",
            FailureKind::InsufficientHistory => "Not enough history to build features.",
            FailureKind::Model => "A prediction model failed.",
            FailureKind::Other => "Something went wrong.",
        }
    }
}

pub fn classify_error(err: &anyhow::Error) -> FailureKind {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<ForecastError>() {
            return match e {
                ForecastError::InvalidSeries { .. } => FailureKind::NoData,
                ForecastError::NoHistory { .. } => FailureKind::InsufficientHistory,
                ForecastError::ModelInference { .. } => FailureKind::Model,
            };
        }
        if let Some(MarketDataError::SymbolNotFound { .. }) = cause.downcast_ref::<MarketDataError>() {
            return FailureKind::NoData;
        }
    }
    FailureKind::Other
}

/// Result of one background run.
#[derive(Clone, Debug)]
pub enum ForecastOutcome {
    Completed(Box<ForecastReport>),
    Failed {
        symbol: String,
        kind: FailureKind,
        message: String,
    },
}

/// Runs forecasts on a background tokio runtime.
/// Abstracts away channel management and provides a clean API for the UI.
pub struct ForecastClient {
    request_tx: Sender<String>,
    outcome_rx: Receiver<ForecastOutcome>,
    log_rx: Receiver<String>,
}

impl ForecastClient {
    pub fn spawn(service: Arc<ForecastService>, log_rx: Receiver<String>) -> Result<Self> {
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<String>();
        let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded();

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build Tokio runtime")?;

        std::thread::Builder::new()
            .name("forecast-worker".to_string())
            .spawn(move || {
                info!("Forecast worker started.");
                // One symbol at a time; requests queue up in the channel.
                while let Ok(symbol) = request_rx.recv() {
                    let outcome = match rt.block_on(service.forecast(&symbol)) {
                        Ok(report) => ForecastOutcome::Completed(Box::new(report)),
                        Err(e) => {
                            error!("Forecast for {} failed: {:#}", symbol, e);
                            ForecastOutcome::Failed {
                                symbol,
                                kind: classify_error(&e),
                                message: format!("{:#}", e),
                            }
                        }
                    };
                    if outcome_tx.send(outcome).is_err() {
                        break;
                    }
                }
                info!("Forecast worker stopped.");
            })
            .context("Failed to spawn forecast worker")?;

        Ok(Self {
            request_tx,
            outcome_rx,
            log_rx,
        })
    }

    pub fn request(&self, symbol: &str) -> Result<()> {
        self.request_tx
            .send(symbol.to_string())
            .map_err(|e| anyhow::anyhow!("Failed to send forecast request: {}", e))
    }

    /// Non-blocking.
    pub fn poll_outcome(&self) -> Option<ForecastOutcome> {
        self.outcome_rx.try_recv().ok()
    }

    /// Non-blocking.
    pub fn poll_log(&self) -> Option<String> {
        self.log_rx.try_recv().ok()
    }
}
