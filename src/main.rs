use ohlc_forecast::application::client::ForecastClient;
use ohlc_forecast::application::forecast_service::ForecastService;
use ohlc_forecast::application::ml::ModelStore;
use ohlc_forecast::config::Config;
use ohlc_forecast::infrastructure::factory::create_market_data_service;
use ohlc_forecast::interfaces::forecast_view::ForecastApp;

use anyhow::Context;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

/// Forwards formatted log lines to the log panel.
#[derive(Clone)]
struct UiLogSink(crossbeam_channel::Sender<String>);

impl std::io::Write for UiLogSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        // A full or closed channel only loses the UI copy; stdout still has it.
        let _ = self.0.try_send(String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for UiLogSink {
    type Writer = UiLogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let (log_tx, log_rx) = crossbeam_channel::bounded(2_048);

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(UiLogSink(log_tx))
        .with_ansi(false)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    info!("Starting OHLC forecast...");

    let config = Config::from_env().context("Failed to load config")?;

    let store = ModelStore::new(&config.models_dir);
    let (scaler, models) = store
        .load_all()
        .with_context(|| format!("Failed to load models from {}", store.dir().display()))?;
    for (target, name) in models.describe() {
        info!("{} model: {}", target, name);
    }

    let market_data = create_market_data_service(&config);
    let service = Arc::new(ForecastService::new(
        market_data,
        Arc::new(scaler),
        models,
        config.forecast_settings(),
    ));

    let client = ForecastClient::spawn(service, log_rx)?;
    let app = ForecastApp::new(client, config.default_symbol.clone());

    // Blocks the main thread until the window closes
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_title("Stock OHLC Prediction"),
        ..Default::default()
    };

    eframe::run_native(
        "Stock OHLC Prediction",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}
