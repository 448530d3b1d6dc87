use chrono::NaiveDate;
use ohlc_forecast::application::client::{FailureKind, classify_error};
use ohlc_forecast::application::forecast_service::{ForecastService, ForecastSettings};
use ohlc_forecast::application::ml::ModelStore;
use ohlc_forecast::domain::market::next_business_day;
use ohlc_forecast::infrastructure::mock::MockMarketDataService;
use ohlc_forecast::interfaces::report::render_report;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn create_models_dir() -> PathBuf {
    let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "ohlc_forecast_flow_{}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0),
        unique_id
    ));
    fs::create_dir_all(&dir).expect("Failed to create test temp dir");
    dir
}

/// Identity scaler and models that read MA_5 plus a per-target intercept.
fn write_artifacts(dir: &Path) {
    fs::write(
        dir.join("scaler.json"),
        r#"{"feature_names": ["Return", "MA_5", "MA_10", "MA_20"], "mean": [0, 0, 0, 0], "scale": [1, 1, 1, 1]}"#,
    )
    .unwrap();

    for (stem, intercept) in [
        ("model_open", 0.0),
        ("model_high", 1.0),
        ("model_low", -1.0),
        ("model_close", 0.5),
    ] {
        let json = format!(
            r#"{{"kind": "linear", "model": {{"coefficients": [0.0, 1.0, 0.0, 0.0], "intercept": {}}}}}"#,
            intercept
        );
        fs::write(dir.join(format!("{}.json", stem)), json).unwrap();
    }
}

fn build_service(market_data: MockMarketDataService) -> (ForecastService, PathBuf) {
    let dir = create_models_dir();
    write_artifacts(&dir);
    let (scaler, models) = ModelStore::new(&dir).load_all().unwrap();
    let service = ForecastService::new(
        Arc::new(market_data),
        Arc::new(scaler),
        models,
        ForecastSettings::default(),
    );
    (service, dir)
}

#[tokio::test]
async fn test_forecast_from_stored_models() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();

    let market_data = MockMarketDataService::new();
    // 30 weekdays from Monday 2024-01-01, closes 100..=129
    market_data.insert_linear(
        "RELIANCE.NS",
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        30,
        100.0,
        1.0,
    );
    let (service, dir) = build_service(market_data);

    let report = service.forecast("  RELIANCE.NS ").await?;

    assert_eq!(report.symbol, "RELIANCE.NS");
    assert_eq!(report.history_records, 30);
    assert_eq!(report.feature_rows, 10);
    assert_eq!(
        report.last_trading_date,
        NaiveDate::from_ymd_opt(2024, 2, 9).unwrap()
    );

    // Friday -> Monday
    assert_eq!(
        report.prediction.date,
        NaiveDate::from_ymd_opt(2024, 2, 12).unwrap()
    );
    assert_eq!(
        report.prediction.date,
        next_business_day(report.last_trading_date)
    );

    // MA_5 of 125..=129
    assert!((report.prediction.open - 127.0).abs() < 1e-9);
    assert!((report.prediction.high - 128.0).abs() < 1e-9);
    assert!((report.prediction.low - 126.0).abs() < 1e-9);
    assert!((report.prediction.close - 127.5).abs() < 1e-9);

    assert_eq!(report.recent.len(), 5);
    assert_eq!(
        report.recent.last().map(|r| r.date),
        Some(report.last_trading_date)
    );

    let text = render_report(&report);
    assert!(text.contains("Predicted OHLC for 2024-02-12"));
    assert!(text.contains("127.50"));

    let json = serde_json::to_value(&report)?;
    assert!(json["recent"][0].get("MA_5").is_some());

    fs::remove_dir_all(dir).ok();
    Ok(())
}

#[test]
fn test_unknown_symbol_reports_no_data() {
    let (service, dir) = build_service(MockMarketDataService::new());

    let err = tokio_test::block_on(service.forecast("NOPE")).unwrap_err();
    assert_eq!(classify_error(&err), FailureKind::NoData);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_short_history_reports_insufficient_history() {
    let market_data = MockMarketDataService::new();
    market_data.insert_linear(
        "SHORT",
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        15,
        100.0,
        1.0,
    );
    let (service, dir) = build_service(market_data);

    let err = tokio_test::block_on(service.forecast("SHORT")).unwrap_err();
    assert_eq!(classify_error(&err), FailureKind::InsufficientHistory);
    assert_eq!(
        FailureKind::InsufficientHistory.headline(),
        "Not enough history to build features."
    );

    fs::remove_dir_all(dir).ok();
}
