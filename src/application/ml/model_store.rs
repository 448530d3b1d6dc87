//! Loads the scaler and the four regressors from a model directory.
//!
//! Layout:
//! ```text
//! models/
//!   scaler.json
//!   model_open.json
//!   model_high.json
//!   model_low.json
//!   model_close.json
//! ```

use super::predictor::ModelSet;
use super::scaler::{ScalerArtifact, StandardScaler};
use super::smartcore_predictor::{ModelArtifact, SmartCorePredictor};
use crate::domain::errors::ModelStoreError;
use crate::domain::forecast::OhlcTarget;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub const SCALER_FILE: &str = "scaler.json";

pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(SCALER_FILE)
    }

    pub fn model_path(&self, target: OhlcTarget) -> PathBuf {
        self.dir.join(format!("{}.json", target.model_file_stem()))
    }

    pub fn load_scaler(&self) -> Result<StandardScaler, ModelStoreError> {
        let path = self.scaler_path();
        let artifact: ScalerArtifact = read_json(&path)?;
        let scaler = StandardScaler::from_artifact(artifact, &path)?;
        info!("Loaded scaler from {:?}", path);
        Ok(scaler)
    }

    pub fn load_model(&self, target: OhlcTarget) -> Result<SmartCorePredictor, ModelStoreError> {
        let path = self.model_path(target);
        let artifact: ModelArtifact = read_json(&path)?;
        artifact.validate().map_err(|reason| ModelStoreError::Shape {
            path: path.clone(),
            reason,
        })?;

        info!(
            "Loaded {} model ({}) from {:?}",
            target,
            artifact.kind(),
            path
        );
        Ok(SmartCorePredictor::new(
            format!("{} [{}]", target.model_file_stem(), artifact.kind()),
            artifact,
        ))
    }

    pub fn load_model_set(&self) -> Result<ModelSet, ModelStoreError> {
        Ok(ModelSet::new(
            Arc::new(self.load_model(OhlcTarget::Open)?),
            Arc::new(self.load_model(OhlcTarget::High)?),
            Arc::new(self.load_model(OhlcTarget::Low)?),
            Arc::new(self.load_model(OhlcTarget::Close)?),
        ))
    }

    /// Scaler and models together, as the forecast service needs them.
    pub fn load_all(&self) -> Result<(StandardScaler, ModelSet), ModelStoreError> {
        Ok((self.load_scaler()?, self.load_model_set()?))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelStoreError> {
    if !path.exists() {
        return Err(ModelStoreError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| ModelStoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|e| ModelStoreError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ml::ScaledFeatureRow;
    use crate::domain::ports::{FeatureScaler, RegressionModel};
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_test_dir() -> PathBuf {
        let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "ohlc_forecast_test_{}_{}_{}_models",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0),
            unique_id
        ));
        fs::create_dir_all(&temp_dir).expect("Failed to create test temp dir");
        temp_dir
    }

    fn write_linear(dir: &Path, stem: &str, intercept: f64) {
        let json = format!(
            r#"{{"kind": "linear", "model": {{"coefficients": [0.0, 1.0, 0.0, 0.0], "intercept": {}}}}}"#,
            intercept
        );
        fs::write(dir.join(format!("{}.json", stem)), json).unwrap();
    }

    fn write_full_store(dir: &Path) {
        fs::write(
            dir.join(SCALER_FILE),
            r#"{"mean": [0.0, 100.0, 100.0, 100.0], "scale": [1.0, 10.0, 10.0, 10.0]}"#,
        )
        .unwrap();
        write_linear(dir, "model_open", 100.0);
        write_linear(dir, "model_high", 101.0);
        write_linear(dir, "model_low", 99.0);
        write_linear(dir, "model_close", 100.5);
    }

    #[test]
    fn test_load_all() {
        let dir = create_test_dir();
        write_full_store(&dir);

        let store = ModelStore::new(&dir);
        let (scaler, models) = store.load_all().unwrap();

        let row = crate::domain::ml::FeatureRow {
            date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            ret: 0.0,
            ma_5: 120.0,
            ma_10: 100.0,
            ma_20: 100.0,
        };
        let scaled: ScaledFeatureRow = scaler.transform(&row);
        assert!((scaled.values[1] - 2.0).abs() < 1e-12);

        let high = models.get(OhlcTarget::High).predict(&scaled).unwrap();
        assert!((high - 103.0).abs() < 1e-12);
        assert_eq!(models.get(OhlcTarget::Low).name(), "model_low [linear]");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_model_names_file() {
        let dir = create_test_dir();
        write_full_store(&dir);
        fs::remove_file(dir.join("model_close.json")).unwrap();

        let err = ModelStore::new(&dir).load_model_set().unwrap_err();
        match err {
            ModelStoreError::NotFound { path } => assert!(path.ends_with("model_close.json")),
            other => panic!("unexpected error: {:?}", other),
        }

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = create_test_dir();
        fs::write(dir.join(SCALER_FILE), "{not json").unwrap();

        let err = ModelStore::new(&dir).load_scaler().unwrap_err();
        assert!(matches!(err, ModelStoreError::Parse { .. }));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_wrong_coefficient_count_is_shape_error() {
        let dir = create_test_dir();
        fs::write(
            dir.join("model_open.json"),
            r#"{"kind": "linear", "model": {"coefficients": [1.0, 2.0, 3.0], "intercept": 0.0}}"#,
        )
        .unwrap();

        let err = ModelStore::new(&dir).load_model(OhlcTarget::Open).err();
        assert!(matches!(err, Some(ModelStoreError::Shape { .. })));

        fs::remove_dir_all(dir).ok();
    }
}
