use crate::domain::errors::ModelStoreError;
use crate::domain::ml::{FEATURE_COUNT, FEATURE_NAMES, FeatureRow, ScaledFeatureRow};
use crate::domain::ports::FeatureScaler;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk form of a fitted standard scaler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Per-feature standard score: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// A zero scale marks a constant training column and is treated as 1.0.
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Self {
        let scale = scale.map(|s| if s == 0.0 { 1.0 } else { s });
        Self { mean, scale }
    }

    pub fn identity() -> Self {
        Self::new([0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT])
    }

    pub fn from_artifact(artifact: ScalerArtifact, path: &Path) -> Result<Self, ModelStoreError> {
        let shape_err = |reason: String| ModelStoreError::Shape {
            path: path.to_path_buf(),
            reason,
        };

        if let Some(names) = &artifact.feature_names
            && names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied())
        {
            return Err(shape_err(format!(
                "feature names {:?} do not match {:?}",
                names, FEATURE_NAMES
            )));
        }

        let mean: [f64; FEATURE_COUNT] = artifact.mean.as_slice().try_into().map_err(|_| {
            shape_err(format!(
                "expected {} mean values, found {}",
                FEATURE_COUNT,
                artifact.mean.len()
            ))
        })?;
        let scale: [f64; FEATURE_COUNT] = artifact.scale.as_slice().try_into().map_err(|_| {
            shape_err(format!(
                "expected {} scale values, found {}",
                FEATURE_COUNT,
                artifact.scale.len()
            ))
        })?;

        if mean.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(shape_err("non-finite scaler parameter".to_string()));
        }

        Ok(Self::new(mean, scale))
    }

    pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64; FEATURE_COUNT] {
        &self.scale
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, row: &FeatureRow) -> ScaledFeatureRow {
        let raw = row.to_vector();
        let mut values = [0.0; FEATURE_COUNT];
        for (i, v) in values.iter_mut().enumerate() {
            *v = (raw[i] - self.mean[i]) / self.scale[i];
        }
        ScaledFeatureRow {
            date: row.date,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn row() -> FeatureRow {
        FeatureRow {
            date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            ret: 0.02,
            ma_5: 110.0,
            ma_10: 105.0,
            ma_20: 100.0,
        }
    }

    #[test]
    fn test_standard_score() {
        let scaler = StandardScaler::new([0.0, 100.0, 100.0, 100.0], [0.01, 5.0, 2.5, 1.0]);
        let scaled = scaler.transform(&row());

        assert_eq!(scaled.date, row().date);
        assert!((scaled.values[0] - 2.0).abs() < 1e-12);
        assert!((scaled.values[1] - 2.0).abs() < 1e-12);
        assert!((scaled.values[2] - 2.0).abs() < 1e-12);
        assert!((scaled.values[3] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_scale_treated_as_one() {
        let scaler = StandardScaler::new([0.0; 4], [0.0, 1.0, 1.0, 1.0]);
        assert_eq!(scaler.scale()[0], 1.0);
        assert_eq!(scaler.transform(&row()).values[0], 0.02);
    }

    #[test]
    fn test_identity() {
        let scaled = StandardScaler::identity().transform(&row());
        assert_eq!(scaled.values, row().to_vector());
    }

    #[test]
    fn test_artifact_wrong_length_rejected() {
        let artifact = ScalerArtifact {
            feature_names: None,
            mean: vec![0.0; 3],
            scale: vec![1.0; 4],
        };
        let err = StandardScaler::from_artifact(artifact, &PathBuf::from("scaler.json"));
        assert!(matches!(err, Err(ModelStoreError::Shape { .. })));
    }

    #[test]
    fn test_artifact_feature_names_must_match() {
        let artifact = ScalerArtifact {
            feature_names: Some(vec![
                "MA_5".into(),
                "Return".into(),
                "MA_10".into(),
                "MA_20".into(),
            ]),
            mean: vec![0.0; 4],
            scale: vec![1.0; 4],
        };
        let err = StandardScaler::from_artifact(artifact, &PathBuf::from("scaler.json"));
        assert!(matches!(err, Err(ModelStoreError::Shape { .. })));
    }

    #[test]
    fn test_artifact_parses_from_json() {
        let json = r#"{
            "feature_names": ["Return", "MA_5", "MA_10", "MA_20"],
            "mean": [0.0005, 15000.0, 14990.0, 14950.0],
            "scale": [0.011, 4200.0, 4190.0, 4170.0]
        }"#;
        let artifact: ScalerArtifact = serde_json::from_str(json).unwrap();
        let scaler = StandardScaler::from_artifact(artifact, &PathBuf::from("scaler.json")).unwrap();
        assert_eq!(scaler.mean()[1], 15000.0);
    }
}
