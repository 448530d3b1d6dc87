use crate::domain::ml::{FEATURE_COUNT, ScaledFeatureRow};
use crate::domain::ports::RegressionModel;
use serde::Deserialize;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::LinearRegression;
use smartcore::linear::ridge_regression::RidgeRegression;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;
type Ols = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;
type Ridge = RidgeRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Exported weights of an externally trained linear regressor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearCoefficients {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// A model file: `{"kind": "...", "model": {...}}`.
#[derive(Deserialize)]
#[serde(tag = "kind", content = "model", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearCoefficients),
    SmartcoreLinear(Ols),
    SmartcoreRidge(Ridge),
    SmartcoreRandomForest(Forest),
}

impl ModelArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::Linear(_) => "linear",
            ModelArtifact::SmartcoreLinear(_) => "smartcore_linear",
            ModelArtifact::SmartcoreRidge(_) => "smartcore_ridge",
            ModelArtifact::SmartcoreRandomForest(_) => "smartcore_random_forest",
        }
    }

    /// Shape problems detectable before inference.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ModelArtifact::Linear(lin) => {
                if lin.coefficients.len() != FEATURE_COUNT {
                    return Err(format!(
                        "expected {} coefficients, found {}",
                        FEATURE_COUNT,
                        lin.coefficients.len()
                    ));
                }
                if !lin.intercept.is_finite() || lin.coefficients.iter().any(|c| !c.is_finite()) {
                    return Err("non-finite coefficient".to_string());
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// A deserialized model artifact behind the `RegressionModel` interface.
pub struct SmartCorePredictor {
    name: String,
    artifact: ModelArtifact,
}

impl SmartCorePredictor {
    pub fn new(name: impl Into<String>, artifact: ModelArtifact) -> Self {
        Self {
            name: name.into(),
            artifact,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.artifact.kind()
    }

    fn run_smartcore<F>(&self, features: &ScaledFeatureRow, predict: F) -> Result<f64, String>
    where
        F: FnOnce(&DenseMatrix<f64>) -> Result<Vec<f64>, smartcore::error::Failed>,
    {
        let input_matrix = DenseMatrix::from_2d_vec(&vec![features.values.to_vec()])
            .map_err(|e| format!("Matrix creation failed: {}", e))?;

        let predictions = predict(&input_matrix).map_err(|e| format!("Prediction failed: {}", e))?;
        predictions
            .first()
            .copied()
            .ok_or_else(|| "No prediction returned".to_string())
    }
}

impl RegressionModel for SmartCorePredictor {
    fn predict(&self, features: &ScaledFeatureRow) -> Result<f64, String> {
        match &self.artifact {
            ModelArtifact::Linear(lin) => {
                if lin.coefficients.len() != features.values.len() {
                    return Err(format!(
                        "coefficient count {} does not match feature count {}",
                        lin.coefficients.len(),
                        features.values.len()
                    ));
                }
                Ok(lin
                    .coefficients
                    .iter()
                    .zip(features.values.iter())
                    .map(|(c, x)| c * x)
                    .sum::<f64>()
                    + lin.intercept)
            }
            ModelArtifact::SmartcoreLinear(model) => self.run_smartcore(features, |m| model.predict(m)),
            ModelArtifact::SmartcoreRidge(model) => self.run_smartcore(features, |m| model.predict(m)),
            ModelArtifact::SmartcoreRandomForest(model) => {
                self.run_smartcore(features, |m| model.predict(m))
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use smartcore::linear::linear_regression::LinearRegressionParameters;

    fn scaled(values: [f64; 4]) -> ScaledFeatureRow {
        ScaledFeatureRow {
            date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            values,
        }
    }

    #[test]
    fn test_linear_artifact_from_json() {
        let json = r#"{"kind": "linear", "model": {"coefficients": [1.0, 2.0, 0.0, -1.0], "intercept": 10.0}}"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.kind(), "linear");
        assert!(artifact.validate().is_ok());

        let model = SmartCorePredictor::new("close", artifact);
        let y = model.predict(&scaled([1.0, 1.0, 5.0, 2.0])).unwrap();
        assert!((y - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_artifact_wrong_shape() {
        let artifact = ModelArtifact::Linear(LinearCoefficients {
            coefficients: vec![1.0, 2.0],
            intercept: 0.0,
        });
        assert!(artifact.validate().is_err());

        let model = SmartCorePredictor::new("open", artifact);
        assert!(model.predict(&scaled([0.0; 4])).is_err());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"kind": "xgboost", "model": {}}"#;
        assert!(serde_json::from_str::<ModelArtifact>(json).is_err());
    }

    #[test]
    fn test_smartcore_linear_round_trip() {
        // y = 2*x0 + x3 + 1
        let x: Vec<Vec<f64>> = (0..12)
            .map(|i| {
                let f = i as f64;
                vec![f, (f * 7.0) % 5.0, (f * 3.0) % 4.0, f * f * 0.1]
            })
            .collect();
        let y: Vec<f64> = x.iter().map(|r| 2.0 * r[0] + r[3] + 1.0).collect();
        let xm = DenseMatrix::from_2d_vec(&x).unwrap();
        let fitted = LinearRegression::fit(&xm, &y, LinearRegressionParameters::default()).unwrap();

        let json = format!(
            r#"{{"kind": "smartcore_linear", "model": {}}}"#,
            serde_json::to_string(&fitted).unwrap()
        );
        let artifact: ModelArtifact = serde_json::from_str(&json).unwrap();
        let model = SmartCorePredictor::new("high", artifact);

        let y_hat = model.predict(&scaled([3.0, 1.0, 1.0, 0.9])).unwrap();
        assert!((y_hat - 7.9).abs() < 1e-6);
    }
}
