use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered list of feature names.
/// This order MUST match the column order the scaler and models were trained with.
/// Any change here is a breaking change for model artifacts.
pub const FEATURE_NAMES: &[&str] = &["Return", "MA_5", "MA_10", "MA_20"];

pub const FEATURE_COUNT: usize = 4;

/// Moving-average windows, in trading days, matching `MA_5`, `MA_10`, `MA_20`.
pub const MA_WINDOWS: [usize; 3] = [5, 10, 20];

/// Records needed before the first complete row: the longest window's
/// 20 prior days plus the row's own day.
pub const REQUIRED_HISTORY: usize = 21;

/// Unscaled features for one trading date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub date: NaiveDate,
    #[serde(rename = "Return")]
    pub ret: f64,
    #[serde(rename = "MA_5")]
    pub ma_5: f64,
    #[serde(rename = "MA_10")]
    pub ma_10: f64,
    #[serde(rename = "MA_20")]
    pub ma_20: f64,
}

impl FeatureRow {
    /// Values in `FEATURE_NAMES` order.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [self.ret, self.ma_5, self.ma_10, self.ma_20]
    }
}

/// Fully populated feature rows in chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<FeatureRow>,
}

impl FeatureMatrix {
    pub fn new(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// An empty matrix means the series was too short to seed every window.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&FeatureRow> {
        self.rows.last()
    }

    /// The most recent `n` rows, oldest first.
    pub fn tail(&self, n: usize) -> &[FeatureRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }
}

/// Features after normalization, ready for a regression model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledFeatureRow {
    pub date: NaiveDate,
    pub values: [f64; FEATURE_COUNT],
}

pub type ScaledFeatureMatrix = Vec<ScaledFeatureRow>;

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32, ret: f64) -> FeatureRow {
        FeatureRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            ret,
            ma_5: 1.0,
            ma_10: 2.0,
            ma_20: 3.0,
        }
    }

    #[test]
    fn test_feature_vector_length() {
        assert_eq!(row(2, 0.0).to_vector().len(), FEATURE_NAMES.len());
        assert_eq!(FEATURE_COUNT, FEATURE_NAMES.len());
    }

    #[test]
    fn test_feature_vector_order() {
        let v = row(2, 0.25).to_vector();
        // Return is index 0
        assert_eq!(v[0], 0.25);
        // MA_20 is last index
        assert_eq!(v[3], 3.0);
    }

    #[test]
    fn test_required_history_covers_longest_window() {
        assert_eq!(REQUIRED_HISTORY, MA_WINDOWS[2] + 1);
    }

    #[test]
    fn test_tail() {
        let matrix = FeatureMatrix::new(vec![row(2, 0.1), row(3, 0.2), row(4, 0.3)]);
        assert_eq!(matrix.tail(2).len(), 2);
        assert_eq!(matrix.tail(2)[0].ret, 0.2);
        assert_eq!(matrix.tail(10).len(), 3);
        assert!(FeatureMatrix::default().tail(5).is_empty());
    }
}
