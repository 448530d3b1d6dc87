//! Price series → feature matrix.
//!
//! Computes the one-day return and the 5/10/20-day simple moving averages of
//! the close, then keeps only the dates where every feature is defined.

use crate::domain::market::PriceSeries;
use crate::domain::ml::feature_registry::MA_WINDOWS;
use crate::domain::ml::{FeatureMatrix, FeatureRow, REQUIRED_HISTORY};
use ta::Next;
use ta::indicators::SimpleMovingAverage;
use tracing::debug;

/// One-day percentage change. `None` for the first value and wherever the
/// previous close is zero or the result is not finite.
pub fn percent_change(closes: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return out;
    }

    out.push(None);
    for pair in closes.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        let ret = if prev == 0.0 {
            None
        } else {
            Some((curr - prev) / prev).filter(|r| r.is_finite())
        };
        out.push(ret);
    }
    out
}

/// Trailing simple moving average; `None` until `window` values have been seen.
pub fn moving_average(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let Ok(mut sma) = SimpleMovingAverage::new(window) else {
        return vec![None; closes.len()];
    };

    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let value = sma.next(close);
            (i + 1 >= window).then_some(value)
        })
        .collect()
}

/// Builds the feature matrix for `series`.
///
/// Rows start at the 21st record (20 prior days seed `MA_20` and the return);
/// a shorter series yields an empty matrix.
pub fn build_feature_matrix(series: &PriceSeries) -> FeatureMatrix {
    let closes = series.closes();
    let returns = percent_change(&closes);
    let [ma_5, ma_10, ma_20] = MA_WINDOWS.map(|w| moving_average(&closes, w));

    let rows: Vec<FeatureRow> = series
        .bars()
        .iter()
        .enumerate()
        .skip(REQUIRED_HISTORY - 1)
        .filter_map(|(t, bar)| {
            Some(FeatureRow {
                date: bar.date,
                ret: returns[t]?,
                ma_5: ma_5[t]?,
                ma_10: ma_10[t]?,
                ma_20: ma_20[t]?,
            })
        })
        .filter(|row| row.to_vector().iter().all(|v| v.is_finite()))
        .collect();

    debug!(
        "FeaturePipeline: {} records for {} -> {} feature rows",
        series.len(),
        series.symbol(),
        rows.len()
    );

    FeatureMatrix::new(rows)
}
