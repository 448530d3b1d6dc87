//! Plain-text rendering of a forecast report for terminals and logs.

use crate::domain::forecast::{ForecastReport, OhlcTarget};
use std::fmt::Write;

pub fn render_prediction(report: &ForecastReport) -> String {
    let mut out = String::new();
    let p = &report.prediction;
    let _ = writeln!(out, "Predicted OHLC for {} ({})", p.date, report.symbol);
    for target in OhlcTarget::ALL {
        let _ = writeln!(out, "  {:<6} {:>12.2}", target.to_string(), p.value(target));
    }
    out
}

pub fn render_recent_table(report: &ForecastReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>11} {:>11} {:>11} {:>11} {:>13} {:>9} {:>11} {:>11} {:>11}",
        "Date", "Open", "High", "Low", "Close", "Volume", "Return", "MA_5", "MA_10", "MA_20"
    );
    for r in &report.recent {
        let _ = writeln!(
            out,
            "{:<10} {:>11.2} {:>11.2} {:>11.2} {:>11.2} {:>13} {:>8.3}% {:>11.2} {:>11.2} {:>11.2}",
            r.date.to_string(),
            r.open,
            r.high,
            r.low,
            r.close,
            r.volume.round().to_string(),
            r.ret * 100.0,
            r.ma_5,
            r.ma_10,
            r.ma_20
        );
    }
    out
}

pub fn render_report(report: &ForecastReport) -> String {
    format!(
        "{}\nRecent market data used ({} of {} feature rows, {} records since history start)\n{}",
        render_prediction(report),
        report.recent.len(),
        report.feature_rows,
        report.history_records,
        render_recent_table(report)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::{Prediction, RecentRecord};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn report() -> ForecastReport {
        let date = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        ForecastReport {
            symbol: "^NSEI".to_string(),
            last_trading_date: date,
            history_records: 2300,
            feature_rows: 2279,
            prediction: Prediction {
                date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
                open: 22500.123,
                high: 22600.0,
                low: 22400.5,
                close: 22550.0,
            },
            recent: vec![RecentRecord {
                date,
                open: dec!(22450.00),
                high: dec!(22525.00),
                low: dec!(22440.00),
                close: dec!(22493.55),
                volume: dec!(312400),
                ret: 0.0012,
                ma_5: 22410.0,
                ma_10: 22300.0,
                ma_20: 22150.0,
            }],
        }
    }

    #[test]
    fn test_prediction_uses_two_decimals() {
        let text = render_prediction(&report());
        assert!(text.contains("Predicted OHLC for 2024-03-11"));
        assert!(text.contains("22500.12"));
        assert!(text.contains("Close"));
    }

    #[test]
    fn test_recent_table_has_header_and_rows() {
        let text = render_recent_table(&report());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("MA_20"));
        assert!(lines[1].starts_with("2024-03-08"));
        assert!(lines[1].contains("0.120%"));
    }
}
