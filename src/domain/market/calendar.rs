//! Business-day arithmetic.
//!
//! Weekends are skipped; exchange holidays are not known here, so the
//! result may fall on a day the market is closed.

use chrono::{Datelike, Days, NaiveDate, Weekday};

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The first weekday strictly after `date`.
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut next = date + Days::new(1);
    while !is_business_day(next) {
        next = next + Days::new(1);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_friday_rolls_to_monday() {
        // 2024-03-08 is a Friday
        assert_eq!(next_business_day(d("2024-03-08")), d("2024-03-11"));
    }

    #[test]
    fn test_midweek_is_next_calendar_day() {
        assert_eq!(next_business_day(d("2024-03-04")), d("2024-03-05")); // Mon
        assert_eq!(next_business_day(d("2024-03-05")), d("2024-03-06")); // Tue
        assert_eq!(next_business_day(d("2024-03-06")), d("2024-03-07")); // Wed
        assert_eq!(next_business_day(d("2024-03-07")), d("2024-03-08")); // Thu
    }

    #[test]
    fn test_weekend_rolls_to_monday() {
        assert_eq!(next_business_day(d("2024-03-09")), d("2024-03-11")); // Sat
        assert_eq!(next_business_day(d("2024-03-10")), d("2024-03-11")); // Sun
    }

    #[test]
    fn test_crosses_year_boundary() {
        // 2021-12-31 is a Friday
        assert_eq!(next_business_day(d("2021-12-31")), d("2022-01-03"));
    }

    #[test]
    fn test_holidays_are_not_skipped() {
        // 2024-12-24 (Tue) -> 2024-12-25 even though markets are closed
        assert_eq!(next_business_day(d("2024-12-24")), d("2024-12-25"));
    }
}
