// src/utils/calendar.rs

//! Academic year and term estimation.

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{AppError, Result};
use crate::models::{CalendarConfig, TermRange};

/// Month in which the academic year rolls over by default (July).
pub const YEAR_START_MONTH: u32 = 7;

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Academic year code used in upstream URLs, e.g. `"1819"` for 2018/19.
pub fn academic_year_string(date: impl Datelike) -> String {
    year_string(date, YEAR_START_MONTH)
}

/// Estimated term (1-3) for a date using the default term table.
pub fn estimated_term(date: impl Datelike) -> Result<u8> {
    term_for(date, &CalendarConfig::default().terms)
}

fn year_string(date: impl Datelike, start_month: u32) -> String {
    let start_year = if date.month() >= start_month {
        date.year()
    } else {
        date.year() - 1
    };
    format!(
        "{:02}{:02}",
        start_year.rem_euclid(100),
        (start_year + 1).rem_euclid(100)
    )
}

fn term_for(date: impl Datelike, ranges: &[TermRange]) -> Result<u8> {
    ranges
        .iter()
        .find(|range| range.contains(&date))
        .map(|range| range.term)
        .ok_or_else(|| {
            AppError::calendar(format!(
                "Unable to determine current term for {:02}-{:02}",
                date.month(),
                date.day()
            ))
        })
}

impl CalendarConfig {
    /// Academic year code using the configured start month.
    pub fn academic_year_string(&self, date: impl Datelike) -> String {
        year_string(date, self.year_start_month)
    }

    /// Estimated term using the configured ranges.
    pub fn estimated_term(&self, date: impl Datelike) -> Result<u8> {
        term_for(date, &self.terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_string() {
        assert_eq!(academic_year_string(date(2018, 1, 1)), "1718");
        assert_eq!(academic_year_string(date(2018, 6, 30)), "1718");
        assert_eq!(academic_year_string(date(2018, 7, 1)), "1819");
        assert_eq!(academic_year_string(date(2018, 8, 1)), "1819");
        assert_eq!(academic_year_string(date(2018, 12, 31)), "1819");
    }

    #[test]
    fn test_year_string_pads_and_wraps_century() {
        assert_eq!(academic_year_string(date(2009, 9, 1)), "0910");
        assert_eq!(academic_year_string(date(2099, 9, 1)), "9900");
        assert_eq!(academic_year_string(date(2100, 3, 1)), "9900");
    }

    #[test]
    fn test_year_string_with_configured_month() {
        let config = CalendarConfig {
            year_start_month: 6,
            ..CalendarConfig::default()
        };
        assert_eq!(config.academic_year_string(date(2018, 6, 1)), "1819");
    }

    #[test]
    fn test_estimated_term() {
        // Inside term 1
        assert_eq!(estimated_term(date(2018, 10, 20)).unwrap(), 1);
        assert_eq!(estimated_term(date(2018, 12, 31)).unwrap(), 1);
        assert_eq!(estimated_term(date(2019, 1, 24)).unwrap(), 1);

        // Between terms 1 and 2
        assert_eq!(estimated_term(date(2019, 1, 25)).unwrap(), 2);

        // Inside term 2
        assert_eq!(estimated_term(date(2019, 2, 4)).unwrap(), 2);

        // Between terms 2 and 3
        assert_eq!(estimated_term(date(2019, 6, 1)).unwrap(), 3);

        // Inside term 3
        assert_eq!(estimated_term(date(2019, 6, 10)).unwrap(), 3);
        assert_eq!(estimated_term(date(2019, 9, 30)).unwrap(), 3);
    }

    #[test]
    fn test_every_day_has_a_term() {
        let mut day = date(2020, 1, 1);
        while day.year() == 2020 {
            assert!(estimated_term(day).is_ok(), "no term for {day}");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_gap_in_table_is_an_error() {
        let config = CalendarConfig {
            terms: vec![TermRange::new(1, (10, 1), (12, 31))],
            ..CalendarConfig::default()
        };
        let err = config.estimated_term(date(2019, 3, 1)).unwrap_err();
        assert!(matches!(err, AppError::Calendar(_)));
    }
}
