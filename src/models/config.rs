//! Application configuration structures.

use std::fs;
use std::path::Path;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream timetable site settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Academic year and term estimation
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Timetable page parsing settings
    #[serde(default)]
    pub timetable: TimetableConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.user_agent.trim().is_empty() {
            return Err(AppError::validation("source.user_agent is empty"));
        }
        if self.source.timeout_secs == 0 {
            return Err(AppError::validation("source.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.source.base_url)?;

        if !(1..=12).contains(&self.calendar.year_start_month) {
            return Err(AppError::validation(
                "calendar.year_start_month must be between 1 and 12",
            ));
        }
        if self.calendar.terms.is_empty() {
            return Err(AppError::validation("No term ranges defined"));
        }
        for range in &self.calendar.terms {
            range.validate()?;
        }
        for term in 1..=3 {
            if self.calendar.term_weeks(term).is_none_or(|w| w.is_empty()) {
                return Err(AppError::validation(format!(
                    "No weeks defined for term {term}"
                )));
            }
        }

        if self.timetable.not_found_marker.is_empty() {
            return Err(AppError::validation("timetable.not_found_marker is empty"));
        }
        Ok(())
    }
}

/// Upstream site settings used by the fetch pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Root of the timetabling website
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Academic calendar settings.
///
/// Term boundaries are observed from past years rather than published
/// anywhere, so they live here instead of in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Month in which a new academic year starts
    #[serde(default = "defaults::year_start_month")]
    pub year_start_month: u32,

    /// Date ranges mapped to term numbers, inclusive on both ends
    #[serde(default = "defaults::term_ranges")]
    pub terms: Vec<TermRange>,

    /// Upstream week numbers requested for each term
    #[serde(default = "defaults::term_weeks")]
    pub weeks: Vec<TermWeeks>,
}

impl CalendarConfig {
    /// Week numbers configured for a term.
    pub fn term_weeks(&self, term: u8) -> Option<&[u32]> {
        self.weeks
            .iter()
            .find(|w| w.term == term)
            .map(|w| w.weeks.as_slice())
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            year_start_month: defaults::year_start_month(),
            terms: defaults::term_ranges(),
            weeks: defaults::term_weeks(),
        }
    }
}

/// A `month/day` to `month/day` range belonging to one term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRange {
    pub term: u8,
    pub start_month: u32,
    pub start_day: u32,
    pub end_month: u32,
    pub end_day: u32,
}

impl TermRange {
    pub const fn new(term: u8, start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            term,
            start_month: start.0,
            start_day: start.1,
            end_month: end.0,
            end_day: end.1,
        }
    }

    /// Whether the date's month and day fall inside this range.
    pub fn contains(&self, date: &impl Datelike) -> bool {
        let key = (date.month(), date.day());
        (self.start_month, self.start_day) <= key && key <= (self.end_month, self.end_day)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=3).contains(&self.term) {
            return Err(AppError::validation(format!(
                "term {} is out of range (1-3)",
                self.term
            )));
        }
        let valid_day = |month: u32, day: u32| {
            // 2000 is a leap year, so 29 February is accepted
            chrono::NaiveDate::from_ymd_opt(2000, month, day).is_some()
        };
        if !valid_day(self.start_month, self.start_day) || !valid_day(self.end_month, self.end_day)
        {
            return Err(AppError::validation(format!(
                "term {} has an invalid date",
                self.term
            )));
        }
        if (self.start_month, self.start_day) > (self.end_month, self.end_day) {
            return Err(AppError::validation(format!(
                "term {} range ends before it starts",
                self.term
            )));
        }
        Ok(())
    }
}

/// Week numbers requested from the upstream site for a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermWeeks {
    pub term: u8,
    pub weeks: Vec<u32>,
}

/// Timetable page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableConfig {
    /// Body text the site returns (with HTTP 200) for unknown courses
    #[serde(default = "defaults::not_found_marker")]
    pub not_found_marker: String,

    /// CSS selector for the per-day tables
    #[serde(default = "defaults::table_selector")]
    pub table_selector: String,

    /// CSS selector for the course display name in the page header
    #[serde(default = "defaults::course_name_selector")]
    pub course_name_selector: String,

    /// CSS selector for the week/date range in the page header
    #[serde(default = "defaults::date_range_selector")]
    pub date_range_selector: String,

    /// Weekday range form value
    #[serde(default = "defaults::weekdays")]
    pub weekdays: String,

    /// Period range form value
    #[serde(default = "defaults::periods")]
    pub periods: String,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            not_found_marker: defaults::not_found_marker(),
            table_selector: defaults::table_selector(),
            course_name_selector: defaults::course_name_selector(),
            date_range_selector: defaults::date_range_selector(),
            weekdays: defaults::weekdays(),
            periods: defaults::periods(),
        }
    }
}

mod defaults {
    use super::{TermRange, TermWeeks};

    // Source defaults
    pub fn base_url() -> String {
        "https://timetable.beds.ac.uk/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; timetable-parser/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Calendar defaults
    pub fn year_start_month() -> u32 {
        7
    }
    pub fn term_ranges() -> Vec<TermRange> {
        vec![
            TermRange::new(1, (10, 1), (12, 31)),
            TermRange::new(1, (1, 1), (1, 24)),
            TermRange::new(2, (1, 25), (5, 31)),
            TermRange::new(3, (6, 1), (9, 30)),
        ]
    }
    pub fn term_weeks() -> Vec<TermWeeks> {
        vec![
            TermWeeks {
                term: 1,
                weeks: (6..=16).chain(20..=23).collect(),
            },
            TermWeeks {
                term: 2,
                weeks: (24..=33).chain(37..=41).collect(),
            },
            TermWeeks {
                term: 3,
                weeks: (42..=49).chain(51..=54).collect(),
            },
        ]
    }

    // Timetable defaults
    pub fn not_found_marker() -> String {
        "No Such Page".into()
    }
    pub fn table_selector() -> String {
        "table.spreadsheet".into()
    }
    pub fn course_name_selector() -> String {
        "span.header-0-0-1".into()
    }
    pub fn date_range_selector() -> String {
        "span.header-0-2-0".into()
    }
    pub fn weekdays() -> String {
        "1-7".into()
    }
    pub fn periods() -> String {
        "1-34".into()
    }
}
