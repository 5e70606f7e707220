// src/pipeline/query.rs

//! Upstream request building.
//!
//! Timetables live under a per-year path (`sws1819/`), and the timetable
//! form selects a department, level, course and the week numbers of one
//! term.

use chrono::Datelike;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::Config;

const TIMETABLE_PAGE: &str = "showtimetable.asp";
const METADATA_SCRIPT: &str = "js/data_autogen.js";

/// The department/course/level triple identifying a course timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionQuery {
    pub department: String,
    pub course: String,
    pub level: String,
}

impl SessionQuery {
    pub fn new(
        department: impl Into<String>,
        course: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        Self {
            department: department.into(),
            course: course.into(),
            level: level.into(),
        }
    }

    /// Form fields for the timetable page, requesting the weeks of `term`.
    pub fn form_params(&self, config: &Config, term: u8) -> Result<Vec<(&'static str, String)>> {
        if self.course.trim().is_empty() {
            return Err(AppError::course_not_found("Invalid course details"));
        }

        let weeks = config
            .calendar
            .term_weeks(term)
            .ok_or_else(|| AppError::config(format!("No weeks configured for term {term}")))?
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(";");

        Ok(vec![
            ("ObjectClass", "programme of study".into()),
            ("ObjectClassIdentifier", "lbxPos".into()),
            ("idtype", "id".into()),
            ("ddlDepartments", self.department.clone()),
            ("ddlPosGroup", self.level.clone()),
            ("lbxPos", self.course.clone()),
            ("lbxWeeks", weeks),
            ("ddlWeekdays", config.timetable.weekdays.clone()),
            ("ddlPeriods", config.timetable.periods.clone()),
            ("lstStyle", "textspreadsheet".into()),
            ("btnShowTimetable", "View Timetable".into()),
        ])
    }
}

/// Root of the timetabling site for the academic year containing `date`.
fn year_root(config: &Config, date: impl Datelike) -> Result<Url> {
    let mut base = Url::parse(&config.source.base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let year = config.calendar.academic_year_string(date);
    Ok(base.join(&format!("sws{year}/"))?)
}

/// Timetable page URL for the academic year containing `date`.
pub fn timetable_url(config: &Config, date: impl Datelike) -> Result<Url> {
    Ok(year_root(config, date)?.join(TIMETABLE_PAGE)?)
}

/// Course metadata script URL for the academic year containing `date`.
pub fn metadata_url(config: &Config, date: impl Datelike) -> Result<Url> {
    Ok(year_root(config, date)?.join(METADATA_SCRIPT)?)
}
