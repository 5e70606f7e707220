//! Response envelopes returned by the parsers.

use serde::Serialize;

use crate::models::{Course, Department, Level, Session};

/// Parsed contents of the course metadata file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoursesResponse {
    pub courses: Vec<Course>,
    pub departments: Vec<Department>,
    pub levels: Vec<Level>,
}

impl CoursesResponse {
    /// Look up a course by id.
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Look up a department by id.
    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }
}

/// Parsed contents of a course timetable page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionsResponse {
    /// Page the sessions were read from, when fetched
    pub timetable_url: Option<String>,

    /// Course display name from the page header
    pub course_name: Option<String>,

    /// Week/date range from the page header
    pub date_range: Option<String>,

    /// Term the request was built for, when fetched
    pub estimated_term: Option<u8>,

    pub sessions: Vec<Session>,
}

impl SessionsResponse {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self {
            sessions,
            ..Self::default()
        }
    }

    /// Sessions taking place on the given day (0 = Monday).
    pub fn sessions_on(&self, day: u8) -> impl Iterator<Item = &Session> {
        self.sessions.iter().filter(move |s| s.day == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_response_keys() {
        let response = SessionsResponse::new(Vec::new());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "timetable_url": null,
                "course_name": null,
                "date_range": null,
                "estimated_term": null,
                "sessions": [],
            })
        );
    }
}
