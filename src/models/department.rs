//! Department data structure.

use serde::Serialize;

/// An academic unit owning a set of courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    /// Department unique identifier
    pub id: String,

    /// Department display name
    pub name: String,

    /// Number of parsed courses linked to this department
    pub course_count: usize,
}

impl Department {
    /// Create a department with no linked courses yet.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            course_count: 0,
        }
    }
}
