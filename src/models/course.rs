//! Course data structure.

use serde::{Serialize, Serializer};

use crate::models::Department;
use crate::utils::text::split_outside_brackets;

/// A programme of study offered by a department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Opaque site-specific course code
    pub id: String,

    /// Full display name
    pub name: String,

    /// Level name, e.g. "Undergraduate Year 1"
    pub level: String,

    /// Identifier of the owning department
    pub department_id: String,

    /// Owning department, resolved after parsing
    pub department: Option<Department>,
}

impl Course {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        level: impl Into<String>,
        department_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level: level.into(),
            department_id: department_id.into(),
            department: None,
        }
    }

    /// Name split on `-` separators that are not inside parentheses.
    ///
    /// Always returns at least one chunk.
    pub fn name_chunks(&self) -> Vec<&str> {
        let chunks = split_outside_brackets(&self.name, '-');
        if chunks.is_empty() {
            vec![self.name.as_str()]
        } else {
            chunks
        }
    }

    /// Course title without qualification details.
    ///
    /// `"Computer Science - BSc (Hons) - Ltn - Year 1 Oct FT"` gives
    /// `"Computer Science"`.
    pub fn name_start(&self) -> &str {
        self.name_chunks()[0]
    }

    /// Everything after the course title, joined with `" - "`.
    pub fn name_end(&self) -> String {
        self.name_chunks()[1..].join(" - ")
    }
}

#[derive(Serialize)]
struct CourseRecord<'a> {
    id: &'a str,
    name: &'a str,
    name_start: &'a str,
    name_end: String,
    level: &'a str,
    department: Option<&'a Department>,
}

impl Serialize for Course {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CourseRecord {
            id: &self.id,
            name: &self.name,
            name_start: self.name_start(),
            name_end: self.name_end(),
            level: &self.level,
            department: self.department.as_ref(),
        }
        .serialize(serializer)
    }
}
