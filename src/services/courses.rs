// src/services/courses.rs

//! Course metadata parser.
//!
//! The timetable site publishes its course list as a generated script that
//! fills three arrays, one constructor call per line:
//!
//! ```text
//! deptarray[i++] = new dept("Name", "Name", "CM010");
//! posarray[i++] = new pos("Short", "Full name", "ID", "CM010", "Level");
//! posgrouparray[i++] = new posgroup("Level");
//! ```
//!
//! Only those lines are read; everything else in the script is ignored.

use std::collections::{HashMap, HashSet};

use crate::error::{AppError, Result};
use crate::models::{Course, CoursesResponse, Department, Level};
use crate::utils::text::{cmp_ignore_case, csv_record, decode_lossy};

const DEPARTMENT_MARKER: &str = "deptarray[i++] = new dept";
const COURSE_MARKER: &str = "posarray[i++] = new pos";
const LEVEL_MARKER: &str = "posgrouparray[i++] = new posgroup";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Department,
    Course,
    Level,
}

impl LineKind {
    fn classify(line: &str) -> Option<Self> {
        if line.contains(LEVEL_MARKER) {
            Some(Self::Level)
        } else if line.contains(COURSE_MARKER) {
            Some(Self::Course)
        } else if line.contains(DEPARTMENT_MARKER) {
            Some(Self::Department)
        } else {
            None
        }
    }

    /// Fields a line of this kind must carry.
    fn min_fields(self) -> usize {
        match self {
            Self::Department => 3,
            Self::Course => 5,
            Self::Level => 1,
        }
    }
}

/// Parse the course metadata script.
///
/// Courses are linked to their departments, departments carry the number of
/// courses pointing at them, and all three lists are sorted by name.
/// Fails with [`AppError::NoData`] when no department or no course is found.
pub fn parse_course_document(source: impl AsRef<[u8]>) -> Result<CoursesResponse> {
    let text = decode_lossy(source.as_ref());

    let mut departments: Vec<Department> = Vec::new();
    let mut courses: Vec<Course> = Vec::new();
    let mut levels: Vec<Level> = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let Some(kind) = LineKind::classify(line) else {
            continue;
        };
        let Some(args) = call_arguments(line) else {
            log::warn!("Line {}: no argument list, skipping", number + 1);
            continue;
        };
        let fields = match csv_record(args) {
            Ok(fields) => fields,
            Err(e) => {
                log::warn!("Line {}: unreadable arguments: {e}", number + 1);
                continue;
            }
        };
        if fields.len() < kind.min_fields() {
            log::warn!(
                "Line {}: expected {} fields, found {}",
                number + 1,
                kind.min_fields(),
                fields.len()
            );
            continue;
        }

        match kind {
            LineKind::Department => departments.push(Department::new(&fields[2], &fields[0])),
            LineKind::Course => {
                if fields[1].is_empty() {
                    log::debug!("Line {}: course {} has no name", number + 1, fields[2]);
                    continue;
                }
                courses.push(Course::new(&fields[2], &fields[1], &fields[4], &fields[3]));
            }
            LineKind::Level => levels.push(Level::new(&fields[0])),
        }
    }

    dedupe_by(&mut departments, |d| d.id.clone());
    dedupe_by(&mut courses, |c| c.id.clone());
    dedupe_by(&mut levels, |l| l.name.clone());

    if departments.is_empty() || courses.is_empty() {
        return Err(AppError::no_data("No data returned"));
    }

    link_departments(&mut departments, &mut courses);

    departments.sort_by(|a, b| cmp_ignore_case(&a.name, &b.name));
    courses.sort_by(|a, b| cmp_ignore_case(&a.name, &b.name));
    levels.sort_by(|a, b| cmp_ignore_case(&a.name, &b.name));

    log::info!(
        "Parsed {} courses, {} departments, {} levels",
        courses.len(),
        departments.len(),
        levels.len()
    );

    Ok(CoursesResponse {
        courses,
        departments,
        levels,
    })
}

/// Text between the first `(` and the last `)` of a line.
fn call_arguments(line: &str) -> Option<&str> {
    let open = line.find('(')?;
    let close = line.rfind(')')?;
    (open < close).then(|| &line[open + 1..close])
}

/// Keep the first item for each key.
fn dedupe_by<T>(items: &mut Vec<T>, key: impl Fn(&T) -> String) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(key(item)));
}

/// Count courses per department and attach each course's department.
///
/// Courses naming an unknown department are kept without one.
fn link_departments(departments: &mut [Department], courses: &mut [Course]) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for course in courses.iter() {
        *counts.entry(course.department_id.as_str()).or_default() += 1;
    }
    for department in departments.iter_mut() {
        department.course_count = counts.get(department.id.as_str()).copied().unwrap_or(0);
    }

    for course in courses.iter_mut() {
        course.department = departments
            .iter()
            .find(|d| d.id == course.department_id)
            .cloned();
        if course.department.is_none() {
            log::debug!(
                "Course {} refers to unknown department {}",
                course.id,
                course.department_id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
function initDepartments() {
    deptarray[i++] = new dept("Zoology", "Zoology", "Z1");
    deptarray[i++] = new dept("art", "art", "A1");
}
function initPOS() {
    posarray[i++] = new pos("Z", "Zoology - BSc", "ZOO/1", "Z1", "Year 1");
    posarray[i++] = new pos("A", "Art (Fine, Applied) - BA", "ART/1", "A1", "Year 1");
    posarray[i++] = new pos("B", "Biology - BSc", "BIO/1", "X9", "Year 2");
}
function initPOSGroup() {
    posgrouparray[i++] = new posgroup("Year 2");
    posgrouparray[i++] = new posgroup("Year 1");
}
"#;

    #[test]
    fn test_classify_lines() {
        assert_eq!(
            LineKind::classify(r#"posgrouparray[i++] = new posgroup("A");"#),
            Some(LineKind::Level)
        );
        assert_eq!(
            LineKind::classify(r#"posarray[i++] = new pos("A");"#),
            Some(LineKind::Course)
        );
        assert_eq!(LineKind::classify("deptarray.sort(NameOrder);"), None);
    }

    #[test]
    fn test_call_arguments() {
        assert_eq!(call_arguments(r#"new dept("a (b)", "c");"#), Some(r#""a (b)", "c""#));
        assert_eq!(call_arguments("no call"), None);
        assert_eq!(call_arguments(") backwards ("), None);
    }

    #[test]
    fn test_parse_sorts_case_insensitively() {
        let response = parse_course_document(SCRIPT).unwrap();
        let names: Vec<_> = response.departments.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["art", "Zoology"]);

        let ids: Vec<_> = response.courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["ART/1", "BIO/1", "ZOO/1"]);

        let levels: Vec<_> = response.levels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(levels, vec!["Year 1", "Year 2"]);
    }

    #[test]
    fn test_quoted_commas_survive() {
        let response = parse_course_document(SCRIPT).unwrap();
        let art = response.course("ART/1").unwrap();
        assert_eq!(art.name, "Art (Fine, Applied) - BA");
        assert_eq!(art.name_start(), "Art (Fine, Applied)");
    }

    #[test]
    fn test_unknown_department_is_left_unlinked() {
        let response = parse_course_document(SCRIPT).unwrap();
        assert!(response.course("BIO/1").unwrap().department.is_none());
        assert_eq!(response.department("Z1").unwrap().course_count, 1);
        assert_eq!(
            response.course("ZOO/1").unwrap().department.as_ref().map(|d| d.course_count),
            Some(1)
        );
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let script = r#"
deptarray[i++] = new dept("First", "First", "D1");
deptarray[i++] = new dept("Second", "Second", "D1");
posarray[i++] = new pos("C", "Course", "C1", "D1", "L");
posarray[i++] = new pos("C", "Course again", "C1", "D1", "L");
"#;
        let response = parse_course_document(script).unwrap();
        assert_eq!(response.departments.len(), 1);
        assert_eq!(response.departments[0].name, "First");
        assert_eq!(response.departments[0].course_count, 1);
        assert_eq!(response.courses.len(), 1);
        assert_eq!(response.courses[0].name, "Course");
    }

    #[test]
    fn test_short_and_nameless_lines_are_skipped() {
        let script = r#"
deptarray[i++] = new dept("D", "D", "D1");
posarray[i++] = new pos("C", "", "C0", "D1", "L");
posarray[i++] = new pos("C", "Short");
posarray[i++] = new pos("C", "Course", "C1", "D1", "L");
"#;
        let response = parse_course_document(script).unwrap();
        assert_eq!(response.courses.len(), 1);
        assert_eq!(response.courses[0].id, "C1");
        assert!(response.levels.is_empty());
    }

    #[test]
    fn test_no_courses_is_no_data() {
        let script = r#"deptarray[i++] = new dept("D", "D", "D1");"#;
        let err = parse_course_document(script).unwrap_err();
        assert!(matches!(err, AppError::NoData(_)));
        assert_eq!(err.to_string(), "No data returned");
    }

    #[test]
    fn test_escaped_quotes_in_course_name() {
        let script = r#"
deptarray[i++] = new dept("Media", "Media", "D1");
posarray[i++] = new pos("M", "Media \"Live\" Production - BA", "MED/1", "D1", "L");
posarray[i++] = new pos("A", "Animation - BA", "ANI/1", "D1", "L");
"#;
        let response = parse_course_document(script).unwrap();
        let course = response.course("MED/1").unwrap();
        assert_eq!(course.name, r#"Media "Live" Production - BA"#);
        assert_eq!(course.name_start(), r#"Media "Live" Production"#);
        assert_eq!(course.name_end(), "BA");
        assert_eq!(course.level, "L");

        let ids: Vec<_> = response.courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["ANI/1", "MED/1"]);
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let mut script = b"deptarray[i++] = new dept(\"Caf\xe9\", \"Caf\xe9\", \"D1\");\n".to_vec();
        script.extend_from_slice(br#"posarray[i++] = new pos("C", "Course", "C1", "D1", "L");"#);
        let response = parse_course_document(script).unwrap();
        assert_eq!(response.departments[0].name, "Caf");
    }
}
