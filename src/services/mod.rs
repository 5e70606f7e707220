//! Service layer for the timetable parser.
//!
//! This module contains the parsing logic for:
//! - Course metadata scripts (`parse_course_document`)
//! - Course timetable pages (`SessionParser`)
//! - Merging of per-room session rows (`SessionMerger`)

mod courses;
mod merge;
mod sessions;

pub use courses::parse_course_document;
pub use merge::{SessionMerger, merge_sessions};
pub use sessions::{SessionParser, parse_session_document};
