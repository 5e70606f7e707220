// src/lib.rs

//! Timetable parser library.
//!
//! Turns the timetabling site's course metadata script and timetable pages
//! into courses, departments, levels and deduplicated sessions.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;

pub use services::{parse_course_document, parse_session_document};
pub use utils::calendar::{academic_year_string, estimated_term};
