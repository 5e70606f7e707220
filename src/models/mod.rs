// src/models/mod.rs

//! Domain models for the timetable parser.
//!
//! Entities produced by the parsers, their response envelopes, and the
//! application configuration.

mod config;
mod course;
mod department;
mod level;
mod response;
mod session;

// Re-export all public types
pub use config::{CalendarConfig, Config, SourceConfig, TermRange, TermWeeks, TimetableConfig};
pub use course::Course;
pub use department::Department;
pub use level::Level;
pub use response::{CoursesResponse, SessionsResponse};
pub use session::{DAY_NAMES, Session};
