//! Request building and fetch entry points.
//!
//! - `query`: upstream URLs and timetable form fields
//! - `fetch`: download and parse course metadata or a timetable

#[cfg(feature = "fetch")]
pub mod fetch;
pub mod query;

#[cfg(feature = "fetch")]
pub use fetch::{fetch_courses, fetch_sessions};
pub use query::{SessionQuery, metadata_url, timetable_url};
