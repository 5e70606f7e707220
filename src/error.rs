// src/error.rs

//! Unified error handling for the timetable parser.

use std::fmt;

use thiserror::Error;

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// The upstream site answered with its "no such page" body
    #[error("{0}")]
    CourseNotFound(String),

    /// The metadata file yielded no departments or courses
    #[error("{0}")]
    NoData(String),

    /// A date fell outside every configured term range
    #[error("Calendar error: {0}")]
    Calendar(String),

    /// Equality check against a value that is not a session
    #[error("Cannot compare session with {0}")]
    IncomparableType(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[cfg(feature = "fetch")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV record parsing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a course-not-found error.
    pub fn course_not_found(message: impl Into<String>) -> Self {
        Self::CourseNotFound(message.into())
    }

    /// Create a no-data error.
    pub fn no_data(message: impl Into<String>) -> Self {
        Self::NoData(message.into())
    }

    /// Create a calendar error.
    pub fn calendar(message: impl Into<String>) -> Self {
        Self::Calendar(message.into())
    }

    /// Create an incomparable-type error.
    pub fn incomparable(what: impl fmt::Display) -> Self {
        Self::IncomparableType(what.to_string())
    }

    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Stable identifier reported to API consumers.
    pub fn id(&self) -> &'static str {
        match self {
            Self::CourseNotFound(_) => "course_invalid",
            Self::NoData(_) => "server_response_invalid",
            Self::Calendar(_) => "calendar",
            Self::IncomparableType(_) => "incomparable_type",
            #[cfg(feature = "fetch")]
            Self::Http(_) => "server_communication",
            _ => "unexpected",
        }
    }

    /// Suggested HTTP status for a surrounding API layer.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::CourseNotFound(_) => 404,
            Self::NoData(_) => 502,
            #[cfg(feature = "fetch")]
            Self::Http(_) => 502,
            _ => 500,
        }
    }

    /// Whether the error comes from parsing upstream content, as opposed
    /// to transport or unexpected failures.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::CourseNotFound(_)
                | Self::NoData(_)
                | Self::Calendar(_)
                | Self::IncomparableType(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_not_found_message() {
        let err = AppError::course_not_found("Invalid course details");
        assert_eq!(err.to_string(), "Invalid course details");
        assert_eq!(err.id(), "course_invalid");
        assert_eq!(err.status_code(), 404);
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_ambient_errors_are_unexpected() {
        let err = AppError::config("bad");
        assert_eq!(err.id(), "unexpected");
        assert_eq!(err.status_code(), 500);
        assert!(!err.is_parse_error());
    }
}
