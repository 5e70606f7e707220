//! Utility functions and helpers.

pub mod calendar;
#[cfg(feature = "fetch")]
pub mod http;
pub mod rooms;
pub mod text;

use scraper::Selector;

use crate::error::{AppError, Result};

/// Parse a CSS selector, reporting the offending selector on failure.
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AppError::selector(selector, format!("{e:?}")))
}
