// src/pipeline/fetch.rs

//! Fetch-and-parse entry points.

use chrono::Datelike;

use crate::error::Result;
use crate::models::{Config, CoursesResponse, SessionsResponse};
use crate::pipeline::query::{SessionQuery, metadata_url, timetable_url};
use crate::services::{SessionParser, parse_course_document};
use crate::utils::http;

/// Download and parse the course metadata for the academic year of `date`.
pub async fn fetch_courses(
    config: &Config,
    client: &reqwest::Client,
    date: impl Datelike,
) -> Result<CoursesResponse> {
    let url = metadata_url(config, date)?;
    log::info!("Fetching course metadata from {url}");

    let bytes = http::fetch_bytes(client, url.as_str()).await?;
    log::debug!("Received {} bytes", bytes.len());

    parse_course_document(bytes)
}

/// Request and parse a course timetable for the term containing `date`.
pub async fn fetch_sessions(
    config: &Config,
    client: &reqwest::Client,
    query: &SessionQuery,
    date: impl Datelike + Copy,
) -> Result<SessionsResponse> {
    let term = config.calendar.estimated_term(date)?;
    let params = query.form_params(config, term)?;
    let url = timetable_url(config, date)?;
    let parser = SessionParser::new(&config.timetable)?;

    log::info!("Fetching timetable for {} (term {term}) from {url}", query.course);
    let html = http::post_form(client, url.as_str(), &params).await?;

    let mut response = parser.parse(&html)?;
    response.timetable_url = Some(url.to_string());
    response.estimated_term = Some(term);

    log::info!(
        "Found {} sessions for {}",
        response.sessions.len(),
        query.course
    );
    Ok(response)
}
