// src/services/sessions.rs

//! Timetable page parser.
//!
//! The page holds one `spreadsheet` table per weekday, Monday first. Each
//! table starts with a header row naming its columns; the column order has
//! changed between deployments, so fields are always looked up by name.

use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Session, SessionsResponse, TimetableConfig};
use crate::services::SessionMerger;
use crate::utils::parse_selector;
use crate::utils::text::{normalize_whitespace, title_case};

const TITLE_COLUMN: &str = "Title";
const TYPE_COLUMN: &str = "Type";
const START_COLUMN: &str = "Start";
const END_COLUMN: &str = "End";
const ROOM_COLUMN: &str = "Room";

/// Parses course timetable pages into sessions.
pub struct SessionParser {
    not_found_marker: String,
    table_sel: Selector,
    row_sel: Selector,
    cell_sel: Selector,
    course_name_sel: Selector,
    date_range_sel: Selector,
}

impl SessionParser {
    /// Create a parser, compiling the configured selectors.
    pub fn new(config: &TimetableConfig) -> Result<Self> {
        Ok(Self {
            not_found_marker: config.not_found_marker.clone(),
            table_sel: parse_selector(&config.table_selector)?,
            row_sel: parse_selector("tr")?,
            cell_sel: parse_selector("td, th")?,
            course_name_sel: parse_selector(&config.course_name_selector)?,
            date_range_sel: parse_selector(&config.date_range_selector)?,
        })
    }

    /// Parse a timetable page.
    ///
    /// Fails with [`AppError::CourseNotFound`] when the page is the site's
    /// "no such page" response.
    pub fn parse(&self, html: &str) -> Result<SessionsResponse> {
        // The site answers unknown courses with HTTP 200, so only the body tells.
        if html.contains(&self.not_found_marker) {
            return Err(AppError::course_not_found("Invalid course details"));
        }

        let document = Html::parse_document(html);
        let mut merger = SessionMerger::new();

        for (index, table) in document.select(&self.table_sel).enumerate() {
            let Ok(day) = u8::try_from(index) else {
                log::warn!("Ignoring timetable table {index}: too many tables");
                break;
            };

            let rows: Vec<ElementRef> = table.select(&self.row_sel).collect();
            // Header only, or nothing at all
            if rows.len() < 2 {
                log::debug!("Skipping table {index}: no session rows");
                continue;
            }

            let columns = ColumnMap::from_header(&self.cells(rows[0]));
            for row in &rows[1..] {
                let cells = self.cells(*row);
                merger.push(columns.session(&cells, day));
            }
        }

        log::debug!("Parsed {} sessions", merger.len());

        Ok(SessionsResponse {
            course_name: self.header_text(&document, &self.course_name_sel),
            date_range: self.header_text(&document, &self.date_range_sel),
            sessions: merger.into_sessions(),
            ..SessionsResponse::default()
        })
    }

    fn cells(&self, row: ElementRef) -> Vec<String> {
        row.select(&self.cell_sel)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect()
    }

    /// Text of the first element matching `selector`, if any.
    ///
    /// The page header is cosmetic and its layout is not stable, so a miss
    /// is not an error.
    fn header_text(&self, document: &Html, selector: &Selector) -> Option<String> {
        let text = document
            .select(selector)
            .next()
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .filter(|text| !text.is_empty());
        if text.is_none() {
            log::warn!("Timetable header field not found: {selector:?}");
        }
        text
    }
}

/// Column name to cell index, read from a table's header row.
#[derive(Debug, Default)]
struct ColumnMap {
    indices: HashMap<String, usize>,
}

impl ColumnMap {
    fn from_header(header: &[String]) -> Self {
        let indices = header
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();
        Self { indices }
    }

    /// Cell value for a named column; empty if the column or cell is missing.
    fn get<'a>(&self, cells: &'a [String], column: &str) -> &'a str {
        self.indices
            .get(column)
            .and_then(|&index| cells.get(index))
            .map_or("", String::as_str)
    }

    fn session(&self, cells: &[String], day: u8) -> Session {
        Session::new(
            title_case(self.get(cells, TITLE_COLUMN)),
            self.get(cells, TYPE_COLUMN),
            day,
            self.get(cells, START_COLUMN),
            self.get(cells, END_COLUMN),
            split_rooms(self.get(cells, ROOM_COLUMN)),
        )
    }
}

/// Split a comma separated room cell, dropping blanks and repeats.
fn split_rooms(cell: &str) -> Vec<String> {
    let mut rooms: Vec<String> = Vec::new();
    for room in cell.split(',').map(str::trim).filter(|r| !r.is_empty()) {
        if !rooms.iter().any(|r| r == room) {
            rooms.push(room.to_string());
        }
    }
    rooms
}

/// Parse a timetable page with the default settings.
pub fn parse_session_document(html: &str) -> Result<SessionsResponse> {
    SessionParser::new(&TimetableConfig::default())?.parse(html)
}
