use serde_json::json;
use timetable_parser::error::AppError;
use timetable_parser::models::{Session, TimetableConfig};
use timetable_parser::parse_session_document;
use timetable_parser::services::SessionParser;

const PAGE: &str = include_str!("data/showtimetable.html");

fn sessions() -> Vec<Session> {
    parse_session_document(PAGE).unwrap().sessions
}

#[test]
fn not_found_page_is_course_error() {
    let err = parse_session_document("No Such Page").unwrap_err();
    assert!(matches!(err, AppError::CourseNotFound(_)));
    assert_eq!(err.to_string(), "Invalid course details");
    assert_eq!(err.status_code(), 404);
}

#[test]
fn course_name() {
    let response = parse_session_document(PAGE).unwrap();
    assert_eq!(
        response.course_name.as_deref(),
        Some("Electronic Engineering (With Professional Practice Year) - BENG (Hons) - Ltn - Y4 Oct FT")
    );
    assert_eq!(response.timetable_url, None);
    assert_eq!(response.estimated_term, None);
}

#[test]
fn date_range() {
    let response = parse_session_document(PAGE).unwrap();
    assert_eq!(
        response.date_range.as_deref(),
        Some("Weeks: 35-34 (27 Aug 2018-25 Aug 2019)")
    );
}

#[test]
fn sessions_match_page() {
    let value = serde_json::to_value(sessions()).unwrap();
    assert_eq!(
        value,
        json!([
            // Merged from two rows sharing a room
            {
                "module_name": "Fundamentals Of Computer Studies",
                "day": 0,
                "day_name": "Monday",
                "start": "9:00",
                "end": "11:00",
                "length": 2,
                "length_str": "2 hours",
                "type": "Lecture",
                "rooms": ["C016 - CST Teaching Lab", "C015 - CST Teaching Lab"],
                "rooms_short": ["C016", "C015"],
                "hash": "2b0801d69d67b7bbc4dbe71d881d228d",
                "is_valid": true,
            },
            // Short room codes collide
            {
                "module_name": "Concepts And Technologies Of Artificial Intelligence",
                "day": 1,
                "day_name": "Tuesday",
                "start": "9:00",
                "end": "11:00",
                "length": 2,
                "length_str": "2 hours",
                "type": "Practical",
                "rooms": ["A100 - A", "A100 - B", "A310 - CST Teaching Lab"],
                "rooms_short": ["A100 - A", "A100 - B", "A310 - CST Teaching Lab"],
                "hash": "0ceaf2035dac1945d268adbd5dbd4ef2",
                "is_valid": true,
            },
            // No module name
            {
                "module_name": "",
                "day": 4,
                "day_name": "Friday",
                "start": "12:00",
                "end": "14:30",
                "length": 2.5,
                "length_str": "2.5 hours",
                "type": "Practical",
                "rooms": [
                    "C016 - CST Teaching Lab",
                    "P0.102 - Lab C - General Teaching Lab",
                    "MK010 - Electronics and Telecoms Lab",
                    "MK027",
                ],
                "rooms_short": ["C016", "P0.102", "MK010", "MK027"],
                "hash": "a3433d3e092a859744f9fd497b4aa183",
                "is_valid": false,
            },
        ])
    );
}

#[test]
fn sessions_are_pairwise_distinct() {
    let sessions = sessions();
    for (i, a) in sessions.iter().enumerate() {
        for b in &sessions[i + 1..] {
            assert!(!a.equals(b), "{} equals {}", a.hash(), b.hash());
        }
    }
}

#[test]
fn configured_selectors_are_used() {
    let config = TimetableConfig {
        course_name_selector: "span.header-0-0-0".into(),
        ..TimetableConfig::default()
    };
    let response = SessionParser::new(&config).unwrap().parse(PAGE).unwrap();
    assert_eq!(response.course_name.as_deref(), Some("Programme of Study:"));
    assert_eq!(response.sessions.len(), 3);
}
