//! Timetable session data structure.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{AppError, Result};
use crate::utils::rooms::rooms_short;

/// Day names indexed by `Session::day`.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A single recurring timetable slot for a module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    /// Module title (empty for continuation rows)
    pub module_name: String,

    /// Session type, e.g. "Lecture" or "Practical"
    #[serde(rename = "type")]
    pub session_type: String,

    /// Day of the week, 0 = Monday
    pub day: u8,

    /// Start time as `H:MM`
    pub start: String,

    /// End time as `H:MM`
    pub end: String,

    /// Rooms in first-seen order, without duplicates
    #[serde(default)]
    pub rooms: Vec<String>,
}

impl Session {
    pub fn new(
        module_name: impl Into<String>,
        session_type: impl Into<String>,
        day: u8,
        start: impl Into<String>,
        end: impl Into<String>,
        rooms: Vec<String>,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            session_type: session_type.into(),
            day,
            start: start.into(),
            end: end.into(),
            rooms,
        }
    }

    /// Build a session from plain data, e.g. a cached API record.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(AppError::incomparable(json_kind(value)));
        }
        Self::deserialize(value).map_err(AppError::incomparable)
    }

    /// Weekday name, empty if `day` is out of range.
    pub fn day_name(&self) -> &'static str {
        DAY_NAMES.get(self.day as usize).copied().unwrap_or("")
    }

    /// Duration in hours.
    pub fn length(&self) -> f64 {
        match (minute_of_day(&self.start), minute_of_day(&self.end)) {
            (Some(start), Some(end)) => f64::from(end - start) / 60.0,
            _ => 0.0,
        }
    }

    /// Human readable duration, e.g. `"1 hour"` or `"2.5 hours"`.
    pub fn length_str(&self) -> String {
        let length = self.length();
        let plural = if length == 1.0 { "" } else { "s" };
        format!("{} hour{plural}", format_hours(length))
    }

    /// Whether the session carries a module name.
    pub fn is_valid(&self) -> bool {
        !self.module_name.is_empty()
    }

    /// Short room codes, see [`rooms_short`].
    pub fn rooms_short(&self) -> Vec<String> {
        rooms_short(&self.rooms)
    }

    /// Identity digest over module, type, day and times.
    ///
    /// Rooms are excluded: the same session is listed once per room.
    pub fn hash(&self) -> String {
        let mut hasher = Md5::new();
        hasher.update(self.module_name.as_bytes());
        hasher.update(self.session_type.as_bytes());
        hasher.update(self.day.to_string().as_bytes());
        hasher.update(self.start.as_bytes());
        hasher.update(self.end.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Whether both values describe the same logical session.
    ///
    /// Rows of a multi-room session may leave the module blank, so matching
    /// slots also count as equal when either the module or a room is shared.
    pub fn equals(&self, other: &Session) -> bool {
        if self.hash() == other.hash() {
            return true;
        }

        if self.day != other.day
            || self.start != other.start
            || self.end != other.end
            || self.session_type != other.session_type
        {
            return false;
        }

        self.module_name == other.module_name
            || self.rooms.iter().any(|room| other.rooms.contains(room))
    }

    /// Compare with plain data, failing if it is not session-shaped.
    pub fn equals_value(&self, other: &serde_json::Value) -> Result<bool> {
        Ok(self.equals(&Self::from_value(other)?))
    }

    /// Fold another observation of this session into `self`.
    pub fn combine(&mut self, other: &Session) -> &mut Self {
        if self.module_name.is_empty() {
            self.module_name = other.module_name.clone();
        }
        for room in &other.rooms {
            if !self.rooms.contains(room) {
                self.rooms.push(room.clone());
            }
        }
        self
    }
}

/// Parse `H:MM` / `HH:MM` into minutes since midnight.
///
/// `24:00` is accepted as the end of the day.
fn minute_of_day(time: &str) -> Option<i32> {
    let (hours, minutes) = time.trim().split_once(':')?;
    let hours: u16 = hours.parse().ok()?;
    let minutes: u16 = minutes.parse().ok()?;
    if hours > 24 || minutes > 59 {
        return None;
    }
    Some(i32::from(hours * 60 + minutes))
}

/// Significant digits kept in `length_str`.
const LENGTH_DIGITS: i32 = 14;

/// Format hours with at most 14 significant digits, without trailing zeros.
fn format_hours(hours: f64) -> String {
    if hours == 0.0 || !hours.is_finite() {
        return "0".into();
    }
    let magnitude = hours.abs().log10().floor() as i32 + 1;
    let decimals = usize::try_from(LENGTH_DIGITS - magnitude).unwrap_or(0);
    let text = format!("{hours:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Hours, written as an integer when whole (`2`) and a float otherwise (`2.5`).
struct Hours(f64);

impl Serialize for Hours {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() < i64::MAX as f64 {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

#[derive(Serialize)]
struct SessionRecord<'a> {
    module_name: &'a str,
    day: u8,
    day_name: &'static str,
    start: &'a str,
    end: &'a str,
    length: Hours,
    length_str: String,
    #[serde(rename = "type")]
    session_type: &'a str,
    rooms: &'a [String],
    rooms_short: Vec<String>,
    hash: String,
    is_valid: bool,
}

impl Serialize for Session {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        SessionRecord {
            module_name: &self.module_name,
            day: self.day,
            day_name: self.day_name(),
            start: &self.start,
            end: &self.end,
            length: Hours(self.length()),
            length_str: self.length_str(),
            session_type: &self.session_type,
            rooms: &self.rooms,
            rooms_short: self.rooms_short(),
            hash: self.hash(),
            is_valid: self.is_valid(),
        }
        .serialize(serializer)
    }
}
