//! Utilities for slot date/time parsing and formatting
//!
//! Slot times are wall-clock times in a fixed zone (Europe/Stockholm) and are
//! sent to the backend as `YYYY-MM-DD HH:mm`.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

pub const SLOT_TIME_ZONE: Tz = chrono_tz::Europe::Stockholm;
pub const SLOT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Input formats accepted from the form (datetime-local input, stored values)
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a slot time into a wall-clock time in the slot zone.
///
/// RFC 3339 values carrying an offset are converted into the slot zone first.
pub fn parse_slot_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&SLOT_TIME_ZONE).naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Rewrite a slot time into `YYYY-MM-DD HH:mm`. Blank stays blank.
pub fn normalize_slot_time(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Ok(String::new());
    }
    parse_slot_time(value)
        .map(|dt| dt.format(SLOT_TIME_FORMAT).to_string())
        .ok_or_else(|| format!("invalid slot time: {}", value))
}

/// Value for an `<input type="datetime-local">`
/// Example: "2024-01-10 09:00" -> "2024-01-10T09:00"
pub fn to_input_value(value: &str) -> String {
    parse_slot_time(value)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default()
}

/// Current wall-clock time in the slot zone
pub fn now_in_slot_zone() -> NaiveDateTime {
    Utc::now().with_timezone(&SLOT_TIME_ZONE).naive_local()
}

/// Format a server timestamp for list cards, in the slot zone
/// Example: 2024-03-15T13:02:26Z -> "2024-03-15 14:02"
pub fn format_created_at(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&SLOT_TIME_ZONE)
        .format(SLOT_TIME_FORMAT)
        .to_string()
}
