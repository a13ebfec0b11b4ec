// ── Time formatting ──
//
// All reservation times are UTC wall-clock values held as `NaiveDateTime`.
// Input is never shifted into a local zone; explicit offsets from the
// service are normalized to UTC.

use std::ops::RangeInclusive;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Utc};
use thiserror::Error;

/// Hours the time picker offers (on the hour, inclusive).
pub const BOOKING_HOURS: RangeInclusive<u32> = 8..=22;

/// Format produced by the time picker, e.g. `2024-05-01 14:00`.
pub const PICKER_FORMAT: &str = "%Y-%m-%d %H:00";

/// Canonical wire format: whole seconds, no offset suffix.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Calendar date format for the date-range filter and query parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `Wed, May 1, 2024, 02:00 PM`
const DISPLAY_FORMAT: &str = "%a, %b %-d, %Y, %I:%M %p";

/// Accepted naive layouts, tried in order. `%.f` also matches no fraction.
const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// A date or date-time string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Date/time is empty")]
    Empty,

    #[error("Invalid date/time '{input}' (expected YYYY-MM-DD HH:MM)")]
    DateTime { input: String },

    #[error("Invalid date '{input}' (expected YYYY-MM-DD)")]
    Date { input: String },
}

/// Render for humans: weekday, month, day, year, 12-hour clock.
pub fn to_display_string(timestamp: &NaiveDateTime) -> String {
    timestamp.format(DISPLAY_FORMAT).to_string()
}

/// Parse picker or service output into a canonical timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM`, a `T` separator, optional seconds and
/// fractions, and RFC 3339 offsets. Sub-second precision is dropped.
pub fn to_canonical(input: &str) -> Result<NaiveDateTime, FormatError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FormatError::Empty);
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
        return Ok(with_offset.naive_utc().trunc_subsecs(0));
    }

    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|ts| ts.trunc_subsecs(0))
        .ok_or_else(|| FormatError::DateTime {
            input: input.to_owned(),
        })
}

/// Canonical wire string, e.g. `2024-05-01T14:00:00`.
pub fn to_wire_string(timestamp: &NaiveDateTime) -> String {
    timestamp.format(WIRE_FORMAT).to_string()
}

/// Render in the picker's own format (`YYYY-MM-DD HH:00`).
pub fn to_picker_string(timestamp: &NaiveDateTime) -> String {
    timestamp.format(PICKER_FORMAT).to_string()
}

/// Every slot the picker offers on `date`, in order.
pub fn hourly_slots(date: NaiveDate) -> Vec<NaiveDateTime> {
    BOOKING_HOURS
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .map(|time| date.and_time(time))
        .collect()
}

/// Whether `timestamp` falls on one of the picker's slots.
pub fn is_booking_slot(timestamp: &NaiveDateTime) -> bool {
    use chrono::Timelike;

    BOOKING_HOURS.contains(&timestamp.hour()) && timestamp.minute() == 0 && timestamp.second() == 0
}

/// Parse a calendar date (`YYYY-MM-DD`).
pub fn parse_date(input: &str) -> Result<NaiveDate, FormatError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FormatError::Empty);
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| FormatError::Date {
        input: input.to_owned(),
    })
}

/// Render a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
