//! Date parsing and formatting for backend date strings.
//!
//! The backend returns dates either as plain `yyyy-MM-dd` or as full
//! RFC 3339 timestamps. Outgoing payloads always use `yyyy-MM-dd`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Wire format for dates sent to the backend.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date as `yyyy-MM-dd`.
pub fn format_ymd(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

/// Parse a backend date string in any of the accepted shapes.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, WIRE_DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.date());
    }
    None
}

/// Render a backend date for display, falling back to the raw text when it
/// does not parse.
pub fn display_date(raw: &str) -> String {
    parse_date(raw).map(format_ymd).unwrap_or_else(|| raw.to_string())
}

/// Year component of a backend date, used for batch year ranges.
pub fn year_of(raw: &str) -> Option<i32> {
    parse_date(raw).map(|d| d.year())
}
