//! Flexible date-of-birth parsing
//!
//! Callers pass dates through in whatever format their upstream input used.
//! Parsing is best-effort: an unrecognized format yields `None`, which the
//! engine treats as "no date supplied" rather than an error.

use chrono::NaiveDate;

/// Accepted formats, tried in order. US month-first forms come before
/// day-first forms, matching the source data.
const FORMATS: &[&str] = &[
    "%m/%d/%Y", // 10/11/1993
    "%m-%d-%Y",
    "%Y-%m-%d", // ISO
    "%Y/%m/%d",
    "%B %d, %Y", // October 11, 1993
    "%b %d, %Y", // Oct 11, 1993
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y", // 11 October 1993
    "%d %b %Y",
];

/// Parses a date of birth, returning `None` for unrecognized input.
pub fn parse_dob(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}
