//! Gregorian date normalization
//!
//! The conversion API reports Gregorian dates either as `YYYY-MM-DD` or as
//! `DD-MM-YYYY`. Everything downstream works on the ISO form.

use chrono::NaiveDate;

/// Normalize a Gregorian date string to `YYYY-MM-DD`.
///
/// The format is detected from the dash positions of a 10 character
/// string. Anything unrecognized is returned unchanged.
pub fn normalize_gregorian(raw: &str) -> String {
    let trimmed = raw.trim();
    let bytes = trimmed.as_bytes();

    if bytes.len() == 10 && bytes[4] == b'-' && bytes[7] == b'-' {
        return trimmed.to_string();
    }
    if bytes.len() == 10 && bytes[2] == b'-' && bytes[5] == b'-' {
        // Byte positions are ASCII dashes, so slicing stays on char boundaries
        return format!("{}-{}-{}", &trimmed[6..], &trimmed[3..5], &trimmed[..2]);
    }

    raw.to_string()
}

/// Parse a Gregorian date in either recognized format
pub fn parse_gregorian(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&normalize_gregorian(raw), "%Y-%m-%d").ok()
}

/// Format a date the way the conversion API expects it (`DD-MM-YYYY`)
pub fn to_api_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
