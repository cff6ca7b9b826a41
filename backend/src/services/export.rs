//! Calendar export: CSV table and iCalendar all-day events

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use shared::CalendarDay;

use crate::error::{AppError, AppResult};

const ICS_PRODID: &str = "-//IslamiChat//Hijri Calendar//EN";
const ICS_LINE_LIMIT: usize = 75;

/// CSV row with the fixed export columns
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    gregorian: &'a str,
    weekday: &'a str,
    hijri: &'a str,
    h_day: u8,
    h_month_num: u8,
    h_month_en: &'a str,
    labels: String,
}

impl<'a> From<&'a CalendarDay> for CsvRow<'a> {
    fn from(day: &'a CalendarDay) -> Self {
        CsvRow {
            gregorian: &day.gregorian,
            weekday: &day.weekday,
            hijri: &day.hijri.date,
            h_day: day.hijri_day(),
            h_month_num: day.hijri_month_number(),
            h_month_en: day.hijri_month_name(),
            labels: day.labels_joined(),
        }
    }
}

/// Export days as UTF-8 CSV, one row per day in the given order
pub fn export_csv(days: &[CalendarDay]) -> AppResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for day in days {
        wtr.serialize(CsvRow::from(day))
            .map_err(|e| AppError::Export(format!("CSV serialization error: {}", e)))?;
    }

    // serde emits the header only with the first record
    if days.is_empty() {
        wtr.write_record([
            "gregorian",
            "weekday",
            "hijri",
            "h_day",
            "h_month_num",
            "h_month_en",
            "labels",
        ])
        .map_err(|e| AppError::Export(format!("CSV header error: {}", e)))?;
    }

    wtr.into_inner()
        .map_err(|e| AppError::Export(format!("CSV writer error: {}", e)))
}

/// Export labeled days as an iCalendar file of all-day events.
///
/// Output depends only on the input, so re-exporting yields the same UIDs.
/// `DTSTAMP` is midnight UTC of the event date rather than the export time,
/// which keeps repeated exports byte-identical. Labeled days without a
/// readable Gregorian date cannot be placed and are left out.
pub fn export_ics(days: &[CalendarDay]) -> Vec<u8> {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", ICS_PRODID),
        "CALSCALE:GREGORIAN".to_string(),
    ];

    for day in days.iter().filter(|d| d.is_labeled()) {
        let Some(date) = day.gregorian_date() else {
            tracing::warn!("Skipping ICS event with unreadable date {:?}", day.gregorian);
            continue;
        };
        lines.extend(vevent(day, date));
    }

    lines.push("END:VCALENDAR".to_string());

    let mut out = String::new();
    for line in &lines {
        out.push_str(&fold_line(line));
        out.push_str("\r\n");
    }
    out.into_bytes()
}

/// Stable identifier from date, first label and Hijri date
pub fn event_uid(day: &CalendarDay, date: NaiveDate) -> String {
    let summary: String = day
        .first_label()
        .map(|l| l.to_string())
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    format!(
        "{}-{}-{}@islamichat",
        ics_date(date),
        summary,
        day.hijri.date
    )
}

fn vevent(day: &CalendarDay, date: NaiveDate) -> Vec<String> {
    let summary = day
        .first_label()
        .map(|l| l.to_string())
        .unwrap_or_default();
    let description = format!(
        "Hijri: {} ({})\nAll labels: {}",
        day.hijri.date,
        day.hijri_month_name(),
        day.labels_joined()
    );

    vec![
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", event_uid(day, date)),
        format!("DTSTAMP:{}T000000Z", ics_date(date)),
        format!("DTSTART;VALUE=DATE:{}", ics_date(date)),
        format!("DTEND;VALUE=DATE:{}", ics_date(date + Duration::days(1))),
        format!("SUMMARY:{}", escape_text(&summary)),
        format!("DESCRIPTION:{}", escape_text(&description)),
        "TRANSP:TRANSPARENT".to_string(),
        "END:VEVENT".to_string(),
    ]
}

fn ics_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Escape TEXT values (RFC 5545 section 3.3.11)
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Fold a content line at 75 octets without splitting a UTF-8 sequence
fn fold_line(line: &str) -> String {
    if line.len() <= ICS_LINE_LIMIT {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / ICS_LINE_LIMIT * 3);
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        // Continuation lines start with a space, which counts toward the limit
        if width + len > ICS_LINE_LIMIT {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out
}
