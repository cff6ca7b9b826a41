//! Islamic event and recommended-fast rules

use std::str::FromStr;

use chrono::Weekday;

use crate::models::{DayLabel, LabelOptions};

/// Fixed events keyed by `(hijri_day, hijri_month_number)`
pub const FIXED_EVENTS: &[((u8, u8), DayLabel)] = &[
    // Ramadan
    ((1, 9), DayLabel::StartOfRamadan),
    ((17, 9), DayLabel::NuzulQuran),
    // Rajab
    ((27, 7), DayLabel::IsraMiraj),
    // Rabi' al-Awwal
    ((12, 3), DayLabel::MawlidNabi),
    // Shawwal
    ((1, 10), DayLabel::EidAlFitr),
    // Dhu al-Hijjah
    ((8, 12), DayLabel::Tarwiyah),
    ((9, 12), DayLabel::Arafah),
    ((10, 12), DayLabel::EidAlAdha),
    // Muharram
    ((10, 1), DayLabel::Ashura),
    ((9, 1), DayLabel::Tasua),
];

/// Ayyam al-Bid, fasted every Hijri month
pub const WHITE_DAYS: [u8; 3] = [13, 14, 15];

/// Fixed event on a given Hijri day, if any
pub fn fixed_event(hijri_day: u8, hijri_month: u8) -> Option<DayLabel> {
    FIXED_EVENTS
        .iter()
        .find(|((d, m), _)| *d == hijri_day && *m == hijri_month)
        .map(|(_, label)| *label)
}

/// Labels for one day, always in the order: fixed event, White Days, weekly fast.
///
/// Tasu'a is the only fixed event that can be switched off. The weekday is
/// an English name, full or abbreviated, in any case.
pub fn label_day(
    hijri_day: u8,
    hijri_month: u8,
    weekday: &str,
    options: LabelOptions,
) -> Vec<DayLabel> {
    let mut labels = Vec::new();

    if let Some(event) = fixed_event(hijri_day, hijri_month) {
        if event != DayLabel::Tasua || options.include_tasua {
            labels.push(event);
        }
    }

    if WHITE_DAYS.contains(&hijri_day) {
        labels.push(DayLabel::WhiteDays);
    }

    if options.include_weekly_fasts {
        match Weekday::from_str(weekday.trim()) {
            Ok(Weekday::Mon) => labels.push(DayLabel::MondayFast),
            Ok(Weekday::Thu) => labels.push(DayLabel::ThursdayFast),
            _ => {}
        }
    }

    labels
}

/// Days of a Hijri month worth reconstructing when the month feed is missing:
/// every fixed event day plus the White Days, ascending and without duplicates.
pub fn fallback_days(hijri_month: u8) -> Vec<u8> {
    let mut days: Vec<u8> = FIXED_EVENTS
        .iter()
        .filter(|((_, m), _)| *m == hijri_month)
        .map(|((d, _), _)| *d)
        .chain(WHITE_DAYS)
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}
