//! Views over a built calendar: ordering, filtering and upcoming events

use chrono::NaiveDate;

use crate::models::{CalendarDay, UpcomingDay};

/// Sort days ascending by Gregorian date; unparseable dates go last,
/// keeping their relative order
pub fn sort_days(days: &mut [CalendarDay]) {
    days.sort_by_key(CalendarDay::sort_key);
}

/// Labeled days on or after `from`, soonest first, at most `limit` of them
pub fn find_upcoming(days: &[CalendarDay], from: NaiveDate, limit: usize) -> Vec<UpcomingDay> {
    let mut upcoming: Vec<UpcomingDay> = days
        .iter()
        .filter(|day| day.is_labeled())
        .filter_map(|day| {
            let date = day.gregorian_date()?;
            (date >= from).then(|| UpcomingDay {
                day: day.clone(),
                days_left: (date - from).num_days(),
            })
        })
        .collect();

    upcoming.sort_by_key(|u| u.days_left);
    upcoming.truncate(limit);
    upcoming
}

/// Keep only labeled days and/or one Hijri month. `None` keeps the whole year.
pub fn filter_days(
    days: &[CalendarDay],
    only_labeled: bool,
    month_filter: Option<u8>,
) -> Vec<CalendarDay> {
    days.iter()
        .filter(|day| !only_labeled || day.is_labeled())
        .filter(|day| month_filter.map_or(true, |m| day.hijri_month_number() == m))
        .cloned()
        .collect()
}
