//! Hijri calendar engine: date normalization, event rules and calendar views

pub mod dates;
pub mod rules;
pub mod views;

pub use dates::{normalize_gregorian, parse_gregorian, to_api_date};
pub use rules::{fallback_days, fixed_event, label_day, FIXED_EVENTS, WHITE_DAYS};
pub use views::{filter_days, find_upcoming, sort_days};
