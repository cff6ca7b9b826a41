//! Engine services for IslamiChat

pub mod calendar;
pub mod export;
pub mod qibla;

pub use calendar::{CalendarCaches, CalendarService};
pub use export::{export_csv, export_ics};
pub use qibla::QiblaService;
