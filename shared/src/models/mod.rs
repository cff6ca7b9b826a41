//! Domain models for IslamiChat

mod calendar;
mod qibla;

pub use calendar::*;
pub use qibla::*;
