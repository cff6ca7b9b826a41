//! Shared types and pure domain logic for IslamiChat
//!
//! This crate holds everything that needs no I/O: the Hijri calendar
//! models and event rules, date normalization, and the qibla geodesy.
//! It is used by the backend services and, through WASM, by the browser.

pub mod calendar;
pub mod models;
pub mod qibla;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
