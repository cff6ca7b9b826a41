//! WebAssembly module for IslamiChat
//!
//! Provides client-side computation for:
//! - Qibla bearing, distance and compass correction
//! - Hijri day labeling
//! - Upcoming events from an already built calendar
//!
//! Everything here is pure and works offline; upstream calls stay in the
//! backend crate.

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

use shared::calendar::{find_upcoming, label_day, normalize_gregorian, parse_gregorian};
use shared::qibla;
use shared::validation::{validate_heading, validate_latitude, validate_longitude};

fn checked_point(latitude: f64, longitude: f64) -> Result<GeoPoint, String> {
    validate_latitude(latitude)?;
    validate_longitude(longitude)?;
    Ok(GeoPoint::new(latitude, longitude))
}

/// Qibla bearing in degrees clockwise from true north
#[wasm_bindgen]
pub fn qibla_bearing(latitude: f64, longitude: f64) -> Result<f64, JsValue> {
    let point = checked_point(latitude, longitude).map_err(|e| JsValue::from_str(e.as_str()))?;
    Ok(qibla::compute_qibla(point).bearing_degrees)
}

/// Great-circle distance to the Ka'bah in kilometres
#[wasm_bindgen]
pub fn qibla_distance_km(latitude: f64, longitude: f64) -> Result<f64, JsValue> {
    let point = checked_point(latitude, longitude).map_err(|e| JsValue::from_str(e.as_str()))?;
    Ok(qibla::compute_qibla(point).distance_km)
}

/// Bearing and distance as JSON: `{"bearing_degrees":..,"distance_km":..}`
#[wasm_bindgen]
pub fn qibla_json(latitude: f64, longitude: f64) -> Result<String, JsValue> {
    qibla_result_json(latitude, longitude).map_err(|e| JsValue::from_str(&e))
}

fn qibla_result_json(latitude: f64, longitude: f64) -> Result<String, String> {
    let point = checked_point(latitude, longitude)?;
    serde_json::to_string(&qibla::compute_qibla(point)).map_err(|e| e.to_string())
}

/// Rotation to apply to the compass needle so it points at the qibla
#[wasm_bindgen]
pub fn heading_delta(bearing: f64, device_heading: f64) -> Result<f64, JsValue> {
    checked_delta(bearing, device_heading).map_err(|e| JsValue::from_str(e))
}

fn checked_delta(bearing: f64, device_heading: f64) -> Result<f64, &'static str> {
    validate_heading(bearing)?;
    validate_heading(device_heading)?;
    Ok(qibla::heading_delta(bearing, device_heading))
}

/// Compass heading from a `deviceorientation` event, if usable
#[wasm_bindgen]
pub fn heading_from_orientation(
    alpha: Option<f64>,
    absolute: bool,
    webkit_compass_heading: Option<f64>,
) -> Option<f64> {
    qibla::heading_from_orientation(&OrientationReading {
        alpha,
        absolute,
        webkit_compass_heading,
    })
}

/// Label names for one Hijri day, in display order
#[wasm_bindgen]
pub fn label_hijri_day(
    hijri_day: u8,
    hijri_month: u8,
    weekday: &str,
    include_weekly_fasts: bool,
    include_tasua: bool,
    language: &str,
) -> js_sys::Array {
    label_names(
        hijri_day,
        hijri_month,
        weekday,
        LabelOptions::new(include_weekly_fasts, include_tasua),
        Language::from_code(language),
    )
    .into_iter()
    .map(JsValue::from)
    .collect()
}

fn label_names(
    hijri_day: u8,
    hijri_month: u8,
    weekday: &str,
    options: LabelOptions,
    language: Language,
) -> Vec<String> {
    label_day(hijri_day, hijri_month, weekday, options)
        .iter()
        .map(|label| label.name(language).to_string())
        .collect()
}

/// Normalize an upstream Gregorian date to `YYYY-MM-DD`
#[wasm_bindgen]
pub fn normalize_gregorian_date(raw: &str) -> String {
    let normalized = normalize_gregorian(raw);
    if parse_gregorian(&normalized).is_none() {
        web_sys::console::warn_1(&format!("Unrecognized Gregorian date: {}", raw).into());
    }
    normalized
}

/// Upcoming labeled days from a calendar previously fetched as JSON.
///
/// `from` is `YYYY-MM-DD`; the result is a JSON array of days with
/// `days_left`.
#[wasm_bindgen]
pub fn upcoming_events(days_json: &str, from: &str, limit: usize) -> Result<String, JsValue> {
    upcoming_json(days_json, from, limit).map_err(|e| JsValue::from_str(&e))
}

fn upcoming_json(days_json: &str, from: &str, limit: usize) -> Result<String, String> {
    let days: Vec<CalendarDay> =
        serde_json::from_str(days_json).map_err(|e| format!("Invalid calendar JSON: {}", e))?;
    let from = NaiveDate::parse_from_str(from.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date {:?}: {}", from, e))?;

    serde_json::to_string(&find_upcoming(&days, from, limit)).map_err(|e| e.to_string())
}
