//! Validation utilities for IslamiChat inputs

// ============================================================================
// Calendar Validations
// ============================================================================

/// Validate a Hijri day of month (Hijri months have 29 or 30 days)
pub fn validate_hijri_day(day: u8) -> Result<(), &'static str> {
    if !(1..=30).contains(&day) {
        return Err("Hijri day must be between 1 and 30");
    }
    Ok(())
}

/// Validate a Hijri month number
pub fn validate_hijri_month(month: u8) -> Result<(), &'static str> {
    if !(1..=12).contains(&month) {
        return Err("Hijri month must be between 1 and 12");
    }
    Ok(())
}

/// Validate a Hijri year (years start at 1 AH)
pub fn validate_hijri_year(year: i32) -> Result<(), &'static str> {
    if year < 1 {
        return Err("Hijri year must be 1 or later");
    }
    if year > 9999 {
        return Err("Hijri year must have at most four digits");
    }
    Ok(())
}

// ============================================================================
// Location Validations
// ============================================================================

/// Validate a latitude in decimal degrees
pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if !latitude.is_finite() {
        return Err("Latitude must be a finite number");
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    Ok(())
}

/// Validate a longitude in decimal degrees
pub fn validate_longitude(longitude: f64) -> Result<(), &'static str> {
    if !longitude.is_finite() {
        return Err("Longitude must be a finite number");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate a compass heading (any finite angle; it is normalized later)
pub fn validate_heading(heading: f64) -> Result<(), &'static str> {
    if !heading.is_finite() {
        return Err("Heading must be a finite number");
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
