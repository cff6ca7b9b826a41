//! Qibla direction models

use serde::{Deserialize, Serialize};

use crate::types::GeoPoint;

/// Direction and distance from a point to the Ka'bah
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BearingResult {
    /// Initial great-circle bearing, clockwise from true north, in [0, 360)
    pub bearing_degrees: f64,
    pub distance_km: f64,
}

/// Qibla direction for a resolved location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QiblaReading {
    pub location: GeoPoint,
    /// Address returned by the geocoder, if the location came from a search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(flatten)]
    pub result: BearingResult,
}

/// Raw sample from a browser `deviceorientation` event
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct OrientationReading {
    pub alpha: Option<f64>,
    pub absolute: bool,
    /// iOS Safari only
    pub webkit_compass_heading: Option<f64>,
}
