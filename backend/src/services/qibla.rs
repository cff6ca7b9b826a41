//! Qibla service: direction and distance to the Ka'bah for a coordinate or
//! a searched place

use std::sync::Arc;
use std::time::Duration;

use shared::qibla::{compute_qibla, heading_delta};
use shared::validation::{validate_heading, validate_latitude, validate_longitude};
use shared::{GeoPoint, QiblaReading};

use crate::cache::{Cache, TtlCache};
use crate::error::{AppError, AppResult};
use crate::external::{GeocodedPlace, GeocodingProvider};

/// Qibla service
#[derive(Clone)]
pub struct QiblaService {
    geocoder: Arc<dyn GeocodingProvider>,
    places: Arc<dyn Cache<String, Option<GeocodedPlace>>>,
}

impl QiblaService {
    /// Create a new QiblaService caching geocoder answers for `ttl`
    pub fn new(geocoder: Arc<dyn GeocodingProvider>, ttl: Duration) -> Self {
        Self::with_cache(geocoder, Arc::new(TtlCache::new(ttl)))
    }

    pub fn with_cache(
        geocoder: Arc<dyn GeocodingProvider>,
        places: Arc<dyn Cache<String, Option<GeocodedPlace>>>,
    ) -> Self {
        Self { geocoder, places }
    }

    /// Qibla for explicit coordinates
    pub fn from_coordinates(latitude: f64, longitude: f64) -> AppResult<QiblaReading> {
        validate_latitude(latitude).map_err(|e| AppError::validation("latitude", e))?;
        validate_longitude(longitude).map_err(|e| AppError::validation("longitude", e))?;

        let location = GeoPoint::new(latitude, longitude);
        Ok(QiblaReading {
            location,
            address: None,
            result: compute_qibla(location),
        })
    }

    /// Rotation between the qibla bearing and a live or manual heading
    pub fn correction(bearing: f64, device_heading: f64) -> AppResult<f64> {
        validate_heading(bearing).map_err(|e| AppError::validation("bearing", e))?;
        validate_heading(device_heading).map_err(|e| AppError::validation("heading", e))?;
        Ok(heading_delta(bearing, device_heading))
    }

    /// Qibla for a free-text place name
    pub async fn locate(&self, query: &str) -> AppResult<QiblaReading> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("query", "Location name must not be empty"));
        }

        let place = self
            .geocode_cached(query)
            .await?
            .ok_or_else(|| AppError::LocationNotFound(query.to_string()))?;

        tracing::debug!(
            "Resolved {:?} to {}, {}",
            query,
            place.point.latitude,
            place.point.longitude
        );

        Ok(QiblaReading {
            location: place.point,
            result: compute_qibla(place.point),
            address: Some(place.display_address),
        })
    }

    async fn geocode_cached(&self, query: &str) -> AppResult<Option<GeocodedPlace>> {
        let key = query.to_lowercase();
        if let Some(hit) = self.places.get(&key) {
            return Ok(hit);
        }

        let place = self.geocoder.geocode(query).await?;
        self.places.insert(key, place.clone());
        Ok(place)
    }
}
