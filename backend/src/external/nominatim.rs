//! Nominatim (OpenStreetMap) geocoding client

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use shared::validation::{validate_latitude, validate_longitude};
use shared::GeoPoint;

use super::{GeocodedPlace, GeocodingProvider};
use crate::config::GeocodingConfig;
use crate::error::{AppError, AppResult};

const SERVICE: &str = "Nominatim";

/// Nominatim API client
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
    language: String,
}

/// Search result item; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

impl NominatimPlace {
    fn into_place(self) -> Result<GeocodedPlace, String> {
        let latitude: f64 = self
            .lat
            .trim()
            .parse()
            .map_err(|_| format!("latitude {:?} is not a number", self.lat))?;
        let longitude: f64 = self
            .lon
            .trim()
            .parse()
            .map_err(|_| format!("longitude {:?} is not a number", self.lon))?;
        validate_latitude(latitude)?;
        validate_longitude(longitude)?;

        Ok(GeocodedPlace {
            point: GeoPoint::new(latitude, longitude),
            display_address: self.display_name,
        })
    }
}

impl NominatimClient {
    /// Create a new NominatimClient from configuration
    pub fn new(config: &GeocodingConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    /// Create a new NominatimClient with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> AppResult<Self> {
        Self::new(&GeocodingConfig {
            base_url,
            ..GeocodingConfig::default()
        })
    }
}

#[async_trait]
impl GeocodingProvider for NominatimClient {
    async fn geocode(&self, query: &str) -> AppResult<Option<GeocodedPlace>> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!("Nominatim search: {:?}", query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("limit", "1"),
                ("accept-language", self.language.as_str()),
            ])
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppError::upstream(SERVICE, format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                SERVICE,
                format!("HTTP {} - {}", status, body),
            ));
        }

        let places: Vec<NominatimPlace> =
            response
                .json()
                .await
                .map_err(|e| AppError::UnexpectedPayload {
                    service: SERVICE,
                    message: format!("failed to parse search response: {}", e),
                })?;

        match places.into_iter().next() {
            Some(place) => place
                .into_place()
                .map(Some)
                .map_err(|message| AppError::UnexpectedPayload {
                    service: SERVICE,
                    message,
                }),
            None => Ok(None),
        }
    }
}
