//! Configuration management for the IslamiChat engines
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with ISLAMICHAT_ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Date conversion API configuration
    pub calendar: CalendarApiConfig,

    /// Geocoding API configuration
    pub geocoding: GeocodingConfig,

    /// Upstream response caching
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CalendarApiConfig {
    /// Aladhan API base URL
    pub base_url: String,

    /// Timeout for single-date conversions, seconds
    pub timeout_secs: u64,

    /// Timeout for month calendar requests, seconds
    pub month_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Nominatim base URL
    pub base_url: String,

    /// User-Agent sent to Nominatim (required by its usage policy)
    pub user_agent: String,

    /// Preferred language for display addresses
    pub language: String,

    /// Request timeout, seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Time-to-live for calendar conversions, seconds
    pub calendar_ttl_secs: u64,

    /// Time-to-live for geocoding results, seconds
    pub geocode_ttl_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment =
            std::env::var("ISLAMICHAT_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("calendar.base_url", "https://api.aladhan.com/v1")?
            .set_default("calendar.timeout_secs", 10)?
            .set_default("calendar.month_timeout_secs", 15)?
            .set_default("geocoding.base_url", "https://nominatim.openstreetmap.org")?
            .set_default("geocoding.user_agent", "islamiChat/1.0")?
            .set_default("geocoding.language", "id")?
            .set_default("geocoding.timeout_secs", 10)?
            .set_default("cache.calendar_ttl_secs", 6 * 60 * 60)?
            .set_default("cache.geocode_ttl_secs", 24 * 60 * 60)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (ISLAMICHAT_ prefix)
            .add_source(
                Environment::with_prefix("ISLAMICHAT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            calendar: CalendarApiConfig::default(),
            geocoding: GeocodingConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl CalendarApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn month_timeout(&self) -> Duration {
        Duration::from_secs(self.month_timeout_secs)
    }
}

impl Default for CalendarApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.aladhan.com/v1".to_string(),
            timeout_secs: 10,
            month_timeout_secs: 15,
        }
    }
}

impl GeocodingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "islamiChat/1.0".to_string(),
            language: "id".to_string(),
            timeout_secs: 10,
        }
    }
}

impl CacheConfig {
    pub fn calendar_ttl(&self) -> Duration {
        Duration::from_secs(self.calendar_ttl_secs)
    }

    pub fn geocode_ttl(&self) -> Duration {
        Duration::from_secs(self.geocode_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            calendar_ttl_secs: 6 * 60 * 60,
            geocode_ttl_secs: 24 * 60 * 60,
        }
    }
}
