//! IslamiChat engines
//!
//! Hijri calendar reconciliation with Islamic event labeling, and qibla
//! direction finding. The presentation layer calls into [`AppState`];
//! there is no server or CLI here.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod cache;
pub mod config;
pub mod error;
pub mod external;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult, ErrorDetail};

use external::{AladhanClient, NominatimClient};
use services::{CalendarService, QiblaService};

/// Engines wired to the live providers
#[derive(Clone)]
pub struct AppState {
    pub calendar: CalendarService,
    pub qibla: QiblaService,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build HTTP clients, caches and services from configuration
    pub fn from_config(config: Config) -> AppResult<Self> {
        tracing::info!("Initializing IslamiChat engines");
        tracing::info!("Environment: {}", config.environment);

        let aladhan = AladhanClient::new(&config.calendar)?;
        let nominatim = NominatimClient::new(&config.geocoding)?;

        Ok(Self {
            calendar: CalendarService::new(Arc::new(aladhan), config.cache.calendar_ttl()),
            qibla: QiblaService::new(Arc::new(nominatim), config.cache.geocode_ttl()),
            config: Arc::new(config),
        })
    }

    /// Load configuration from the environment and build the engines
    pub fn load() -> AppResult<Self> {
        Self::from_config(Config::load()?)
    }
}

/// Install the default tracing subscriber. Leaves an already installed
/// subscriber in place.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "islamichat_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
