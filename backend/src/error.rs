//! Error handling for the IslamiChat engines
//!
//! Every failure carries an English and an Indonesian message so the UI
//! can show it inline instead of crashing.

use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_id: String,
    },

    // External service errors
    #[error("{service} unavailable: {message}")]
    UpstreamUnavailable {
        service: &'static str,
        message: String,
    },

    #[error("Unexpected {service} response: {message}")]
    UnexpectedPayload {
        service: &'static str,
        message: String,
    },

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("No calendar data available for Hijri year {0}")]
    CalendarUnavailable(i32),

    // Output errors
    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error payload rendered by the UI
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// Validation failure on a named input field
    pub fn validation(field: &str, message: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
            message_id: format!("Input tidak valid: {}", message),
        }
    }

    /// Transport-level failure talking to an upstream service
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        AppError::UpstreamUnavailable {
            service,
            message: message.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE",
            AppError::UnexpectedPayload { .. } => "UNEXPECTED_PAYLOAD",
            AppError::LocationNotFound(_) => "LOCATION_NOT_FOUND",
            AppError::CalendarUnavailable(_) => "CALENDAR_UNAVAILABLE",
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// User-facing message in both languages
    pub fn detail(&self) -> ErrorDetail {
        let (message_en, message_id, field) = match self {
            AppError::Validation {
                field,
                message,
                message_id,
            } => (message.clone(), message_id.clone(), Some(field.clone())),
            AppError::UpstreamUnavailable { service, .. } => (
                format!("{} is temporarily unavailable", service),
                format!("Layanan {} sedang tidak tersedia", service),
                None,
            ),
            AppError::UnexpectedPayload { service, .. } => (
                format!("{} returned data in an unexpected format", service),
                format!("Format data dari {} tak terduga", service),
                None,
            ),
            AppError::LocationNotFound(query) => (
                format!("Location \"{}\" not found. Try a more specific name.", query),
                format!(
                    "Lokasi \"{}\" tidak ditemukan. Coba perjelas nama lokasi.",
                    query
                ),
                Some("query".to_string()),
            ),
            AppError::CalendarUnavailable(year) => (
                format!("The calendar for {} H is not available yet", year),
                format!("Kalender tahun {} H belum tersedia dari API", year),
                None,
            ),
            AppError::Export(msg) => (
                format!("Export failed: {}", msg),
                format!("Gagal mengekspor: {}", msg),
                None,
            ),
            AppError::Configuration(msg) => (
                format!("Configuration error: {}", msg),
                format!("Kesalahan konfigurasi: {}", msg),
                None,
            ),
        };

        tracing::warn!("Error: {:?}", self);

        ErrorDetail {
            code: self.code().to_string(),
            message_en,
            message_id,
            field,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Configuration(e.to_string())
    }
}

/// Result type alias for engine operations
pub type AppResult<T> = Result<T, AppError>;
