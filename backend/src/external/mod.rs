//! External API integrations
//!
//! The engines only see the two provider traits below. Each client parses
//! its upstream JSON into the canonical shared types once, here, so the
//! services never deal with wire formats.

pub mod aladhan;
pub mod nominatim;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{ConvertedDay, GeoPoint, HijriDate};

use crate::error::AppResult;

pub use aladhan::AladhanClient;
pub use nominatim::NominatimClient;

/// Result of a Hijri month calendar request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthFeed {
    /// Every day of the month the provider knows about
    Days(Vec<ConvertedDay>),
    /// The provider has no calendar for this month (a normal condition for
    /// years far from the present)
    Gap,
}

/// Gregorian/Hijri date conversion service
#[async_trait]
pub trait DateConversionProvider: Send + Sync {
    /// Convert one Gregorian date
    async fn gregorian_to_hijri(&self, date: NaiveDate) -> AppResult<HijriDate>;

    /// Convert one Hijri date
    async fn hijri_to_gregorian(&self, year: i32, month: u8, day: u8) -> AppResult<ConvertedDay>;

    /// All days of one Hijri month
    async fn hijri_month_calendar(&self, year: i32, month: u8) -> AppResult<MonthFeed>;
}

/// A place resolved from a free-text query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeocodedPlace {
    pub point: GeoPoint,
    pub display_address: String,
}

/// Free-text location search
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Best match for `query`, or `None` when nothing matches
    async fn geocode(&self, query: &str) -> AppResult<Option<GeocodedPlace>>;
}
