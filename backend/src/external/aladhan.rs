//! Aladhan API client for Hijri/Gregorian date conversion
//!
//! Endpoints used:
//! - `GET /gToH?date=DD-MM-YYYY`: Gregorian to Hijri, one day
//! - `GET /hToG?date=DD-MM-YYYY`: Hijri to Gregorian, one day
//! - `GET /hToGCalendar/{year}/{month}`: every day of a Hijri month

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::calendar::{normalize_gregorian, to_api_date};
use shared::{ConvertedDay, HijriDate};
use std::time::Duration;

use super::{DateConversionProvider, MonthFeed};
use crate::config::CalendarApiConfig;
use crate::error::{AppError, AppResult};

const SERVICE: &str = "Aladhan";

/// Aladhan API client
#[derive(Clone)]
pub struct AladhanClient {
    client: Client,
    base_url: String,
    month_timeout: Duration,
}

/// Response envelope shared by all endpoints
#[derive(Debug, Deserialize)]
struct AladhanEnvelope {
    code: u16,
    #[serde(default)]
    data: serde_json::Value,
}

/// One converted day (`data` of gToH/hToG, items of hToGCalendar)
#[derive(Debug, Deserialize)]
struct WireConversion {
    hijri: WireHijri,
    gregorian: Option<WireGregorian>,
}

#[derive(Debug, Deserialize)]
struct WireHijri {
    date: String,
    month: WireMonth,
    weekday: Option<WireWeekday>,
}

#[derive(Debug, Deserialize)]
struct WireGregorian {
    date: String,
    weekday: WireWeekday,
}

#[derive(Debug, Deserialize)]
struct WireMonth {
    en: Option<String>,
    ar: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireWeekday {
    en: Option<String>,
    ar: Option<String>,
}

impl WireHijri {
    fn into_hijri(self) -> Result<HijriDate, String> {
        let weekday = self.weekday.unwrap_or(WireWeekday { en: None, ar: None });
        HijriDate::parse(&self.date)
            .map(|d| {
                d.with_month_names(self.month.en, self.month.ar)
                    .with_weekday(weekday.en, weekday.ar)
            })
            .map_err(|e| format!("hijri date {:?}: {}", self.date, e))
    }
}

impl WireConversion {
    fn into_converted(self) -> Result<ConvertedDay, String> {
        let gregorian = self
            .gregorian
            .ok_or_else(|| "missing gregorian block".to_string())?;
        let weekday = gregorian
            .weekday
            .en
            .filter(|w| !w.trim().is_empty())
            .ok_or_else(|| "missing gregorian weekday".to_string())?;

        Ok(ConvertedDay {
            gregorian: normalize_gregorian(&gregorian.date),
            weekday,
            hijri: self.hijri.into_hijri()?,
        })
    }
}

impl AladhanClient {
    /// Create a new AladhanClient from configuration
    pub fn new(config: &CalendarApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            month_timeout: config.month_timeout(),
        })
    }

    /// Create a new AladhanClient with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> AppResult<Self> {
        Self::new(&CalendarApiConfig {
            base_url,
            ..CalendarApiConfig::default()
        })
    }

    /// GET an endpoint and unwrap the envelope. `Ok(None)` means not found.
    async fn fetch_data(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout: Option<Duration>,
    ) -> AppResult<Option<serde_json::Value>> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Aladhan request: {} {:?}", url, query);

        let mut request = self.client.get(&url).query(query);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::upstream(SERVICE, format!("request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                SERVICE,
                format!("HTTP {} - {}", status, body),
            ));
        }

        let envelope: AladhanEnvelope = response.json().await.map_err(|e| {
            AppError::UnexpectedPayload {
                service: SERVICE,
                message: format!("invalid JSON envelope: {}", e),
            }
        })?;

        match envelope.code {
            200 => Ok(Some(envelope.data)),
            404 => Ok(None),
            code => Err(AppError::upstream(
                SERVICE,
                format!("API code {}: {}", code, envelope.data),
            )),
        }
    }

    fn decode<T: DeserializeOwned>(data: serde_json::Value) -> AppResult<T> {
        serde_json::from_value(data).map_err(|e| AppError::UnexpectedPayload {
            service: SERVICE,
            message: e.to_string(),
        })
    }

    fn not_found(what: String) -> AppError {
        AppError::upstream(SERVICE, format!("{} not found", what))
    }
}

#[async_trait]
impl DateConversionProvider for AladhanClient {
    async fn gregorian_to_hijri(&self, date: NaiveDate) -> AppResult<HijriDate> {
        let api_date = to_api_date(date);
        let data = self
            .fetch_data("/gToH", &[("date", api_date.clone())], None)
            .await?
            .ok_or_else(|| Self::not_found(format!("conversion for {}", api_date)))?;

        let wire: WireConversion = Self::decode(data)?;
        wire.hijri.into_hijri().map_err(|message| AppError::UnexpectedPayload {
            service: SERVICE,
            message,
        })
    }

    async fn hijri_to_gregorian(&self, year: i32, month: u8, day: u8) -> AppResult<ConvertedDay> {
        let api_date = format!("{:02}-{:02}-{:04}", day, month, year);
        let data = self
            .fetch_data("/hToG", &[("date", api_date.clone())], None)
            .await?
            .ok_or_else(|| Self::not_found(format!("conversion for {} H", api_date)))?;

        let wire: WireConversion = Self::decode(data)?;
        wire.into_converted()
            .map_err(|message| AppError::UnexpectedPayload {
                service: SERVICE,
                message,
            })
    }

    async fn hijri_month_calendar(&self, year: i32, month: u8) -> AppResult<MonthFeed> {
        let path = format!("/hToGCalendar/{}/{}", year, month);
        let Some(data) = self.fetch_data(&path, &[], Some(self.month_timeout)).await? else {
            return Ok(MonthFeed::Gap);
        };

        let items: Vec<serde_json::Value> = Self::decode(data)?;
        let total = items.len();
        let days: Vec<ConvertedDay> = items
            .into_iter()
            .filter_map(|item| {
                serde_json::from_value::<WireConversion>(item)
                    .map_err(|e| e.to_string())
                    .and_then(WireConversion::into_converted)
                    .map_err(|e| {
                        tracing::warn!(year, month, "Dropping calendar entry: {}", e);
                    })
                    .ok()
            })
            .collect();

        if days.is_empty() {
            tracing::warn!(year, month, total, "Month calendar had no usable entries");
            return Ok(MonthFeed::Gap);
        }

        Ok(MonthFeed::Days(days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire_item() -> serde_json::Value {
        json!({
            "hijri": {
                "date": "01-09-1446",
                "day": "01",
                "weekday": {"en": "Al Sabt", "ar": "السبت"},
                "month": {"number": 9, "en": "Ramaḍān", "ar": "رَمَضان"},
                "year": "1446"
            },
            "gregorian": {
                "date": "01-03-2025",
                "weekday": {"en": "Saturday"}
            }
        })
    }

    #[test]
    fn test_wire_conversion_to_canonical() {
        let wire: WireConversion = serde_json::from_value(wire_item()).unwrap();
        let day = wire.into_converted().unwrap();
        assert_eq!(day.gregorian, "2025-03-01");
        assert_eq!(day.weekday, "Saturday");
        assert_eq!(day.hijri.day, 1);
        assert_eq!(day.hijri.month.number, 9);
        assert_eq!(day.hijri.month.name_en, "Ramaḍān");
        assert_eq!(day.hijri.weekday_ar.as_deref(), Some("السبت"));
    }

    #[test]
    fn test_wire_conversion_requires_weekday() {
        let mut item = wire_item();
        item["gregorian"]["weekday"]["en"] = json!("");
        let wire: WireConversion = serde_json::from_value(item).unwrap();
        assert!(wire.into_converted().is_err());
    }

    #[test]
    fn test_wire_hijri_rejects_bad_date() {
        let mut item = wire_item();
        item["hijri"]["date"] = json!("1446-09-01");
        let wire: WireConversion = serde_json::from_value(item).unwrap();
        assert!(wire.hijri.into_hijri().is_err());
    }
}
