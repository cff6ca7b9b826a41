//! Calendar service: Hijri conversion and labeled year calendars
//!
//! Builds a year view month by month from the provider's calendar feed.
//! When the feed has no data for a month, only the days that can carry a
//! label (fixed events and the White Days) are reconstructed one by one.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use shared::calendar::{fallback_days, label_day, sort_days};
use shared::validation::validate_hijri_year;
use shared::{CalendarDay, ConvertedDay, HijriDate, LabelOptions, TodayView};

use crate::cache::{Cache, NoCache, TtlCache};
use crate::error::{AppError, AppResult};
use crate::external::{DateConversionProvider, MonthFeed};

/// Caches used by the calendar service, keyed by request parameters
#[derive(Clone)]
pub struct CalendarCaches {
    /// Gregorian → Hijri single-day conversions
    pub conversions: Arc<dyn Cache<NaiveDate, HijriDate>>,
    /// Hijri → Gregorian single-day conversions, keyed by (year, month, day)
    pub hijri_days: Arc<dyn Cache<(i32, u8, u8), ConvertedDay>>,
    /// Month feeds, gaps included, keyed by (year, month)
    pub months: Arc<dyn Cache<(i32, u8), MonthFeed>>,
    /// Finished year calendars
    pub years: Arc<dyn Cache<(i32, LabelOptions), Vec<CalendarDay>>>,
}

impl CalendarCaches {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            conversions: Arc::new(TtlCache::new(ttl)),
            hijri_days: Arc::new(TtlCache::new(ttl)),
            months: Arc::new(TtlCache::new(ttl)),
            years: Arc::new(TtlCache::new(ttl)),
        }
    }

    /// Every request goes to the provider
    pub fn disabled() -> Self {
        Self {
            conversions: Arc::new(NoCache),
            hijri_days: Arc::new(NoCache),
            months: Arc::new(NoCache),
            years: Arc::new(NoCache),
        }
    }
}

/// Calendar service
#[derive(Clone)]
pub struct CalendarService {
    provider: Arc<dyn DateConversionProvider>,
    caches: CalendarCaches,
}

impl CalendarService {
    /// Create a new CalendarService caching upstream data for `ttl`
    pub fn new(provider: Arc<dyn DateConversionProvider>, ttl: Duration) -> Self {
        Self::with_caches(provider, CalendarCaches::with_ttl(ttl))
    }

    pub fn with_caches(provider: Arc<dyn DateConversionProvider>, caches: CalendarCaches) -> Self {
        Self { provider, caches }
    }

    /// Convert one Gregorian date to Hijri. Provider failures are returned,
    /// never swallowed.
    pub async fn convert_gregorian_to_hijri(&self, date: NaiveDate) -> AppResult<HijriDate> {
        if let Some(hijri) = self.caches.conversions.get(&date) {
            return Ok(hijri);
        }

        let hijri = self.provider.gregorian_to_hijri(date).await?;
        self.caches.conversions.insert(date, hijri.clone());
        Ok(hijri)
    }

    /// Hijri date and labels for the given day
    pub async fn today(&self, date: NaiveDate) -> AppResult<TodayView> {
        let hijri = self.convert_gregorian_to_hijri(date).await?;
        let weekday = date.format("%A").to_string();
        let labels = label_day(
            hijri.day,
            hijri.month.number,
            &weekday,
            LabelOptions::default(),
        );

        Ok(TodayView {
            gregorian: date,
            hijri,
            labels,
        })
    }

    /// Labeled calendar for a whole Hijri year, sorted by Gregorian date
    pub async fn build_year_calendar(
        &self,
        hijri_year: i32,
        include_weekly_fasts: bool,
        include_tasua: bool,
    ) -> AppResult<Vec<CalendarDay>> {
        validate_hijri_year(hijri_year).map_err(|e| AppError::validation("hijri_year", e))?;

        let options = LabelOptions::new(include_weekly_fasts, include_tasua);
        let key = (hijri_year, options);
        if let Some(days) = self.caches.years.get(&key) {
            return Ok(days);
        }

        let mut days = Vec::new();
        for month in 1..=12u8 {
            let converted = self.month_days(hijri_year, month).await?;
            days.extend(
                converted
                    .into_iter()
                    .map(|day| CalendarDay::new(day, options)),
            );
        }

        if days.is_empty() {
            return Err(AppError::CalendarUnavailable(hijri_year));
        }

        sort_days(&mut days);
        tracing::info!(
            "Built calendar for {} H: {} days, {} labeled",
            hijri_year,
            days.len(),
            days.iter().filter(|d| d.is_labeled()).count()
        );

        self.caches.years.insert(key, days.clone());
        Ok(days)
    }

    /// Days of one month, from the feed or reconstructed around a gap
    async fn month_days(&self, year: i32, month: u8) -> AppResult<Vec<ConvertedDay>> {
        let feed = match self.caches.months.get(&(year, month)) {
            Some(feed) => feed,
            None => {
                let feed = self.provider.hijri_month_calendar(year, month).await?;
                self.caches.months.insert((year, month), feed.clone());
                feed
            }
        };

        match feed {
            MonthFeed::Days(days) => Ok(days),
            MonthFeed::Gap => {
                tracing::warn!(
                    "No calendar for {}/{} H upstream, reconstructing labeled days",
                    month,
                    year
                );
                Ok(self.reconstruct_month(year, month).await)
            }
        }
    }

    /// One conversion per fixed-event day and White Day; failed days are skipped
    async fn reconstruct_month(&self, year: i32, month: u8) -> Vec<ConvertedDay> {
        let mut days = Vec::new();

        for day in fallback_days(month) {
            let key = (year, month, day);
            if let Some(converted) = self.caches.hijri_days.get(&key) {
                days.push(converted);
                continue;
            }

            match self.provider.hijri_to_gregorian(year, month, day).await {
                Ok(converted) => {
                    self.caches.hijri_days.insert(key, converted.clone());
                    days.push(converted);
                }
                Err(e) => {
                    tracing::warn!("Skipping {:02}-{:02}-{} H: {}", day, month, year, e);
                }
            }
        }

        days
    }
}
