//! Test doubles for the external providers

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use islamichat_backend::external::{
    DateConversionProvider, GeocodedPlace, GeocodingProvider, MonthFeed,
};
use islamichat_backend::{AppError, AppResult};
use shared::calendar::to_api_date;
use shared::{ConvertedDay, GeoPoint, HijriDate};

/// Provider calls recorded by the fakes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GregorianToHijri(NaiveDate),
    HijriToGregorian(i32, u8, u8),
    MonthCalendar(i32, u8),
}

/// Tabular calendar: odd months have 30 days, even months 29, and
/// 1 Muharram of `year` falls on `new_year`
pub struct FakeCalendar {
    pub year: i32,
    pub new_year: NaiveDate,
    pub gap_months: HashSet<u8>,
    pub failing_months: HashSet<u8>,
    pub failing_days: HashSet<(u8, u8)>,
    pub conversion_down: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeCalendar {
    pub fn new(year: i32, new_year: NaiveDate) -> Self {
        Self {
            year,
            new_year,
            gap_months: HashSet::new(),
            failing_months: HashSet::new(),
            failing_days: HashSet::new(),
            conversion_down: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 1447 H, starting 26 June 2025
    pub fn year_1447() -> Self {
        Self::new(1447, NaiveDate::from_ymd_opt(2025, 6, 26).unwrap())
    }

    pub fn with_gaps(mut self, months: &[u8]) -> Self {
        self.gap_months.extend(months);
        self
    }

    pub fn with_failing_months(mut self, months: &[u8]) -> Self {
        self.failing_months.extend(months);
        self
    }

    pub fn with_failing_days(mut self, days: &[(u8, u8)]) -> Self {
        self.failing_days.extend(days);
        self
    }

    pub fn with_conversion_down(mut self) -> Self {
        self.conversion_down = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn single_day_calls_for(&self, month: u8) -> usize {
        self.count(|c| matches!(c, Call::HijriToGregorian(_, m, _) if *m == month))
    }

    pub fn month_length(month: u8) -> u8 {
        if month % 2 == 1 {
            30
        } else {
            29
        }
    }

    pub fn gregorian_for(&self, month: u8, day: u8) -> NaiveDate {
        let offset: i64 = (1..month)
            .map(|m| i64::from(Self::month_length(m)))
            .sum::<i64>()
            + i64::from(day)
            - 1;
        self.new_year + Duration::days(offset)
    }

    /// Converted day; even months report Gregorian dates day-first like the API
    pub fn converted(&self, month: u8, day: u8) -> ConvertedDay {
        let date = self.gregorian_for(month, day);
        let gregorian = if month % 2 == 0 {
            to_api_date(date)
        } else {
            date.format("%Y-%m-%d").to_string()
        };

        ConvertedDay {
            gregorian,
            weekday: date.format("%A").to_string(),
            hijri: HijriDate::from_parts(day, month, self.year).unwrap(),
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DateConversionProvider for FakeCalendar {
    async fn gregorian_to_hijri(&self, date: NaiveDate) -> AppResult<HijriDate> {
        self.record(Call::GregorianToHijri(date));
        if self.conversion_down {
            return Err(AppError::upstream("Fake", "connection refused"));
        }

        let offset = (date - self.new_year).num_days();
        let mut remaining = offset;
        for month in 1..=12u8 {
            let len = i64::from(Self::month_length(month));
            if (0..len).contains(&remaining) {
                let day = u8::try_from(remaining + 1).unwrap();
                return Ok(HijriDate::from_parts(day, month, self.year)
                    .unwrap()
                    .with_weekday(Some(date.format("%A").to_string()), None));
            }
            remaining -= len;
        }
        Err(AppError::upstream("Fake", format!("{} outside fake year", date)))
    }

    async fn hijri_to_gregorian(&self, year: i32, month: u8, day: u8) -> AppResult<ConvertedDay> {
        self.record(Call::HijriToGregorian(year, month, day));
        if year != self.year || self.failing_days.contains(&(month, day)) {
            return Err(AppError::upstream("Fake", "timeout"));
        }
        Ok(self.converted(month, day))
    }

    async fn hijri_month_calendar(&self, year: i32, month: u8) -> AppResult<MonthFeed> {
        self.record(Call::MonthCalendar(year, month));
        if self.failing_months.contains(&month) {
            return Err(AppError::upstream("Fake", "HTTP 500"));
        }
        if year != self.year || self.gap_months.contains(&month) {
            return Ok(MonthFeed::Gap);
        }

        Ok(MonthFeed::Days(
            (1..=Self::month_length(month))
                .map(|day| self.converted(month, day))
                .collect(),
        ))
    }
}

/// Geocoder answering from a fixed table
pub struct FakeGeocoder {
    places: HashMap<String, GeocodedPlace>,
    pub down: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        let mut places = HashMap::new();
        places.insert(
            "palembang".to_string(),
            GeocodedPlace {
                point: GeoPoint::new(-2.990934, 104.756554),
                display_address: "Palembang, Sumatera Selatan, Indonesia".to_string(),
            },
        );
        places.insert(
            "london".to_string(),
            GeocodedPlace {
                point: GeoPoint::new(51.5074, -0.1278),
                display_address: "London, Greater London, England, United Kingdom".to_string(),
            },
        );

        Self {
            places,
            down: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            down: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeocodingProvider for FakeGeocoder {
    async fn geocode(&self, query: &str) -> AppResult<Option<GeocodedPlace>> {
        self.calls.lock().unwrap().push(query.to_string());
        if self.down {
            return Err(AppError::upstream("Fake", "connection refused"));
        }
        Ok(self.places.get(&query.to_lowercase()).cloned())
    }
}
