//! Hijri calendar models

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{dates, rules};
use crate::types::Language;
use crate::validation::{validate_hijri_day, validate_hijri_month, validate_hijri_year};

/// English transliterations of the twelve Hijri months (index 0 = Muharram)
pub const HIJRI_MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

/// Canonical English name for a Hijri month number (1-12)
pub fn hijri_month_name(number: u8) -> &'static str {
    match number {
        1..=12 => HIJRI_MONTH_NAMES[usize::from(number) - 1],
        _ => "Unknown",
    }
}

/// A Hijri month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HijriMonth {
    pub number: u8,
    pub name_en: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
}

/// A date in the Hijri calendar.
///
/// `day`, `month.number` and `year` always mirror the `DD-MM-YYYY` text in
/// `date`; both constructors and deserialization enforce this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawHijriDate")]
pub struct HijriDate {
    pub date: String,
    pub day: u8,
    pub month: HijriMonth,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday_ar: Option<String>,
}

/// Unchecked serialized form of [`HijriDate`]
#[derive(Deserialize)]
struct RawHijriDate {
    date: String,
    day: u8,
    month: HijriMonth,
    year: i32,
    weekday_en: Option<String>,
    weekday_ar: Option<String>,
}

impl TryFrom<RawHijriDate> for HijriDate {
    type Error = String;

    fn try_from(raw: RawHijriDate) -> Result<Self, Self::Error> {
        let parsed = HijriDate::parse(&raw.date).map_err(|e| format!("{:?}: {}", raw.date, e))?;
        if (parsed.day, parsed.month.number, parsed.year) != (raw.day, raw.month.number, raw.year) {
            return Err(format!(
                "Hijri fields {}/{}/{} do not match date {:?}",
                raw.day, raw.month.number, raw.year, raw.date
            ));
        }

        Ok(parsed
            .with_month_names(Some(raw.month.name_en), raw.month.name_ar)
            .with_weekday(raw.weekday_en, raw.weekday_ar))
    }
}

impl HijriDate {
    /// Build a date from its numeric fields
    pub fn from_parts(day: u8, month: u8, year: i32) -> Result<Self, &'static str> {
        validate_hijri_day(day)?;
        validate_hijri_month(month)?;
        validate_hijri_year(year)?;

        Ok(Self {
            date: format!("{:02}-{:02}-{:04}", day, month, year),
            day,
            month: HijriMonth {
                number: month,
                name_en: hijri_month_name(month).to_string(),
                name_ar: None,
            },
            year,
            weekday_en: None,
            weekday_ar: None,
        })
    }

    /// Parse a `DD-MM-YYYY` Hijri date string
    pub fn parse(date: &str) -> Result<Self, &'static str> {
        let mut parts = date.trim().split('-');
        let (Some(day), Some(month), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err("Hijri date must be in DD-MM-YYYY format");
        };

        let day: u8 = day.parse().map_err(|_| "Hijri day is not a number")?;
        let month: u8 = month.parse().map_err(|_| "Hijri month is not a number")?;
        let year: i32 = year.parse().map_err(|_| "Hijri year is not a number")?;

        Self::from_parts(day, month, year)
    }

    /// Replace the default month names with the ones supplied upstream
    pub fn with_month_names(mut self, name_en: Option<String>, name_ar: Option<String>) -> Self {
        if let Some(name) = name_en.filter(|n| !n.trim().is_empty()) {
            self.month.name_en = name;
        }
        self.month.name_ar = name_ar;
        self
    }

    pub fn with_weekday(mut self, weekday_en: Option<String>, weekday_ar: Option<String>) -> Self {
        self.weekday_en = weekday_en;
        self.weekday_ar = weekday_ar;
        self
    }

    /// Human readable form, e.g. `الاثنين, 01-09-1446 Ramadan H`
    pub fn display(&self) -> String {
        match self.weekday_ar.as_deref().or(self.weekday_en.as_deref()) {
            Some(weekday) => format!("{}, {} {} H", weekday, self.date, self.month.name_en),
            None => format!("{} {} H", self.date, self.month.name_en),
        }
    }
}

/// One day as delivered by the date conversion provider, already validated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConvertedDay {
    /// Gregorian date, normalized to `YYYY-MM-DD` when recognizable
    pub gregorian: String,
    /// English weekday name
    pub weekday: String,
    pub hijri: HijriDate,
}

/// Event and recommended-fast tags attached to a calendar day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DayLabel {
    StartOfRamadan,
    NuzulQuran,
    IsraMiraj,
    MawlidNabi,
    EidAlFitr,
    Tarwiyah,
    Arafah,
    EidAlAdha,
    Ashura,
    Tasua,
    WhiteDays,
    MondayFast,
    ThursdayFast,
}

impl DayLabel {
    pub fn name(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.name_en(),
            Language::Indonesian => self.name_id(),
        }
    }

    fn name_en(&self) -> &'static str {
        match self {
            DayLabel::StartOfRamadan => "Start of Ramadan",
            DayLabel::NuzulQuran => "Nuzul al-Qur'an",
            DayLabel::IsraMiraj => "Isra' Mi'raj",
            DayLabel::MawlidNabi => "Mawlid an-Nabi",
            DayLabel::EidAlFitr => "Eid al-Fitr",
            DayLabel::Tarwiyah => "Day of Tarwiyah",
            DayLabel::Arafah => "Day of Arafah",
            DayLabel::EidAlAdha => "Eid al-Adha",
            DayLabel::Ashura => "Ashura (10 Muharram)",
            DayLabel::Tasua => "Tasu'a (9 Muharram)",
            DayLabel::WhiteDays => "White Days fast (13-15)",
            DayLabel::MondayFast => "Monday fast",
            DayLabel::ThursdayFast => "Thursday fast",
        }
    }

    fn name_id(&self) -> &'static str {
        match self {
            DayLabel::StartOfRamadan => "Awal Ramadhan",
            DayLabel::NuzulQuran => "Nuzulul Qur'an",
            DayLabel::IsraMiraj => "Isra' Mi'raj",
            DayLabel::MawlidNabi => "Maulid Nabi",
            DayLabel::EidAlFitr => "Idul Fitri",
            DayLabel::Tarwiyah => "Tarwiyah",
            DayLabel::Arafah => "Arafah",
            DayLabel::EidAlAdha => "Idul Adha",
            DayLabel::Ashura => "‘Āsyūrā’ (10 Muharram)",
            DayLabel::Tasua => "Tāsū‘ā (9 Muharram)",
            DayLabel::WhiteDays => "Ayyām al-Bīḍ (puasa 13–15)",
            DayLabel::MondayFast => "Puasa Senin",
            DayLabel::ThursdayFast => "Puasa Kamis",
        }
    }

    /// Whether this label marks a recommended fast rather than an event
    pub fn is_fast(&self) -> bool {
        matches!(
            self,
            DayLabel::WhiteDays | DayLabel::MondayFast | DayLabel::ThursdayFast
        )
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_en())
    }
}

/// Caller toggles for the optional label rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LabelOptions {
    /// Mark Monday and Thursday fasts
    pub include_weekly_fasts: bool,
    /// Mark Tasu'a (9 Muharram)
    pub include_tasua: bool,
}

impl LabelOptions {
    pub fn new(include_weekly_fasts: bool, include_tasua: bool) -> Self {
        Self {
            include_weekly_fasts,
            include_tasua,
        }
    }
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// One reconciled, labeled calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarDay {
    /// Gregorian date in `YYYY-MM-DD`, or the raw upstream text if unrecognized
    pub gregorian: String,
    pub weekday: String,
    pub hijri: HijriDate,
    pub labels: Vec<DayLabel>,
}

impl CalendarDay {
    /// Label a converted day
    pub fn new(converted: ConvertedDay, options: LabelOptions) -> Self {
        let labels = rules::label_day(
            converted.hijri.day,
            converted.hijri.month.number,
            &converted.weekday,
            options,
        );

        Self {
            gregorian: dates::normalize_gregorian(&converted.gregorian),
            weekday: converted.weekday,
            hijri: converted.hijri,
            labels,
        }
    }

    pub fn hijri_day(&self) -> u8 {
        self.hijri.day
    }

    pub fn hijri_month_number(&self) -> u8 {
        self.hijri.month.number
    }

    pub fn hijri_month_name(&self) -> &str {
        &self.hijri.month.name_en
    }

    pub fn gregorian_date(&self) -> Option<NaiveDate> {
        dates::parse_gregorian(&self.gregorian)
    }

    /// Ordering key; unparseable dates sort after every real date
    pub fn sort_key(&self) -> NaiveDate {
        self.gregorian_date().unwrap_or(NaiveDate::MAX)
    }

    pub fn is_labeled(&self) -> bool {
        !self.labels.is_empty()
    }

    pub fn first_label(&self) -> Option<DayLabel> {
        self.labels.first().copied()
    }

    /// English label names joined with `", "`
    pub fn labels_joined(&self) -> String {
        self.labels_joined_in(Language::English)
    }

    pub fn labels_joined_in(&self, language: Language) -> String {
        self.labels
            .iter()
            .map(|l| l.name(language))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A labeled day on or after a reference date
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpcomingDay {
    #[serde(flatten)]
    pub day: CalendarDay,
    pub days_left: i64,
}

impl UpcomingDay {
    pub fn is_today(&self) -> bool {
        self.days_left == 0
    }
}

/// The "today" header of the calendar view
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TodayView {
    pub gregorian: NaiveDate,
    pub hijri: HijriDate,
    pub labels: Vec<DayLabel>,
}

impl TodayView {
    /// Hijri years offered for browsing around the current one
    pub fn selectable_years(&self, radius: i32) -> std::ops::RangeInclusive<i32> {
        (self.hijri.year - radius).max(1)..=self.hijri.year + radius
    }

    pub fn display(&self) -> String {
        self.hijri.display()
    }
}
