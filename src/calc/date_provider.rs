use crate::data::AppSettings;
use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};
use std::fmt::Write;
use tracing::warn;

/// Date parsing, formatting and calendar arithmetic used by the picker.
///
/// The picker never does month arithmetic or formatting itself; swapping the
/// provider changes locale behavior (week start, names, display format).
pub trait DateProvider {
    fn today(&self) -> NaiveDate;

    /// `None` when `text` is not a valid date under `format`.
    fn parse(&self, text: &str, format: &str) -> Option<NaiveDate>;

    fn format(&self, date: NaiveDate, pattern: &str) -> String;

    /// Adds (or subtracts, for negative `months`) whole months, clamping the day.
    fn add_months(&self, date: NaiveDate, months: i32) -> NaiveDate;

    fn add_days(&self, date: NaiveDate, days: i64) -> NaiveDate;

    /// Sets the month (0-based) keeping the year, clamping the day.
    fn with_month(&self, date: NaiveDate, month0: u32) -> NaiveDate;

    fn start_of_month(&self, date: NaiveDate) -> NaiveDate;

    fn start_of_week(&self, date: NaiveDate) -> NaiveDate;

    /// Seven short weekday names beginning at the locale week start.
    fn weekday_names(&self) -> Vec<String>;

    fn month_names(&self) -> Vec<String>;

    /// The display pattern for dates typed into or written to the input.
    fn long_date_format(&self) -> &str;
}

const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone, Debug)]
pub struct ChronoProvider {
    date_format: String,
    week_start: Weekday,
    pinned_today: Option<NaiveDate>,
}

impl ChronoProvider {
    pub fn new(date_format: impl Into<String>, week_start: Weekday) -> Self {
        ChronoProvider {
            date_format: date_format.into(),
            week_start,
            pinned_today: None,
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.date_format.clone(), settings.week_start.weekday())
    }

    /// Fixes "today" so grids are reproducible.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.pinned_today = Some(today);
        self
    }

}

/// True when the whole grid around `date` stays inside chrono's range.
///
/// The first and last representable years are excluded: a grid reaches at
/// most six days into a neighbouring month, so one year of margin is enough.
pub fn in_supported_range(date: NaiveDate) -> bool {
    date.year() > NaiveDate::MIN.year() && date.year() < NaiveDate::MAX.year()
}

impl Default for ChronoProvider {
    fn default() -> Self {
        Self::from_settings(&AppSettings::default())
    }
}

impl DateProvider for ChronoProvider {
    fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn parse(&self, text: &str, format: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(text, format)
            .ok()
            .filter(|date| in_supported_range(*date))
    }

    /// Falls back to ISO 8601 when `pattern` holds items a date can't render.
    fn format(&self, date: NaiveDate, pattern: &str) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(pattern)).is_err() {
            warn!("date pattern '{pattern}' cannot format {date}");
            return date.to_string();
        }
        out
    }

    fn add_months(&self, date: NaiveDate, months: i32) -> NaiveDate {
        let shifted = if months >= 0 {
            date.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            date.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.filter(|d| in_supported_range(*d)).unwrap_or(date)
    }

    fn add_days(&self, date: NaiveDate, days: i64) -> NaiveDate {
        let shifted = if days >= 0 {
            date.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            date.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted.unwrap_or(date)
    }

    fn with_month(&self, date: NaiveDate, month0: u32) -> NaiveDate {
        let month0 = month0.min(11);
        let current = date.month0() as i32;
        self.add_months(date, month0 as i32 - current)
    }

    fn start_of_month(&self, date: NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(date)
    }

    fn start_of_week(&self, date: NaiveDate) -> NaiveDate {
        let back = (7 + date.weekday().num_days_from_monday()
            - self.week_start.num_days_from_monday())
            % 7;
        date.checked_sub_days(Days::new(u64::from(back)))
            .unwrap_or(date)
    }

    fn weekday_names(&self) -> Vec<String> {
        let mut day = self.week_start;
        let mut names = Vec::with_capacity(7);
        for _ in 0..7 {
            names.push(day.to_string());
            day = day.succ();
        }
        names
    }

    fn month_names(&self) -> Vec<String> {
        SHORT_MONTHS.iter().map(|m| m.to_string()).collect()
    }

    fn long_date_format(&self) -> &str {
        &self.date_format
    }
}
