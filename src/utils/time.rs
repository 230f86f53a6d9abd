use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Days, Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// This is the standard way of converting a date to a string in appstreak.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A local calendar day. Applications are grouped by this value and nothing else, so two records
/// fall on the same day exactly when their [CalendarDate]s are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd_opt(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Calendar day of `moment` in the local time zone.
    pub fn from_local(moment: DateTime<Local>) -> Self {
        Self(moment.date_naive())
    }

    /// Returns the day `days` before this one. Saturates at the earliest representable date, which
    /// is far outside of anything a person could have applied on.
    pub fn days_before(self, days: u32) -> Self {
        Self(
            self.0
                .checked_sub_days(Days::new(days.into()))
                .unwrap_or(NaiveDate::MIN),
        )
    }

    pub fn day_of_month(&self) -> u32 {
        self.0.day()
    }

    /// English short month name, `Jan` through `Dec`.
    pub fn month_label(&self) -> String {
        self.0.format("%b").to_string()
    }

    /// Human readable rendering, for example `Oct 9, 2026`. Display only.
    pub fn applied_label(&self) -> String {
        self.0.format("%b %-d, %Y").to_string()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_FORMAT).map(Self)
    }
}
