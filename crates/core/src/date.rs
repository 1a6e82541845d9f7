//! Calendar dates without a time-of-day component.

use core::str::FromStr;

use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

const ISO_FORMAT: &str = "%Y-%m-%d";

/// A calendar day, canonically written as `YYYY-MM-DD`.
///
/// Dates carry no timezone. Ordering is chronological.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl ValueObject for CalendarDate {}

impl CalendarDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today according to the local clock.
    ///
    /// Only call sites at the edge (store, CLI) should read the clock; the
    /// aggregation functions take `today` as an argument.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// The date `n` days earlier, saturating at the earliest representable date.
    pub fn days_ago(&self, n: u64) -> Self {
        Self(self.0.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN))
    }

    /// The same day-of-month `n` months earlier (clamped to month end).
    pub fn months_ago(&self, n: u32) -> Self {
        Self(self.0.checked_sub_months(Months::new(n)).unwrap_or(NaiveDate::MIN))
    }

    /// First day of this date's month.
    pub fn first_of_month(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Format with a chrono strftime pattern (labels, display).
    pub fn format(&self, pattern: &str) -> String {
        self.0.format(pattern).to_string()
    }
}

impl core::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // chrono accepts unpadded fields; the canonical form is exactly 10 chars.
        if trimmed.len() != 10 {
            return Err(DomainError::validation(format!("date must be YYYY-MM-DD, got '{s}'")));
        }
        NaiveDate::parse_from_str(trimmed, ISO_FORMAT)
            .map(Self)
            .map_err(|e| DomainError::validation(format!("unparseable date '{s}': {e}")))
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(value: CalendarDate) -> Self {
        value.to_string()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}
