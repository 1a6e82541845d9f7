//! Time-bucketed chart series over a weight history.
//!
//! Every function here is pure. "Today" is passed in by the caller and only
//! anchors the filter window, so repeated calls with the same arguments give
//! identical output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use abal_core::{CalendarDate, DomainError};

use crate::entry::WeightEntry;

/// A series with fewer points than this cannot define a trend line.
pub const MIN_SERIES_POINTS: usize = 2;

const DAY_WINDOW_DAYS: u64 = 7;
const WEEK_WINDOW_DAYS: u64 = 30;
const QUARTER_WINDOW_DAYS: u64 = 90;

/// One aggregated point of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBucket {
    pub label: String,
    pub value: f64,
}

/// How far back a monthly series reaches.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthWindow {
    Quarter,
    Year,
    All,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Last 7 days, one point per date (last write wins).
    Day,
    /// Last 30 days, mean per week-of-month.
    Week,
    /// Mean per calendar month over the given window.
    Month(MonthWindow),
}

/// The range picker offered next to the weight chart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7days")]
    SevenDays,
    #[serde(rename = "30days")]
    ThirtyDays,
    #[serde(rename = "90days")]
    NinetyDays,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    pub const ALL: [TimeRange; 5] = [
        TimeRange::SevenDays,
        TimeRange::ThirtyDays,
        TimeRange::NinetyDays,
        TimeRange::Year,
        TimeRange::All,
    ];

    pub fn granularity(self) -> Granularity {
        match self {
            TimeRange::SevenDays => Granularity::Day,
            TimeRange::ThirtyDays => Granularity::Week,
            TimeRange::NinetyDays => Granularity::Month(MonthWindow::Quarter),
            TimeRange::Year => Granularity::Month(MonthWindow::Year),
            TimeRange::All => Granularity::Month(MonthWindow::All),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::SevenDays => "7 Days",
            TimeRange::ThirtyDays => "30 Days",
            TimeRange::NinetyDays => "90 Days",
            TimeRange::Year => "1 Year",
            TimeRange::All => "All Time",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            TimeRange::SevenDays => "7days",
            TimeRange::ThirtyDays => "30days",
            TimeRange::NinetyDays => "90days",
            TimeRange::Year => "year",
            TimeRange::All => "all",
        }
    }
}

impl core::str::FromStr for TimeRange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::ALL
            .into_iter()
            .find(|r| r.key() == s.trim())
            .ok_or_else(|| DomainError::validation(format!("unknown time range '{s}'")))
    }
}

impl core::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

/// Build the chart series for `granularity`, anchored on `today`.
///
/// Returns an empty vector when aggregation yields fewer than
/// [`MIN_SERIES_POINTS`] buckets; callers render an empty state instead.
pub fn chart_series(
    entries: &[WeightEntry],
    granularity: Granularity,
    today: CalendarDate,
) -> Vec<ChartBucket> {
    let buckets = match granularity {
        Granularity::Day => daily(entries, today),
        Granularity::Week => weekly(entries, today),
        Granularity::Month(window) => monthly(entries, window, today),
    };

    if buckets.len() < MIN_SERIES_POINTS {
        return Vec::new();
    }
    buckets
}

/// Week number within the month: `ceil((day + weekday_of_first) / 7)` with
/// Sunday = 0.
///
/// This resets at month boundaries and is not an ISO week; a 30-day window
/// spanning two months folds equal week numbers into one bucket.
pub fn week_of_month(date: CalendarDate) -> u32 {
    let offset = date.first_of_month().weekday().num_days_from_sunday();
    (date.day() + offset).div_ceil(7)
}

fn in_window(date: CalendarDate, start: CalendarDate, today: CalendarDate) -> bool {
    date >= start && date <= today
}

fn daily(entries: &[WeightEntry], today: CalendarDate) -> Vec<ChartBucket> {
    let start = today.days_ago(DAY_WINDOW_DAYS - 1);

    // Keyed by date: a later entry in input order replaces an earlier one.
    let mut by_date: BTreeMap<CalendarDate, f64> = BTreeMap::new();
    for entry in entries.iter().filter(|e| in_window(e.date, start, today)) {
        by_date.insert(entry.date, entry.weight.value());
    }

    by_date
        .into_iter()
        .map(|(date, value)| ChartBucket {
            label: date.format("%b %-d"),
            value,
        })
        .collect()
}

fn weekly(entries: &[WeightEntry], today: CalendarDate) -> Vec<ChartBucket> {
    let start = today.days_ago(WEEK_WINDOW_DAYS - 1);

    let mut by_week: BTreeMap<u32, Mean> = BTreeMap::new();
    for entry in entries.iter().filter(|e| in_window(e.date, start, today)) {
        by_week
            .entry(week_of_month(entry.date))
            .or_default()
            .push(entry.weight.value());
    }

    by_week
        .into_iter()
        .map(|(week, mean)| ChartBucket {
            label: format!("Week {week}"),
            value: mean.value(),
        })
        .collect()
}

fn monthly(entries: &[WeightEntry], window: MonthWindow, today: CalendarDate) -> Vec<ChartBucket> {
    let start = match window {
        MonthWindow::Quarter => Some(today.days_ago(QUARTER_WINDOW_DAYS - 1)),
        MonthWindow::Year => Some(today.months_ago(12)),
        MonthWindow::All => None,
    };

    let mut by_month: BTreeMap<CalendarDate, Mean> = BTreeMap::new();
    for entry in entries {
        if let Some(start) = start {
            if !in_window(entry.date, start, today) {
                continue;
            }
        }
        by_month
            .entry(entry.date.first_of_month())
            .or_default()
            .push(entry.weight.value());
    }

    by_month
        .into_iter()
        .map(|(month, mean)| ChartBucket {
            label: month.format("%b"),
            value: mean.value(),
        })
        .collect()
}

#[derive(Debug, Default)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> f64 {
        self.sum / f64::from(self.count.max(1))
    }
}

/// First/last values of a rendered series and the change between them.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub first: f64,
    pub last: f64,
    pub change: f64,
}

impl SeriesSummary {
    pub fn from_series(series: &[ChartBucket]) -> Option<Self> {
        let first = series.first()?.value;
        let last = series.last()?.value;
        Some(Self {
            first,
            last,
            change: last - first,
        })
    }
}
