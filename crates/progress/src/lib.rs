//! Weight progress engine.
//!
//! Pure domain logic only: no IO, no clock reads, no persistence concerns.
//! Callers hand in a snapshot of the user's entries and get derived views
//! (chart series, goal progress, change ledger) or a new snapshot to persist.

pub mod chart;
pub mod entry;
pub mod goal;
pub mod ledger;
pub mod weight;

pub use chart::{
    chart_series, week_of_month, ChartBucket, Granularity, MonthWindow, SeriesSummary, TimeRange,
    MIN_SERIES_POINTS,
};
pub use entry::{WeightEntry, WeightHistory};
pub use goal::{
    goal_achievement_transition, goal_progress, AchievementWatch, GoalDirection, GoalProgress,
    GoalState,
};
pub use ledger::{delta_ledger, LedgerRow, Trend};
pub use weight::Weight;

use abal_core::CalendarDate;

impl WeightHistory {
    pub fn chart_series(&self, granularity: Granularity, today: CalendarDate) -> Vec<ChartBucket> {
        chart_series(self.entries(), granularity, today)
    }

    pub fn goal_state(&self, goal_weight: Option<Weight>) -> GoalState {
        GoalState::from_entries(self.entries(), goal_weight)
    }

    pub fn delta_ledger(&self) -> Vec<LedgerRow> {
        delta_ledger(self.entries())
    }
}
