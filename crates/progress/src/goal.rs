//! Goal progress and achievement detection.

use serde::{Deserialize, Serialize};

use crate::entry::WeightEntry;
use crate::weight::Weight;

/// Which way the user has to move to reach the goal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalDirection {
    Losing,
    Gaining,
}

/// Progress toward the goal weight.
///
/// `NoGoal` means there is nothing to measure (no goal or no history); it is
/// distinct from `Tracking` at 0%.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GoalProgress {
    NoGoal,
    Tracking {
        /// In `[0, 100]`.
        percentage: f64,
        is_achieved: bool,
        direction: GoalDirection,
    },
}

impl GoalProgress {
    pub fn is_achieved(&self) -> bool {
        matches!(self, GoalProgress::Tracking { is_achieved: true, .. })
    }

    pub fn percentage(&self) -> Option<f64> {
        match self {
            GoalProgress::NoGoal => None,
            GoalProgress::Tracking { percentage, .. } => Some(*percentage),
        }
    }

    pub fn direction(&self) -> Option<GoalDirection> {
        match self {
            GoalProgress::NoGoal => None,
            GoalProgress::Tracking { direction, .. } => Some(*direction),
        }
    }
}

/// Share of the start-to-goal distance closed by the latest weight.
///
/// Moving away from the goal floors at 0%. A start that already equals the
/// goal counts as 100% and achieved.
pub fn goal_progress(
    start: Option<Weight>,
    latest: Option<Weight>,
    goal: Option<Weight>,
) -> GoalProgress {
    let (Some(start), Some(latest), Some(goal)) = (start, latest, goal) else {
        return GoalProgress::NoGoal;
    };
    let (start, latest, goal) = (start.value(), latest.value(), goal.value());

    let direction = if start > goal {
        GoalDirection::Losing
    } else {
        GoalDirection::Gaining
    };

    let total_change = (start - goal).abs();
    if total_change == 0.0 {
        return GoalProgress::Tracking {
            percentage: 100.0,
            is_achieved: true,
            direction,
        };
    }

    let (is_achieved, wrong_way) = match direction {
        GoalDirection::Losing => (latest <= goal, latest > start),
        GoalDirection::Gaining => (latest >= goal, latest < start),
    };

    let percentage = if wrong_way {
        0.0
    } else {
        ((start - latest).abs() / total_change * 100.0).clamp(0.0, 100.0)
    };

    GoalProgress::Tracking {
        percentage,
        is_achieved,
        direction,
    }
}

/// Rising edge of "goal achieved" between two latest weights.
///
/// True only when `current_latest` achieves the goal and `previous_latest`
/// did not (or was absent). Staying at or past the goal does not fire again.
pub fn goal_achievement_transition(
    previous_latest: Option<Weight>,
    current_latest: Option<Weight>,
    goal: Option<Weight>,
    start: Option<Weight>,
) -> bool {
    let now = goal_progress(start, current_latest, goal).is_achieved();
    let before = goal_progress(start, previous_latest, goal).is_achieved();
    now && !before
}

/// Goal inputs derived from a history snapshot. Never persisted.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalState {
    pub goal_weight: Option<Weight>,
    pub start_weight: Option<Weight>,
    pub latest_weight: Option<Weight>,
}

impl GoalState {
    /// Derive from entries in any order.
    ///
    /// On a shared date the first entry in input order is the start and the
    /// last one is the latest.
    pub fn from_entries(entries: &[WeightEntry], goal_weight: Option<Weight>) -> Self {
        Self {
            goal_weight,
            start_weight: entries.iter().min_by_key(|e| e.date).map(|e| e.weight),
            latest_weight: entries.iter().max_by_key(|e| e.date).map(|e| e.weight),
        }
    }

    pub fn progress(&self) -> GoalProgress {
        goal_progress(self.start_weight, self.latest_weight, self.goal_weight)
    }

    /// Distance still to cover, `None` without a goal or history.
    pub fn remaining(&self) -> Option<f64> {
        let latest = self.latest_weight?;
        let goal = self.goal_weight?;
        if self.progress().is_achieved() {
            return Some(0.0);
        }
        Some((latest.value() - goal.value()).abs())
    }
}

/// One-element memory for [`goal_achievement_transition`].
///
/// Holds the latest weight seen at the previous observation; the caller keeps
/// one watch per session.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct AchievementWatch {
    previous_latest: Option<Weight>,
}

impl AchievementWatch {
    /// Seed with the state at session start so loading never fires.
    pub fn seeded(state: &GoalState) -> Self {
        Self {
            previous_latest: state.latest_weight,
        }
    }

    /// Record `state` and report whether it crossed into "achieved".
    pub fn observe(&mut self, state: &GoalState) -> bool {
        let fired = goal_achievement_transition(
            self.previous_latest,
            state.latest_weight,
            state.goal_weight,
            state.start_weight,
        );
        self.previous_latest = state.latest_weight;
        fired
    }
}
