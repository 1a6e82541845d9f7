//! Per-user progress session over a key-value store.
//!
//! `ProgressStore` is the explicit replacement for app-wide mutable state: the
//! caller owns one per signed-in user, it loads once on start and writes back
//! after every mutation. All derived views come from `abal-progress`.

use tracing::{debug, info, warn};

use abal_core::{CalendarDate, EntryId};
use abal_progress::{
    AchievementWatch, ChartBucket, GoalProgress, GoalState, LedgerRow, TimeRange, Weight,
    WeightEntry, WeightHistory,
};

use crate::kv_store::{KeyValueStore, StorageKeys, StoreError};

/// Result of adding an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    pub entry: WeightEntry,
    /// True exactly once when this entry first reaches the goal.
    pub goal_reached: bool,
}

pub struct ProgressStore<S> {
    store: S,
    keys: StorageKeys,
    goal_weight: Option<Weight>,
    history: WeightHistory,
    watch: AchievementWatch,
}

impl<S> core::fmt::Debug for ProgressStore<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressStore")
            .field("keys", &self.keys)
            .field("goal_weight", &self.goal_weight)
            .field("entries", &self.history.len())
            .finish()
    }
}

impl<S> ProgressStore<S>
where
    S: KeyValueStore,
{
    pub async fn load(store: S) -> Result<Self, StoreError> {
        Self::load_with_keys(store, StorageKeys::default()).await
    }

    /// Read goal and history once.
    ///
    /// Unreadable stored values are logged and treated as absent; only
    /// backend failures are returned as errors.
    pub async fn load_with_keys(store: S, keys: StorageKeys) -> Result<Self, StoreError> {
        let goal_weight = match store.get(&keys.goal_weight).await? {
            None => None,
            Some(raw) => match Weight::parse(&raw) {
                Ok(weight) => Some(weight),
                Err(err) => {
                    warn!(key = %keys.goal_weight, error = %err, "ignoring unreadable goal weight");
                    None
                }
            },
        };

        let history = match store.get(&keys.weight_history).await? {
            None => WeightHistory::new(),
            Some(raw) => serde_json::from_str::<WeightHistory>(&raw).unwrap_or_else(|err| {
                warn!(
                    key = %keys.weight_history,
                    error = %err,
                    "ignoring unreadable weight history"
                );
                WeightHistory::new()
            }),
        };

        debug!(
            entries = history.len(),
            has_goal = goal_weight.is_some(),
            "loaded weight progress"
        );

        let watch = AchievementWatch::seeded(&history.goal_state(goal_weight));
        Ok(Self {
            store,
            keys,
            goal_weight,
            history,
            watch,
        })
    }

    pub fn history(&self) -> &WeightHistory {
        &self.history
    }

    pub fn goal_weight(&self) -> Option<Weight> {
        self.goal_weight
    }

    pub fn goal_state(&self) -> GoalState {
        self.history.goal_state(self.goal_weight)
    }

    pub fn goal_progress(&self) -> GoalProgress {
        self.goal_state().progress()
    }

    pub fn chart_series(&self, range: TimeRange, today: CalendarDate) -> Vec<ChartBucket> {
        self.history.chart_series(range.granularity(), today)
    }

    pub fn delta_ledger(&self) -> Vec<LedgerRow> {
        self.history.delta_ledger()
    }

    pub async fn add_entry(
        &mut self,
        weight: Weight,
        date: CalendarDate,
    ) -> Result<AddOutcome, StoreError> {
        let (next, entry) = self.history.add_entry(weight, date);
        self.save_history(&next).await?;
        self.history = next;

        let state = self.goal_state();
        let goal_reached = self.watch.observe(&state);
        info!(
            entry_id = %entry.id,
            date = %entry.date,
            weight = entry.weight.value(),
            goal_reached,
            "weight entry added"
        );
        Ok(AddOutcome {
            entry,
            goal_reached,
        })
    }

    /// Validate raw input and add it.
    pub async fn record(&mut self, weight: f64, date: &str) -> Result<AddOutcome, StoreError> {
        let weight = Weight::new(weight)?;
        let date: CalendarDate = date.parse()?;
        self.add_entry(weight, date).await
    }

    /// Delete by id. Returns whether an entry was removed; unknown ids are a no-op.
    pub async fn delete_entry(&mut self, id: EntryId) -> Result<bool, StoreError> {
        if !self.history.contains(id) {
            debug!(entry_id = %id, "delete of unknown entry ignored");
            return Ok(false);
        }

        let next = self.history.delete_entry(id);
        self.save_history(&next).await?;
        self.history = next;

        // Keep the watch in step so re-crossing after a delete can fire again.
        let state = self.goal_state();
        self.watch.observe(&state);
        info!(entry_id = %id, "weight entry deleted");
        Ok(true)
    }

    /// Set or clear the goal. Changing the goal never triggers the
    /// achievement signal by itself.
    pub async fn set_goal(&mut self, goal: Option<Weight>) -> Result<(), StoreError> {
        match goal {
            Some(weight) => {
                self.store
                    .set(&self.keys.goal_weight, weight.value().to_string())
                    .await?
            }
            None => self.store.remove(&self.keys.goal_weight).await?,
        }
        self.goal_weight = goal;
        let state = self.goal_state();
        self.watch = AchievementWatch::seeded(&state);
        info!(goal = goal.map(Weight::value), "goal weight updated");
        Ok(())
    }

    async fn save_history(&self, history: &WeightHistory) -> Result<(), StoreError> {
        let payload = serde_json::to_string(history)?;
        self.store.set(&self.keys.weight_history, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use abal_core::UserId;
    use abal_progress::GoalDirection;

    use crate::kv_store::InMemoryKeyValueStore;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn weight(v: f64) -> Weight {
        Weight::new(v).unwrap()
    }

    #[tokio::test]
    async fn empty_store_loads_empty_session() {
        let session = ProgressStore::load(InMemoryKeyValueStore::new()).await.unwrap();
        assert!(session.history().is_empty());
        assert_eq!(session.goal_weight(), None);
        assert_eq!(session.goal_progress(), GoalProgress::NoGoal);
    }

    #[tokio::test]
    async fn mutations_are_written_back() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let mut session = ProgressStore::load(kv.clone()).await.unwrap();

        session.set_goal(Some(weight(170.0))).await.unwrap();
        let first = session.add_entry(weight(180.0), date("2026-10-01")).await.unwrap();
        session.add_entry(weight(175.0), date("2026-10-08")).await.unwrap();

        let reloaded = ProgressStore::load(kv.clone()).await.unwrap();
        assert_eq!(reloaded.history(), session.history());
        assert_eq!(reloaded.goal_weight(), Some(weight(170.0)));
        assert_eq!(reloaded.goal_progress().percentage(), Some(50.0));
        assert_eq!(reloaded.goal_progress().direction(), Some(GoalDirection::Losing));

        assert!(session.delete_entry(first.entry.id).await.unwrap());
        assert!(!session.delete_entry(first.entry.id).await.unwrap());
        let reloaded = ProgressStore::load(kv.clone()).await.unwrap();
        assert_eq!(reloaded.history().len(), 1);

        session.set_goal(None).await.unwrap();
        assert_eq!(kv.get(StorageKeys::GOAL_WEIGHT).await.unwrap(), None);
    }

    #[tokio::test]
    async fn goal_reached_fires_once_per_crossing() {
        let mut session = ProgressStore::load(InMemoryKeyValueStore::new()).await.unwrap();
        session.set_goal(Some(weight(90.0))).await.unwrap();

        let steps = [
            ("2026-10-01", 100.0, false),
            ("2026-10-02", 91.0, false),
            ("2026-10-03", 90.0, true),
            ("2026-10-04", 90.0, false),
            ("2026-10-05", 89.0, false),
        ];
        for (d, w, expected) in steps {
            let outcome = session.add_entry(weight(w), date(d)).await.unwrap();
            assert_eq!(outcome.goal_reached, expected, "entry {d} {w}");
        }
    }

    #[tokio::test]
    async fn backfilled_entry_does_not_fire() {
        let mut session = ProgressStore::load(InMemoryKeyValueStore::new()).await.unwrap();
        session.set_goal(Some(weight(90.0))).await.unwrap();
        session.add_entry(weight(100.0), date("2026-10-01")).await.unwrap();
        session.add_entry(weight(95.0), date("2026-10-10")).await.unwrap();

        // Older than the latest entry, so the latest weight is unchanged.
        let outcome = session.add_entry(weight(89.0), date("2026-10-05")).await.unwrap();
        assert!(!outcome.goal_reached);
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_without_writing() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let mut session = ProgressStore::load(kv.clone()).await.unwrap();

        assert!(matches!(
            session.record(-5.0, "2026-10-01").await,
            Err(StoreError::Domain(_))
        ));
        assert!(matches!(
            session.record(150.0, "10/01/2026").await,
            Err(StoreError::Domain(_))
        ));
        assert!(kv.is_empty().unwrap());
    }

    #[tokio::test]
    async fn corrupt_values_load_as_absent() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        kv.set(StorageKeys::GOAL_WEIGHT, "heavy".to_string()).await.unwrap();
        kv.set(StorageKeys::WEIGHT_HISTORY, "{not json".to_string()).await.unwrap();

        let session = ProgressStore::load(kv).await.unwrap();
        assert_eq!(session.goal_weight(), None);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn scoped_keys_isolate_users() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let (alice, bob) = (UserId::new(), UserId::new());

        let mut a = ProgressStore::load_with_keys(kv.clone(), StorageKeys::scoped(alice))
            .await
            .unwrap();
        a.add_entry(weight(150.0), date("2026-10-01")).await.unwrap();

        let b = ProgressStore::load_with_keys(kv.clone(), StorageKeys::scoped(bob))
            .await
            .unwrap();
        assert!(b.history().is_empty());
        assert!(ProgressStore::load(kv).await.unwrap().history().is_empty());
    }
}
