use serde::{Deserialize, Serialize};

use abal_core::{CalendarDate, DomainResult, Entity, EntryId};

use crate::weight::Weight;

/// One (date, weight) observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: EntryId,
    pub date: CalendarDate,
    pub weight: Weight,
}

impl WeightEntry {
    pub fn new(id: EntryId, date: CalendarDate, weight: Weight) -> Self {
        Self { id, date, weight }
    }
}

impl Entity for WeightEntry {
    type Id = EntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Snapshot of a user's weight entries.
///
/// Invariant: entries are sorted ascending by date. The sort is stable, so
/// entries sharing a date keep the order in which they were added. Several
/// entries may share a date; aggregation decides how to collapse them.
///
/// Operations never mutate in place: each returns the new history for the
/// caller to persist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<WeightEntry>", into = "Vec<WeightEntry>")]
pub struct WeightHistory {
    entries: Vec<WeightEntry>,
}

impl WeightHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from entries in any order.
    pub fn from_entries(mut entries: Vec<WeightEntry>) -> Self {
        entries.sort_by_key(|e| e.date);
        Self { entries }
    }

    pub fn entries(&self) -> &[WeightEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.iter().any(|e| e.id() == &id)
    }

    /// Append an entry with a freshly generated id.
    ///
    /// Same-date entries are not deduplicated.
    pub fn add_entry(&self, weight: Weight, date: CalendarDate) -> (Self, WeightEntry) {
        let entry = WeightEntry::new(EntryId::new(), date, weight);
        let next = self.add_entry_with_id(entry.id, weight, date);
        (next, entry)
    }

    pub fn add_entry_with_id(&self, id: EntryId, weight: Weight, date: CalendarDate) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend(self.entries.iter().cloned());
        entries.push(WeightEntry::new(id, date, weight));
        Self::from_entries(entries)
    }

    /// Validate raw user input and append it.
    ///
    /// Invalid input is rejected with `DomainError::Validation`; the history
    /// is never silently left unchanged.
    pub fn record(&self, weight: f64, date: &str) -> DomainResult<(Self, WeightEntry)> {
        let weight = Weight::new(weight)?;
        let date: CalendarDate = date.parse()?;
        Ok(self.add_entry(weight, date))
    }

    /// Remove the entry with `id`. Unknown ids leave the history unchanged.
    pub fn delete_entry(&self, id: EntryId) -> Self {
        Self {
            entries: self.entries.iter().filter(|e| e.id() != &id).cloned().collect(),
        }
    }

    /// Chronologically earliest entry (first added wins on a shared date).
    pub fn earliest(&self) -> Option<&WeightEntry> {
        self.entries.first()
    }

    /// Chronologically latest entry (last added wins on a shared date).
    pub fn latest(&self) -> Option<&WeightEntry> {
        self.entries.last()
    }

    pub fn start_weight(&self) -> Option<Weight> {
        self.earliest().map(|e| e.weight)
    }

    pub fn latest_weight(&self) -> Option<Weight> {
        self.latest().map(|e| e.weight)
    }
}

impl From<Vec<WeightEntry>> for WeightHistory {
    fn from(entries: Vec<WeightEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<WeightHistory> for Vec<WeightEntry> {
    fn from(history: WeightHistory) -> Self {
        history.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abal_core::DomainError;
    use proptest::prelude::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn weight(v: f64) -> Weight {
        Weight::new(v).unwrap()
    }

    #[test]
    fn add_entry_keeps_history_sorted_by_date() {
        let history = WeightHistory::new();
        let (history, _) = history.add_entry(weight(150.0), date("2026-10-10"));
        let (history, _) = history.add_entry(weight(152.0), date("2026-10-01"));
        let (history, latest) = history.add_entry(weight(149.0), date("2026-10-15"));

        let dates: Vec<String> = history.entries().iter().map(|e| e.date.to_string()).collect();
        assert_eq!(dates, ["2026-10-01", "2026-10-10", "2026-10-15"]);
        assert_eq!(history.latest(), Some(&latest));
        assert_eq!(history.start_weight(), Some(weight(152.0)));
    }

    #[test]
    fn same_date_entries_are_kept_in_insertion_order() {
        let first = EntryId::new();
        let second = EntryId::new();
        let history = WeightHistory::new()
            .add_entry_with_id(first, weight(150.0), date("2026-10-10"))
            .add_entry_with_id(second, weight(149.5), date("2026-10-10"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.earliest().map(|e| e.id), Some(first));
        assert_eq!(history.latest().map(|e| e.id), Some(second));
    }

    #[test]
    fn record_rejects_invalid_input_explicitly() {
        let history = WeightHistory::new();
        assert!(matches!(history.record(0.0, "2026-10-10"), Err(DomainError::Validation(_))));
        assert!(matches!(history.record(f64::NAN, "2026-10-10"), Err(DomainError::Validation(_))));
        assert!(matches!(history.record(150.0, "yesterday"), Err(DomainError::Validation(_))));

        let (history, entry) = history.record(150.0, "2026-10-10").unwrap();
        assert_eq!(history.entries(), &[entry]);
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let (history, _) = WeightHistory::new().add_entry(weight(150.0), date("2026-10-10"));
        assert_eq!(history.delete_entry(EntryId::new()), history);
    }

    #[test]
    fn deserializing_unsorted_array_restores_order() {
        let json = r#"[
            {"id":"01928a5e-0000-7000-8000-000000000002","date":"2026-10-12","weight":148},
            {"id":"01928a5e-0000-7000-8000-000000000001","date":"2026-10-02","weight":150.5}
        ]"#;
        let history: WeightHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.earliest().unwrap().date, date("2026-10-02"));
        assert_eq!(history.latest_weight(), Some(weight(148.0)));
    }

    fn arb_entry() -> impl Strategy<Value = (i64, f64)> {
        (0i64..400, 40.0f64..250.0)
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any sequence of adds the history is sorted ascending.
        #[test]
        fn history_is_sorted_after_every_add(raw in prop::collection::vec(arb_entry(), 1..40)) {
            let base = date("2025-01-01");
            let mut history = WeightHistory::new();
            for (offset, w) in raw {
                let d = CalendarDate::new(base.as_naive() + chrono::Days::new(offset as u64));
                history = history.add_entry(weight(w), d).0;
                prop_assert!(history.entries().windows(2).all(|p| p[0].date <= p[1].date));
            }
        }

        /// Property: deleting the same id twice equals deleting it once.
        #[test]
        fn delete_is_idempotent(
            raw in prop::collection::vec(arb_entry(), 1..20),
            pick in 0usize..20,
        ) {
            let base = date("2025-01-01");
            let mut history = WeightHistory::new();
            for (offset, w) in raw {
                let d = CalendarDate::new(base.as_naive() + chrono::Days::new(offset as u64));
                history = history.add_entry(weight(w), d).0;
            }
            let id = history.entries()[pick % history.len()].id;
            let once = history.delete_entry(id);
            let twice = once.delete_entry(id);
            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(once.len(), history.len() - 1);
        }
    }
}
