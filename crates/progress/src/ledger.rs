//! Entry-to-entry change history for the weight log view.

use serde::{Deserialize, Serialize};

use crate::entry::WeightEntry;

/// How a row compares to the chronologically previous entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Loss,
    Gain,
    Flat,
    /// The earliest entry; nothing to compare against.
    Baseline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub entry: WeightEntry,
    /// `entry.weight - previous.weight`; `None` for the earliest entry.
    pub change_from_previous: Option<f64>,
}

impl LedgerRow {
    pub fn trend(&self) -> Trend {
        match self.change_from_previous {
            None => Trend::Baseline,
            Some(c) if c < 0.0 => Trend::Loss,
            Some(c) if c > 0.0 => Trend::Gain,
            Some(_) => Trend::Flat,
        }
    }
}

/// Rows newest first, each carrying its change from the entry before it.
///
/// Entries sharing a date are ordered by input position (later first).
pub fn delta_ledger(entries: &[WeightEntry]) -> Vec<LedgerRow> {
    let mut ascending: Vec<&WeightEntry> = entries.iter().collect();
    ascending.sort_by_key(|e| e.date);

    let mut rows = Vec::with_capacity(ascending.len());
    let mut previous: Option<f64> = None;
    for entry in ascending {
        let weight = entry.weight.value();
        rows.push(LedgerRow {
            entry: entry.clone(),
            change_from_previous: previous.map(|p| weight - p),
        });
        previous = Some(weight);
    }

    rows.reverse();
    rows
}
