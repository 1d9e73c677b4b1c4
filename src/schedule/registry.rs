use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Slot labels already claimed during a run, by date.
/// A label appears at most once per date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedSlotRegistry {
    used: BTreeMap<NaiveDate, BTreeSet<String>>,
}

impl UsedSlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_used(&self, date: NaiveDate, label: &str) -> bool {
        self.used.get(&date).is_some_and(|labels| labels.contains(label))
    }

    /// Claims a slot. Returns false, leaving the registry unchanged, if it was already taken.
    pub fn claim(&mut self, date: NaiveDate, label: &str) -> bool {
        self.used.entry(date).or_default().insert(label.to_string())
    }

    /// Total number of claimed slots
    pub fn len(&self) -> usize {
        self.used.values().map(|labels| labels.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
