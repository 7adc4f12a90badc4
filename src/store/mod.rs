//! In-memory match log.
//!
//! The log is replaced wholesale on every change: adding or deleting a match
//! produces a new `MatchStore` and leaves the old one untouched. Readers
//! holding a store never observe a half-applied change, and persisting is the
//! caller's job after each transition.

pub mod query;

pub use query::{MatchQuery, MatchSort};

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{MatchError, MatchId, MatchRecord, NewMatch};

/// Immutable, cheaply clonable snapshot of the match log. Newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStore {
    matches: Arc<[MatchRecord]>,
}

impl Default for MatchStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MatchStore {
    /// Wrap an already ordered record list.
    pub fn new(matches: Vec<MatchRecord>) -> Self {
        Self {
            matches: matches.into(),
        }
    }

    /// Records, newest first.
    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether no match has been logged.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: MatchId) -> Option<&MatchRecord> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Next id for a record created at `now_millis`.
    ///
    /// Normally the creation timestamp; bumped past the largest existing id
    /// when the clock has not moved on (or went backwards).
    pub fn next_id(&self, now_millis: MatchId) -> MatchId {
        match self.matches.iter().map(|m| m.id).max() {
            Some(max) if now_millis <= max => max + 1,
            _ => now_millis,
        }
    }

    /// New store with `record` prepended.
    pub fn with_added(&self, record: MatchRecord) -> Self {
        let mut matches = Vec::with_capacity(self.matches.len() + 1);
        matches.push(record);
        matches.extend(self.matches.iter().cloned());
        debug!("Match log now holds {} records", matches.len());
        Self::new(matches)
    }

    /// Validate a draft, assign it an id and date, and prepend it.
    ///
    /// On error the store is left as it was.
    pub fn add_match(
        &self,
        draft: NewMatch,
        now_millis: MatchId,
        date: NaiveDate,
    ) -> Result<(Self, MatchRecord), MatchError> {
        let record = draft.into_record(self.next_id(now_millis), date)?;
        Ok((self.with_added(record.clone()), record))
    }

    /// New store without the record `id`, and whether anything was removed.
    pub fn without(&self, id: MatchId) -> (Self, bool) {
        let remaining: Vec<MatchRecord> = self
            .matches
            .iter()
            .filter(|m| m.id != id)
            .cloned()
            .collect();
        let removed = remaining.len() != self.matches.len();
        (Self::new(remaining), removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 12).unwrap()
    }

    #[test]
    fn test_add_prepends() {
        let store = MatchStore::default();
        let (store, first) = store
            .add_match(NewMatch::between("A", "B", 1, 0), 1_000, date())
            .unwrap();
        let (store, second) = store
            .add_match(NewMatch::between("C", "D", 0, 0), 2_000, date())
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.matches()[0].id, second.id);
        assert_eq!(store.matches()[1].id, first.id);
    }

    #[test]
    fn test_add_leaves_previous_store_untouched() {
        let empty = MatchStore::default();
        let (added, _) = empty
            .add_match(NewMatch::between("A", "B", 1, 0), 1_000, date())
            .unwrap();

        assert!(empty.is_empty());
        assert_eq!(added.len(), 1);
    }

    #[test]
    fn test_invalid_draft_does_not_mutate() {
        let store = MatchStore::default();
        let err = store
            .add_match(NewMatch::between("", "B", 1, 0), 1_000, date())
            .unwrap_err();

        assert_eq!(err, MatchError::MissingPlayer);
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_strictly_increase_on_stalled_clock() {
        let (store, first) = MatchStore::default()
            .add_match(NewMatch::between("A", "B", 1, 0), 5_000, date())
            .unwrap();
        let (_, second) = store
            .add_match(NewMatch::between("A", "B", 1, 0), 5_000, date())
            .unwrap();

        assert_eq!(first.id, 5_000);
        assert_eq!(second.id, 5_001);
    }

    #[test]
    fn test_without_removes_record() {
        let (store, record) = MatchStore::default()
            .add_match(NewMatch::between("A", "B", 1, 0), 1_000, date())
            .unwrap();

        let (after, removed) = store.without(record.id);
        assert!(removed);
        assert!(after.is_empty());
        assert!(store.get(record.id).is_some());

        let (unchanged, removed) = store.without(42);
        assert!(!removed);
        assert_eq!(unchanged, store);
    }
}
