use crate::entry::DailyEntry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// The effective state of the log: one entry per calendar date, the one
/// with the highest version.
///
/// Keys iterate in ascending date order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Effective {
    by_date: BTreeMap<NaiveDate, DailyEntry>,
}

/// Fold the raw log into its effective state.
///
/// Entries are sorted by `(date, version_number)` and written into the map
/// in that order, so the last write for a date is its highest version. The
/// sort is stable: two entries with the same date and version resolve to
/// the one appended later.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use dayfold::{project, BodyStats, EntryDraft};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let now = Utc::now();
/// let first = EntryDraft::new().pushups(20).build(date, None, None, BodyStats::INITIAL, now);
/// let second = EntryDraft::new().pushups(40).build(date, Some(&first), None, BodyStats::INITIAL, now);
///
/// // Stored order does not matter.
/// let effective = project(vec![second.clone(), first]);
/// assert_eq!(effective.len(), 1);
/// assert_eq!(effective.get(date), Some(&second));
/// ```
pub fn project(mut entries: Vec<DailyEntry>) -> Effective {
    entries.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then(a.version_number.cmp(&b.version_number))
    });
    let mut effective = Effective::default();
    for entry in entries {
        effective.insert(entry);
    }
    effective
}

impl Effective {
    /// The effective entry for `date`.
    pub fn get(&self, date: NaiveDate) -> Option<&DailyEntry> {
        self.by_date.get(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    /// Make `entry` the effective entry for its date, returning the one it
    /// replaced.
    pub fn insert(&mut self, entry: DailyEntry) -> Option<DailyEntry> {
        self.by_date.insert(entry.date, entry)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    /// Earliest date with an entry. Day 1 of the program.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.by_date.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.by_date.keys().next_back().copied()
    }

    /// Nearest entry strictly before `date`, skipping over gaps.
    pub fn latest_before(&self, date: NaiveDate) -> Option<&DailyEntry> {
        self.by_date.range(..date).next_back().map(|(_, entry)| entry)
    }

    /// Entries in ascending date order.
    pub fn iter(&self) -> btree_map::Values<'_, NaiveDate, DailyEntry> {
        self.by_date.values()
    }

    /// Entries in ascending date order, as an owned list.
    pub fn to_vec(&self) -> Vec<DailyEntry> {
        self.by_date.values().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a Effective {
    type Item = &'a DailyEntry;
    type IntoIter = btree_map::Values<'a, NaiveDate, DailyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
