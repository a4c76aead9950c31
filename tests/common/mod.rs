#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use dayfold::{BodyStats, DailyEntry, EntryDraft, EntryStore};

/// A date in March 2024.
pub fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

/// A user entry for `date` with an explicit version and weight.
pub fn entry(date: NaiveDate, version: u32, weight_kg: f64) -> DailyEntry {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 7, 0, 0).unwrap();
    let mut entry = EntryDraft::new()
        .weight_kg(weight_kg)
        .build(date, None, None, BodyStats::INITIAL, now);
    entry.version_number = version;
    if version > 1 {
        entry.edited_at = Some(now);
    }
    entry
}

pub fn append_days(store: &mut EntryStore, days: &[u32]) {
    for &day in days {
        store.append(&entry(d(day), 1, 80.0)).unwrap();
    }
}
