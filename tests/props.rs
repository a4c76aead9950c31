mod common;

use chrono::{Datelike, Utc};
use common::{d, entry};
use dayfold::{impute, project, BodyStats, EntryDraft, Journal, LockMode};
use proptest::prelude::*;
use std::collections::HashMap;
use tempfile::tempdir;

fn arb_days() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(1..=10u32, 0..30)
}

// Re-logging through the journal yields versions 1..N per date, in append
// order, and the effective entry is always version N.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_versions_gapless(days in arb_days()) {
        let dir = tempdir().unwrap();
        let mut journal = Journal::builder(dir.path())
            .lock_mode(LockMode::None)
            .open()
            .unwrap();

        for &day in &days {
            journal.log_day(d(day), EntryDraft::new().pushups(day)).unwrap();
        }

        let mut seen: HashMap<_, Vec<u32>> = HashMap::new();
        for e in journal.entries().unwrap() {
            seen.entry(e.date).or_default().push(e.version_number);
        }

        let effective = journal.effective().unwrap().clone();
        for (date, versions) in seen {
            let expected: Vec<u32> = (1..=versions.len() as u32).collect();
            prop_assert_eq!(&versions, &expected);
            prop_assert_eq!(
                effective.get(date).unwrap().version_number,
                versions.len() as u32
            );
        }
    }
}

// With distinct (date, version) pairs, stored order does not affect the
// projection.
proptest! {
    #[test]
    fn prop_projection_order_independent(
        shuffled in Just((1..=6u32)
            .flat_map(|day| (1..=3u32).map(move |v| (day, v)))
            .collect::<Vec<_>>())
            .prop_shuffle()
    ) {
        let ordered: Vec<_> = (1..=6u32)
            .flat_map(|day| (1..=3u32).map(move |v| entry(d(day), v, f64::from(day * 10 + v))))
            .collect();
        let permuted: Vec<_> = shuffled
            .iter()
            .map(|&(day, v)| entry(d(day), v, f64::from(day * 10 + v)))
            .collect();

        let a = project(ordered);
        let b = project(permuted);
        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert_eq!(x.date, y.date);
            prop_assert_eq!(x.version_number, 3);
            prop_assert_eq!(x.weight_kg, y.weight_kg);
        }
    }
}

// After a scan every day from the first date up to yesterday is covered,
// nothing from today on is invented, and a second scan adds nothing.
proptest! {
    #[test]
    fn prop_impute_covers_and_is_idempotent(
        days in proptest::collection::btree_set(1..=25u32, 1..8),
        today in 1..=31u32,
    ) {
        let logged: Vec<_> = days.iter().map(|&day| entry(d(day), 1, 80.0)).collect();
        let mut effective = project(logged);
        let first = *days.iter().next().unwrap();

        let added = impute(&mut effective, d(today), BodyStats::INITIAL, Utc::now());

        for day in first..today {
            prop_assert!(effective.contains(d(day)));
        }
        for e in &added {
            prop_assert!(e.date < d(today));
            prop_assert!(!days.contains(&e.date.day()));
            prop_assert!(e.carry_forward_from_date.is_some());
        }

        let again = impute(&mut effective, d(today), BodyStats::INITIAL, Utc::now());
        prop_assert!(again.is_empty());
    }
}
