mod common;

use chrono::NaiveDate;
use common::{d, entry};
use dayfold::{BodyStats, CreatedBy, Journal, IMPUTED_NOTES};
use tempfile::tempdir;

#[test]
fn test_empty_log_is_noop() {
    let dir = tempdir().unwrap();
    let mut journal = Journal::open(dir.path()).unwrap();

    let added = journal.impute_missing_days_as_of(d(10)).unwrap();
    assert!(added.is_empty());
    assert!(journal.entries().unwrap().is_empty());
    assert!(!journal.store().slot_path().exists());
}

#[test]
fn test_fills_until_yesterday() {
    let dir = tempdir().unwrap();
    let mut journal = Journal::open(dir.path()).unwrap();
    journal.append(&entry(d(1), 1, 80.0)).unwrap();

    let added = journal.impute_missing_days_as_of(d(10)).unwrap();
    assert_eq!(added.len(), 8);

    let effective = journal.effective().unwrap();
    for day in 1..=9 {
        assert!(effective.contains(d(day)), "missing 2024-03-{day:02}");
    }
    assert!(!effective.contains(d(10)));
}

#[test]
fn test_carry_forward_uses_nearest_effective_day() {
    let dir = tempdir().unwrap();
    let mut journal = Journal::open(dir.path()).unwrap();
    journal.append(&entry(d(1), 1, 80.0)).unwrap();
    journal.append(&entry(d(4), 1, 78.0)).unwrap();

    journal.impute_missing_days_as_of(d(5)).unwrap();
    let effective = journal.effective().unwrap();

    let d2 = effective.get(d(2)).unwrap();
    assert_eq!(d2.weight_kg, 80.0);
    assert_eq!(d2.carry_forward_from_date, Some(d(1)));

    let d3 = effective.get(d(3)).unwrap();
    assert_eq!(d3.weight_kg, 80.0);
    assert_eq!(d3.carry_forward_from_date, Some(d(2)));

    assert!(!effective.get(d(4)).unwrap().is_imputed);
}

#[test]
fn test_carry_forward_uses_latest_version() {
    let dir = tempdir().unwrap();
    let mut journal = Journal::open(dir.path()).unwrap();
    journal.append(&entry(d(1), 1, 80.0)).unwrap();
    journal.append(&entry(d(1), 2, 79.0)).unwrap();

    let added = journal.impute_missing_days_as_of(d(3)).unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].weight_kg, 79.0);
}

#[test]
fn test_imputed_entries_shape() {
    let dir = tempdir().unwrap();
    let mut journal = Journal::open(dir.path()).unwrap();
    journal.append(&entry(d(1), 1, 80.0)).unwrap();

    let added = journal.impute_missing_days_as_of(d(3)).unwrap();
    let placeholder = &added[0];
    assert_eq!(placeholder.date, d(2));
    assert_eq!(placeholder.created_by, CreatedBy::System);
    assert_eq!(placeholder.version_number, 1);
    assert!(placeholder.is_imputed);
    assert!(placeholder.missed_day_flag);
    assert_eq!(placeholder.roadwork_km, 0.0);
    assert_eq!(placeholder.energy_level, 1);
    assert_eq!(placeholder.discipline_score, 1);
    assert_eq!(placeholder.notes, IMPUTED_NOTES);
}

#[test]
fn test_second_run_is_noop() {
    let dir = tempdir().unwrap();
    let mut journal = Journal::open(dir.path()).unwrap();
    journal.append(&entry(d(1), 1, 80.0)).unwrap();

    assert_eq!(journal.impute_missing_days_as_of(d(8)).unwrap().len(), 6);
    assert!(journal.impute_missing_days_as_of(d(8)).unwrap().is_empty());
    assert_eq!(journal.entries().unwrap().len(), 7);
}

#[test]
fn test_next_session_only_fills_new_days() {
    let dir = tempdir().unwrap();
    {
        let mut journal = Journal::open(dir.path()).unwrap();
        journal.append(&entry(d(1), 1, 80.0)).unwrap();
        journal.impute_missing_days_as_of(d(4)).unwrap();
    }

    let mut journal = Journal::open(dir.path()).unwrap();
    let added = journal.impute_missing_days_as_of(d(6)).unwrap();
    let dates: Vec<NaiveDate> = added.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![d(4), d(5)]);
    assert_eq!(added[0].carry_forward_from_date, Some(d(3)));
}

#[test]
fn test_batch_persisted_after_existing_entries() {
    let dir = tempdir().unwrap();
    let mut journal = Journal::open(dir.path()).unwrap();
    journal.append(&entry(d(1), 1, 80.0)).unwrap();
    journal.append(&entry(d(5), 1, 80.0)).unwrap();

    journal.impute_missing_days_as_of(d(6)).unwrap();

    let raw: Vec<_> = journal.entries().unwrap().iter().map(|e| e.date).collect();
    assert_eq!(raw, vec![d(1), d(5), d(2), d(3), d(4)]);
}

#[test]
fn test_custom_baseline_on_missed_day_without_predecessor() {
    let baseline = BodyStats {
        weight_kg: 95.0,
        waist_cm: 100.0,
    };
    let placeholder = dayfold::missed_day(d(2), None, baseline, chrono::Utc::now());
    assert_eq!(placeholder.weight_kg, 95.0);
    assert_eq!(placeholder.waist_cm, 100.0);
    assert_eq!(placeholder.carry_forward_from_date, None);
}

#[test]
fn test_crosses_month_boundary() {
    let dir = tempdir().unwrap();
    let mut journal = Journal::open(dir.path()).unwrap();
    journal
        .append(&entry(NaiveDate::from_ymd_opt(2024, 2, 27).unwrap(), 1, 80.0))
        .unwrap();

    let added = journal.impute_missing_days_as_of(d(2)).unwrap();
    let dates: Vec<_> = added.iter().map(|e| e.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-02-28", "2024-02-29", "2024-03-01"]);
}
