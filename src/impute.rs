use crate::effective::Effective;
use crate::entry::{BodyStats, CreatedBy, DailyEntry};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Notes written on every backfilled day.
pub const IMPUTED_NOTES: &str = "Auto-generated missed day";

/// Backfill every day between the first effective date and the day before
/// `today` that has no entry.
///
/// Each placeholder is inserted into `effective` as soon as it is created,
/// so a later gap day carries its body measurements forward from the
/// nearest earlier day, real or backfilled. Returns the placeholders in
/// date order; the caller persists them.
///
/// `today` itself is never backfilled. An empty projection yields nothing,
/// and running the scan again with the same `today` yields nothing.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use dayfold::{impute, project, BodyStats, EntryDraft};
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
/// let first = EntryDraft::new().weight_kg(80.0).build(d(1), None, None, BodyStats::INITIAL, Utc::now());
/// let mut effective = project(vec![first]);
///
/// let added = impute(&mut effective, d(4), BodyStats::INITIAL, Utc::now());
/// assert_eq!(added.len(), 2);
/// assert_eq!(added[1].carry_forward_from_date, Some(d(2)));
/// assert!(effective.get(d(4)).is_none());
/// ```
pub fn impute(
    effective: &mut Effective,
    today: NaiveDate,
    baseline: BodyStats,
    now: DateTime<Utc>,
) -> Vec<DailyEntry> {
    let Some(first) = effective.first_date() else {
        return Vec::new();
    };

    let mut added = Vec::new();
    for day in first.iter_days().take_while(|day| *day < today) {
        if effective.contains(day) {
            continue;
        }
        let entry = missed_day(day, effective.latest_before(day), baseline, now);
        effective.insert(entry.clone());
        added.push(entry);
    }
    added
}

/// Build the placeholder for a day nobody logged.
///
/// Weight and waist come from `prev` when there is one, recording its date
/// in `carry_forward_from_date`; otherwise from `baseline`. Every activity
/// metric is zero and both ratings sit at the bottom of their scales.
pub fn missed_day(
    date: NaiveDate,
    prev: Option<&DailyEntry>,
    baseline: BodyStats,
    now: DateTime<Utc>,
) -> DailyEntry {
    let (body, carry_forward_from_date) = match prev {
        Some(prev) => (prev.body(), Some(prev.date)),
        None => (baseline, None),
    };

    DailyEntry {
        id: Uuid::new_v4(),
        date,
        version_number: 1,
        created_at: now,
        edited_at: None,
        created_by: CreatedBy::System,

        weight_kg: body.weight_kg,
        waist_cm: body.waist_cm,

        roadwork_km: 0.0,
        roadwork_time_min: 0.0,
        pushups_count: 0,
        squats_count: 0,
        plank_sec: 0,
        boxing_rounds: 0,
        boxing_minutes: 0,

        diet_compliance_pct: 0,
        water_liters: 0.0,
        sleep_hours: 0.0,
        energy_level: 1,
        discipline_score: 1,

        missed_day_flag: true,
        is_imputed: true,
        carry_forward_from_date,
        notes: IMPUTED_NOTES.to_string(),
    }
}
