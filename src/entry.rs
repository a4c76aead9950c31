use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a record.
///
/// Serialized as `"user"` or `"system"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CreatedBy {
    /// Explicit log, quick-log or redeem from the person training.
    User,
    /// Placeholder written by the missed-day backfill.
    System,
}

/// Body measurements carried from day to day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BodyStats {
    pub weight_kg: f64,
    pub waist_cm: f64,
}

impl BodyStats {
    /// Measurements at the start of the program, used when no earlier
    /// entry exists to carry values forward from.
    pub const INITIAL: BodyStats = BodyStats {
        weight_kg: 82.0,
        waist_cm: 91.44,
    };
}

impl Default for BodyStats {
    fn default() -> Self {
        BodyStats::INITIAL
    }
}

/// One versioned snapshot of a calendar day.
///
/// Records are never edited in place. A correction is a new record for the
/// same `date` with `version_number` one higher than the version it
/// supersedes, so the `id` is unique while the `date` is not.
///
/// The serialized field names are the persisted format:
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use dayfold::{BodyStats, CreatedBy, EntryDraft};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let entry = EntryDraft::new()
///     .weight_kg(80.5)
///     .pushups(45)
///     .build(date, None, None, BodyStats::INITIAL, Utc::now());
///
/// let json = serde_json::to_value(&entry).unwrap();
/// assert_eq!(json["date"], "2024-03-01");
/// assert_eq!(json["version_number"], 1);
/// assert_eq!(json["created_by"], "user");
/// assert_eq!(entry.created_by, CreatedBy::User);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyEntry {
    pub id: Uuid,

    /// Calendar day this record describes. The reconciliation key.
    pub date: NaiveDate,

    /// Starts at 1 for a date and grows by exactly 1 per re-log.
    pub version_number: u32,

    pub created_at: DateTime<Utc>,

    /// Set only on versions that supersede an earlier one.
    pub edited_at: Option<DateTime<Utc>>,

    pub created_by: CreatedBy,

    pub weight_kg: f64,
    pub waist_cm: f64,

    pub roadwork_km: f64,
    pub roadwork_time_min: f64,
    pub pushups_count: u32,
    pub squats_count: u32,
    pub plank_sec: u32,
    pub boxing_rounds: u32,
    pub boxing_minutes: u32,

    /// 0-100.
    pub diet_compliance_pct: u8,
    pub water_liters: f64,
    pub sleep_hours: f64,
    /// 1-5.
    pub energy_level: u8,
    /// 1-10.
    pub discipline_score: u8,

    /// True when the day was not actively trained. Always true for
    /// imputed records.
    pub missed_day_flag: bool,

    /// True only for placeholders written by the backfill.
    pub is_imputed: bool,

    /// For imputed records, the date whose body measurements were copied.
    /// `None` when the baseline was used instead.
    pub carry_forward_from_date: Option<NaiveDate>,

    pub notes: String,
}

impl DailyEntry {
    /// Body measurements recorded on this entry.
    pub fn body(&self) -> BodyStats {
        BodyStats {
            weight_kg: self.weight_kg,
            waist_cm: self.waist_cm,
        }
    }

    /// A genuine, trained day: neither missed nor backfilled.
    pub fn is_completed(&self) -> bool {
        !self.missed_day_flag && !self.is_imputed
    }
}
