use crate::entry::{BodyStats, CreatedBy, DailyEntry};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_ENERGY: u8 = 3;
const DEFAULT_DISCIPLINE: u8 = 5;

/// Minutes per kilometre assumed when a quick-log fills in roadwork time.
const QUICK_LOG_PACE_MIN_PER_KM: f64 = 6.0;
/// Minutes per shadow boxing round.
const ROUND_MINUTES: u32 = 3;

/// Daily targets from the training plan, supplied by the caller.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DayTargets {
    pub km: f64,
    pub pushups: u32,
    pub squats: u32,
    pub rounds: u32,
}

/// A partially filled entry, as submitted by a form or a quick-log button.
///
/// Every metric is optional. [`EntryDraft::build`] turns the draft into a
/// complete [`DailyEntry`], filling gaps with carried-forward body
/// measurements and fixed defaults, and assigning the version number.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EntryDraft {
    pub weight_kg: Option<f64>,
    pub waist_cm: Option<f64>,
    pub roadwork_km: Option<f64>,
    pub roadwork_time_min: Option<f64>,
    pub pushups_count: Option<u32>,
    pub squats_count: Option<u32>,
    pub plank_sec: Option<u32>,
    pub boxing_rounds: Option<u32>,
    pub boxing_minutes: Option<u32>,
    pub diet_compliance_pct: Option<u8>,
    pub water_liters: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub energy_level: Option<u8>,
    pub discipline_score: Option<u8>,
    pub notes: Option<String>,
}

macro_rules! setter {
    ($name:ident, $field:ident, $ty:ty) => {
        pub fn $name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

impl EntryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// The "mark done" quick-log: every plan target met, strict diet
    /// followed, a full night's sleep.
    ///
    /// Body measurements are left empty so they carry forward.
    pub fn perfect_day(targets: DayTargets, note: impl Into<String>) -> Self {
        EntryDraft::new()
            .roadwork_km(targets.km)
            .roadwork_time_min(targets.km * QUICK_LOG_PACE_MIN_PER_KM)
            .pushups(targets.pushups)
            .squats(targets.squats)
            .boxing_rounds(targets.rounds)
            .boxing_minutes(targets.rounds * ROUND_MINUTES)
            .diet_compliance_pct(100)
            .water_liters(3.5)
            .sleep_hours(8.0)
            .energy_level(4)
            .discipline_score(10)
            .notes(note)
    }

    setter!(weight_kg, weight_kg, f64);
    setter!(waist_cm, waist_cm, f64);
    setter!(roadwork_km, roadwork_km, f64);
    setter!(roadwork_time_min, roadwork_time_min, f64);
    setter!(pushups, pushups_count, u32);
    setter!(squats, squats_count, u32);
    setter!(plank_sec, plank_sec, u32);
    setter!(boxing_rounds, boxing_rounds, u32);
    setter!(boxing_minutes, boxing_minutes, u32);
    setter!(diet_compliance_pct, diet_compliance_pct, u8);
    setter!(water_liters, water_liters, f64);
    setter!(sleep_hours, sleep_hours, f64);
    setter!(energy_level, energy_level, u8);
    setter!(discipline_score, discipline_score, u8);

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Complete the draft into a user-authored entry for `date`.
    ///
    /// `previous` is the current effective entry for the same date, if any.
    /// When present the new entry supersedes it: `version_number` is one
    /// higher and `edited_at` is set to `now`. Otherwise the entry is
    /// version 1.
    ///
    /// Weight and waist come from the draft, else from `previous`, else
    /// from `carry` (the nearest earlier day), else from `baseline`.
    /// Activity metrics default to zero, energy to 3 and discipline to 5.
    /// Ratings are clamped into their scales.
    pub fn build(
        self,
        date: NaiveDate,
        previous: Option<&DailyEntry>,
        carry: Option<&DailyEntry>,
        baseline: BodyStats,
        now: DateTime<Utc>,
    ) -> DailyEntry {
        let body = previous
            .or(carry)
            .map(DailyEntry::body)
            .unwrap_or(baseline);

        DailyEntry {
            id: Uuid::new_v4(),
            date,
            version_number: previous.map_or(1, |p| p.version_number + 1),
            created_at: now,
            edited_at: previous.map(|_| now),
            created_by: CreatedBy::User,

            weight_kg: self.weight_kg.unwrap_or(body.weight_kg),
            waist_cm: self.waist_cm.unwrap_or(body.waist_cm),

            roadwork_km: self.roadwork_km.unwrap_or(0.0),
            roadwork_time_min: self.roadwork_time_min.unwrap_or(0.0),
            pushups_count: self.pushups_count.unwrap_or(0),
            squats_count: self.squats_count.unwrap_or(0),
            plank_sec: self.plank_sec.unwrap_or(0),
            boxing_rounds: self.boxing_rounds.unwrap_or(0),
            boxing_minutes: self.boxing_minutes.unwrap_or(0),

            diet_compliance_pct: self.diet_compliance_pct.unwrap_or(0).min(100),
            water_liters: self.water_liters.unwrap_or(0.0),
            sleep_hours: self.sleep_hours.unwrap_or(0.0),
            energy_level: self.energy_level.unwrap_or(DEFAULT_ENERGY).clamp(1, 5),
            discipline_score: self
                .discipline_score
                .unwrap_or(DEFAULT_DISCIPLINE)
                .clamp(1, 10),

            missed_day_flag: false,
            is_imputed: false,
            carry_forward_from_date: None,
            notes: self.notes.unwrap_or_default(),
        }
    }
}
