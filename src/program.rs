//! Day numbering for the 100-day program and summary figures over the
//! effective state.

use crate::effective::Effective;
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Length of the program in days.
pub const PROGRAM_DAYS: u32 = 100;

/// Number of most recent days summed into [`Progress::recent_km`].
const RECENT_WINDOW: usize = 7;

/// 1-based program day of `date` for a program that began on `start`.
///
/// Dates on or before `start` are day 1. The result is not capped at
/// [`PROGRAM_DAYS`].
pub fn day_number(start: NaiveDate, date: NaiveDate) -> u32 {
    let diff = (date - start).num_days();
    if diff > 0 {
        u32::try_from(diff).map_or(u32::MAX, |d| d.saturating_add(1))
    } else {
        1
    }
}

/// Calendar date of program day `day` (1-based). Day 0 maps to `start`.
///
/// Returns `None` if the date would overflow the calendar.
pub fn date_for_day(start: NaiveDate, day: u32) -> Option<NaiveDate> {
    start.checked_add_days(Days::new(u64::from(day.saturating_sub(1))))
}

/// Program day of `date`, counting from the first effective entry. With an
/// empty log every date is day 1.
pub fn program_day(effective: &Effective, date: NaiveDate) -> u32 {
    effective
        .first_date()
        .map_or(1, |start| day_number(start, date))
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Progress {
    /// Dates with an effective entry, backfilled ones included.
    pub days_tracked: usize,
    /// Dates whose effective entry is not a missed day.
    pub days_trained: usize,
    /// `days_trained / days_tracked`, as a rounded percentage.
    pub consistency_pct: u8,
    pub start_weight_kg: Option<f64>,
    pub latest_weight_kg: Option<f64>,
    /// Latest minus start weight. Zero with no entries.
    pub weight_change_kg: f64,
    /// Roadwork over the last seven effective entries, ignoring backfilled
    /// days.
    pub recent_km: f64,
}

impl Progress {
    pub fn from_effective(effective: &Effective) -> Self {
        let days_tracked = effective.len();
        if days_tracked == 0 {
            return Progress::default();
        }

        let days_trained = effective.iter().filter(|e| !e.missed_day_flag).count();
        let consistency_pct = ((days_trained as f64 / days_tracked as f64) * 100.0).round() as u8;

        let start_weight_kg = effective.iter().next().map(|e| e.weight_kg);
        let latest_weight_kg = effective.iter().next_back().map(|e| e.weight_kg);
        let weight_change_kg = match (start_weight_kg, latest_weight_kg) {
            (Some(start), Some(latest)) => latest - start,
            _ => 0.0,
        };

        let recent_km = effective
            .iter()
            .rev()
            .take(RECENT_WINDOW)
            .filter(|e| !e.is_imputed)
            .map(|e| e.roadwork_km)
            .sum();

        Progress {
            days_tracked,
            days_trained,
            consistency_pct,
            start_weight_kg,
            latest_weight_kg,
            weight_change_kg,
            recent_km,
        }
    }
}
