//! One session against a fresh journal: backfill, log, redeem, summarize.

use chrono::{Days, Local};
use dayfold::program::program_day;
use dayfold::{DayTargets, EntryDraft, Journal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut journal = Journal::open(dir.path())?;

    let today = Local::now().date_naive();
    let start = today.checked_sub_days(Days::new(5)).ok_or("date out of range")?;

    // Day 1, logged by hand
    journal.log_day(
        start,
        EntryDraft::new()
            .weight_kg(82.0)
            .roadwork_km(2.0)
            .pushups(30)
            .squats(60)
            .notes("first day"),
    )?;

    // Session start: fill the days that went by without a log
    let added = journal.impute_missing_days()?;
    println!("Backfilled {} missed day(s)", added.len());

    // Redeem the first missed day with a perfect quick-log
    if let Some(missed) = added.first() {
        let targets = DayTargets {
            km: 2.0,
            pushups: 45,
            squats: 75,
            rounds: 3,
        };
        let day = program_day(journal.effective()?, missed.date);
        let note = format!("Plan Day {day} completed via Quick Log.");
        let redeemed = journal.mark_done(missed.date, targets, note)?;
        println!(
            "Redeemed {} (version {})",
            redeemed.date, redeemed.version_number
        );
    }

    let effective = journal.effective()?.clone();
    println!("\nHistory:");
    for entry in &effective {
        let status = if entry.is_imputed {
            "missed"
        } else if entry.missed_day_flag {
            "logged"
        } else {
            "done"
        };
        println!(
            "  day {:>3}  {}  v{}  {:>5.1} kg  {}",
            program_day(&effective, entry.date),
            entry.date,
            entry.version_number,
            entry.weight_kg,
            status
        );
    }

    let progress = journal.progress()?;
    println!(
        "\nConsistency {}%  ({} of {} days)",
        progress.consistency_pct, progress.days_trained, progress.days_tracked
    );

    Ok(())
}
