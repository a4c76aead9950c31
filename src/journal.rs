use crate::draft::{DayTargets, EntryDraft};
use crate::effective::{Effective, project};
use crate::entry::{BodyStats, DailyEntry};
use crate::error::Result;
use crate::impute::impute;
use crate::program::Progress;
use crate::snapshot::{self, ProjectionSnapshot, slot_hash};
use crate::store::{self, DEFAULT_SLOT, EntryStore, LockMode};
use chrono::{Local, NaiveDate, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Builder for configuring a [`Journal`].
///
/// # Examples
///
/// ```no_run
/// use dayfold::{BodyStats, Journal, LockMode};
///
/// let mut journal = Journal::builder("./data")
///     .slot("ippo_tracker_v1")
///     .baseline(BodyStats { weight_kg: 90.0, waist_cm: 101.0 })
///     .lock_mode(LockMode::Exclusive)
///     .open()?;
/// journal.impute_missing_days()?;
/// # Ok::<(), dayfold::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct JournalBuilder {
    dir: PathBuf,
    slot: String,
    baseline: BodyStats,
    lock: LockMode,
}

impl JournalBuilder {
    fn new(dir: impl AsRef<Path>) -> Self {
        JournalBuilder {
            dir: dir.as_ref().to_path_buf(),
            slot: DEFAULT_SLOT.to_string(),
            baseline: BodyStats::INITIAL,
            lock: LockMode::default(),
        }
    }

    /// Name of the slot file (without extension). Defaults to
    /// [`DEFAULT_SLOT`].
    pub fn slot(mut self, slot: &str) -> Self {
        self.slot = slot.to_string();
        self
    }

    /// Body measurements used before anything has been logged.
    pub fn baseline(mut self, baseline: BodyStats) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn lock_mode(mut self, lock: LockMode) -> Self {
        self.lock = lock;
        self
    }

    /// Open the store and create the `views/` directory for snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Locked`](crate::Error::Locked) if another journal
    /// holds the slot, or [`Error::Io`](crate::Error::Io) on filesystem
    /// failure.
    pub fn open(self) -> Result<Journal> {
        let store = EntryStore::open_with_lock(&self.dir, &self.slot, self.lock)?;
        let views_dir = self.dir.join("views");
        fs::create_dir_all(&views_dir)?;

        Ok(Journal {
            store,
            baseline: self.baseline,
            snapshot_path: views_dir.join(format!("{}.snapshot.json", self.slot)),
            cached: None,
        })
    }
}

/// One session over the daily log.
///
/// Construct a journal once at startup and pass it by reference to whatever
/// needs to read or write. Typical session:
///
/// 1. [`impute_missing_days`](Journal::impute_missing_days) to backfill
///    days that elapsed since the last session.
/// 2. [`effective`](Journal::effective) to render dashboards and history.
/// 3. [`log_day`](Journal::log_day) or [`mark_done`](Journal::mark_done)
///    for new logs and edits.
pub struct Journal {
    store: EntryStore,
    baseline: BodyStats,
    snapshot_path: PathBuf,
    cached: Option<ProjectionSnapshot>,
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal")
            .field("store", &self.store)
            .field("baseline", &self.baseline)
            .field("snapshot_path", &self.snapshot_path)
            .finish()
    }
}

impl Journal {
    /// Create a builder for configuring a journal.
    pub fn builder(dir: impl AsRef<Path>) -> JournalBuilder {
        JournalBuilder::new(dir)
    }

    /// Open a journal in `dir` with the default slot, baseline and lock.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::builder(dir).open()
    }

    /// Every raw entry, in stored order.
    pub fn entries(&self) -> Result<Vec<DailyEntry>> {
        self.store.read_all()
    }

    /// The effective state: one entry per date, highest version wins.
    ///
    /// Served from the projection snapshot while the slot is unchanged;
    /// otherwise the log is re-projected and a new snapshot is written.
    /// The snapshot is only a cache: if it cannot be read or written, the
    /// projection is computed from the slot and a warning is logged.
    pub fn effective(&mut self) -> Result<&Effective> {
        let raw = self.store.read_raw()?;
        let hash = slot_hash(&raw);

        let snap = match self.cached.take() {
            Some(snap) if snap.hash == hash => snap,
            _ => self.load_or_project(&raw, hash)?,
        };
        Ok(&self.cached.insert(snap).state)
    }

    /// Append a prepared entry as-is.
    ///
    /// The caller is responsible for the version number. Prefer
    /// [`log_day`](Journal::log_day), which assigns it.
    pub fn append(&mut self, entry: &DailyEntry) -> Result<()> {
        self.store.append(entry)
    }

    /// Log or re-log `date` from a draft.
    ///
    /// If the date already has an effective entry (logged or backfilled),
    /// the new entry supersedes it with the next version number. Missing
    /// body measurements carry forward from the nearest known day.
    pub fn log_day(&mut self, date: NaiveDate, draft: EntryDraft) -> Result<DailyEntry> {
        let baseline = self.baseline;
        let mut state = self.effective()?.clone();

        let entry = draft.build(
            date,
            state.get(date),
            state.latest_before(date),
            baseline,
            Utc::now(),
        );
        self.store.append(&entry)?;

        state.insert(entry.clone());
        self.remember(state);
        Ok(entry)
    }

    /// Quick-log `date` as completed with every plan target met.
    ///
    /// Also redeems a backfilled day: the perfect entry simply becomes the
    /// next version for that date.
    pub fn mark_done(
        &mut self,
        date: NaiveDate,
        targets: DayTargets,
        note: impl Into<String>,
    ) -> Result<DailyEntry> {
        self.log_day(date, EntryDraft::perfect_day(targets, note))
    }

    /// Body measurements to pre-fill a form for `date`: the date's own
    /// entry, else the nearest earlier one, else the baseline.
    pub fn last_known_body(&mut self, date: NaiveDate) -> Result<BodyStats> {
        let baseline = self.baseline;
        let state = self.effective()?;
        Ok(state
            .get(date)
            .or_else(|| state.latest_before(date))
            .map_or(baseline, DailyEntry::body))
    }

    /// Backfill missed days up to yesterday by the local wall clock.
    ///
    /// Meant to run once at session start. Returns the entries written.
    pub fn impute_missing_days(&mut self) -> Result<Vec<DailyEntry>> {
        self.impute_missing_days_as_of(Local::now().date_naive())
    }

    /// Backfill missed days strictly before `today`.
    ///
    /// All placeholders are written in one batch: if the write fails, none
    /// of them are persisted.
    pub fn impute_missing_days_as_of(&mut self, today: NaiveDate) -> Result<Vec<DailyEntry>> {
        let baseline = self.baseline;
        let mut state = self.effective()?.clone();

        let added = impute(&mut state, today, baseline, Utc::now());
        if added.is_empty() {
            return Ok(added);
        }

        self.store.append_batch(&added)?;
        log::info!("dayfold: imputed {} missing day(s)", added.len());
        self.remember(state);
        Ok(added)
    }

    /// Summary figures over the effective state.
    pub fn progress(&mut self) -> Result<Progress> {
        Ok(Progress::from_effective(self.effective()?))
    }

    /// Wipe the whole log and its snapshot. Irreversible.
    ///
    /// Confirmation is the caller's job. The journal stays usable and
    /// behaves as on first run.
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset()?;
        self.cached = None;
        if let Err(e) = snapshot::delete(&self.snapshot_path) {
            log::warn!(
                "dayfold: cannot delete snapshot {}: {e}",
                self.snapshot_path.display()
            );
        }
        log::info!("dayfold: reset {}", self.store.slot_path().display());
        Ok(())
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Returns the baseline body measurements.
    pub fn baseline(&self) -> BodyStats {
        self.baseline
    }

    /// Returns the path to the projection snapshot.
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    fn load_or_project(&self, raw: &[u8], hash: String) -> Result<ProjectionSnapshot> {
        match snapshot::load(&self.snapshot_path) {
            Ok(Some(snap)) if snap.hash == hash => return Ok(snap),
            Ok(Some(_)) => log::warn!(
                "dayfold: snapshot {} is stale, re-projecting",
                self.snapshot_path.display()
            ),
            Ok(None) => log::debug!("dayfold: no snapshot, projecting full log"),
            Err(e) => log::warn!(
                "dayfold: cannot read snapshot {}: {e}, re-projecting",
                self.snapshot_path.display()
            ),
        }

        let entries = store::decode(self.store.slot_path(), raw)?;
        let snap = ProjectionSnapshot::new(project(entries), hash);
        self.save_snapshot(&snap);
        Ok(snap)
    }

    fn save_snapshot(&self, snap: &ProjectionSnapshot) {
        if let Err(e) = snapshot::save(&self.snapshot_path, snap) {
            log::warn!(
                "dayfold: cannot write snapshot {}: {e}",
                self.snapshot_path.display()
            );
        }
    }

    /// Record `state` as the projection of the slot's current contents.
    ///
    /// `state` must be what projecting the slot would produce; it is the
    /// previous projection with just-appended entries folded in.
    ///
    /// Runs after the slot write has succeeded, so it never fails: if the
    /// slot cannot be re-read the cache is dropped and the next read
    /// re-projects.
    fn remember(&mut self, state: Effective) {
        let raw = match self.store.read_raw() {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("dayfold: cannot re-read slot after write: {e}");
                self.cached = None;
                return;
            }
        };
        let snap = ProjectionSnapshot::new(state, slot_hash(&raw));
        self.save_snapshot(&snap);
        self.cached = Some(snap);
    }
}
