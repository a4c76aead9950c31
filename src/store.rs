use crate::entry::DailyEntry;
use crate::error::{Error, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Slot name used when the caller does not pick one.
pub const DEFAULT_SLOT: &str = "ippo_tracker_v1";

/// Whether a store takes an exclusive advisory lock on its slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LockMode {
    /// One writer per slot. A second open fails with [`Error::Locked`].
    #[default]
    Exclusive,
    /// No locking. The caller guarantees a single writer.
    None,
}

/// The append-only sequence of daily entries, persisted as one JSON array
/// in `<dir>/<slot>.json`.
///
/// There is no incremental write mode: every append rewrites the whole
/// array. Writes go to a `.tmp` file that is synced and renamed over the
/// slot, so a failed write leaves the previous contents in place.
pub struct EntryStore {
    dir: PathBuf,
    slot_path: PathBuf,
    tmp_path: PathBuf,
    _lock: Option<File>,
}

impl std::fmt::Debug for EntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryStore")
            .field("slot_path", &self.slot_path)
            .field("locked", &self._lock.is_some())
            .finish()
    }
}

impl EntryStore {
    /// Open the default slot in `dir` with an exclusive lock.
    ///
    /// Creates the directory if it doesn't exist. The slot file itself is
    /// only created by the first write.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_lock(dir, DEFAULT_SLOT, LockMode::Exclusive)
    }

    /// Open the named slot in `dir` with the given lock mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Locked`] if `lock` is [`LockMode::Exclusive`] and
    /// another store already holds the slot, or [`Error::Io`] if the
    /// directory or lock file cannot be created.
    pub fn open_with_lock(dir: impl AsRef<Path>, slot: &str, lock: LockMode) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let slot_path = dir.join(format!("{slot}.json"));
        let tmp_path = dir.join(format!("{slot}.json.tmp"));

        let lock_file = match lock {
            LockMode::Exclusive => {
                let lock_path = dir.join(format!("{slot}.lock"));
                let file = OpenOptions::new()
                    .create(true)
                    .truncate(false)
                    .write(true)
                    .open(&lock_path)?;
                match file.try_lock_exclusive() {
                    Ok(()) => Some(file),
                    Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                        return Err(Error::Locked { path: slot_path });
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            LockMode::None => None,
        };

        Ok(EntryStore {
            dir,
            slot_path,
            tmp_path,
            _lock: lock_file,
        })
    }

    /// Append one entry to the end of the log.
    ///
    /// No validation happens here: the store accepts whatever the caller
    /// constructed.
    pub fn append(&mut self, entry: &DailyEntry) -> Result<()> {
        self.append_batch(std::slice::from_ref(entry))
    }

    /// Append several entries in a single write.
    ///
    /// Either every entry becomes visible or, on failure, none does. An
    /// empty batch does not touch the slot.
    pub fn append_batch(&mut self, entries: &[DailyEntry]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut all = self.read_all()?;
        all.extend_from_slice(entries);
        self.write_all(&all)?;
        log::debug!(
            "dayfold: appended {} entr{} to {}",
            entries.len(),
            if entries.len() == 1 { "y" } else { "ies" },
            self.slot_path.display()
        );
        Ok(())
    }

    /// Every entry ever appended, in stored order.
    ///
    /// The order is not sorted by date. An absent or empty slot yields an
    /// empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Corrupt`] if the slot cannot be decoded.
    pub fn read_all(&self) -> Result<Vec<DailyEntry>> {
        let raw = self.read_raw()?;
        decode(&self.slot_path, &raw)
    }

    /// Raw bytes currently in the slot, empty if the slot is absent.
    pub fn read_raw(&self) -> Result<Vec<u8>> {
        match fs::read(&self.slot_path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the whole log. Irreversible; no backup is taken.
    ///
    /// Idempotent: does not error if the slot doesn't exist.
    pub fn reset(&mut self) -> Result<()> {
        remove_if_exists(&self.slot_path)?;
        remove_if_exists(&self.tmp_path)?;
        Ok(())
    }

    /// Returns the data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the slot file.
    pub fn slot_path(&self) -> &Path {
        &self.slot_path
    }

    fn write_all(&self, entries: &[DailyEntry]) -> Result<()> {
        let json = serde_json::to_vec(entries).map_err(Error::Encode)?;

        let mut file = File::create(&self.tmp_path)?;
        file.write_all(&json)?;
        file.sync_data()?;
        drop(file);

        fs::rename(&self.tmp_path, &self.slot_path)?;
        Ok(())
    }
}

/// Decode slot bytes. Blank content counts as an empty log.
pub(crate) fn decode(path: &Path, raw: &[u8]) -> Result<Vec<DailyEntry>> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(raw).map_err(|source| Error::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
