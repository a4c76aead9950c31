//! Snapshot persistence for the effective projection.

use crate::effective::Effective;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// A persisted checkpoint of the effective projection.
///
/// Written atomically (via a `.tmp` + rename) whenever the journal has to
/// re-project the log. On the next read, if `hash` still matches the slot,
/// the stored state is used as-is and the sort-and-fold is skipped.
///
/// The snapshot file is JSON and can be inspected directly:
///
/// ```text
/// $ cat views/ippo_tracker_v1.snapshot.json | jq '.hash'
/// "5f0c2e9d41a7b3c8"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ProjectionSnapshot {
    /// The effective state derived from the slot.
    pub state: Effective,

    /// Hex-encoded xxh64 hash of the slot bytes the state was derived from.
    pub hash: String,
}

impl ProjectionSnapshot {
    /// Create a new snapshot.
    pub fn new(state: Effective, hash: String) -> Self {
        ProjectionSnapshot { state, hash }
    }
}

/// Compute the xxh64 hash of raw slot bytes, hex-encoded.
pub fn slot_hash(raw: &[u8]) -> String {
    let hash = xxhash_rust::xxh64::xxh64(raw, 0);
    format!("{:016x}", hash)
}

/// Save a snapshot atomically to disk.
///
/// Writes to a `.tmp` file first, syncs, then renames to the final path.
/// If the process crashes mid-write, the old snapshot file survives intact.
pub fn save(path: &Path, snapshot: &ProjectionSnapshot) -> io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");

    let json = serde_json::to_string(snapshot)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_data()?;
    drop(file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Load a snapshot from disk.
///
/// Returns `Ok(None)` if the file doesn't exist or if deserialization fails.
/// A corrupt snapshot is treated as missing, which forces a re-projection.
pub fn load(path: &Path) -> io::Result<Option<ProjectionSnapshot>> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    match serde_json::from_str(&contents) {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(e) => {
            log::warn!(
                "dayfold: ignoring unreadable snapshot {}: {e}",
                path.display()
            );
            Ok(None)
        }
    }
}

/// Delete a snapshot file and its `.tmp` file if present.
pub fn delete(path: &Path) -> io::Result<()> {
    crate::store::remove_if_exists(path)?;
    crate::store::remove_if_exists(&path.with_extension("json.tmp"))
}
