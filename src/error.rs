use std::io;
use std::path::PathBuf;

/// Errors returned by the store and the journal built on top of it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem failure while reading, writing or locking the slot.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The slot exists but its contents are not a JSON array of entries.
    ///
    /// There is no automatic recovery. The journal cannot start until the
    /// slot is repaired by hand or wiped with `reset`.
    #[error("cannot decode entries in {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Entries could not be serialized for writing.
    #[error("cannot encode entries: {0}")]
    Encode(#[source] serde_json::Error),

    /// Another writer holds the lock on this slot.
    #[error("another writer holds the lock on {}", .path.display())]
    Locked { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
