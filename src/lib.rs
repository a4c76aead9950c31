mod draft;
mod effective;
mod entry;
mod error;
mod impute;
mod journal;
pub mod program;
pub mod snapshot;
mod store;

pub use draft::{DayTargets, EntryDraft};
pub use effective::{project, Effective};
pub use entry::{BodyStats, CreatedBy, DailyEntry};
pub use error::{Error, Result};
pub use impute::{impute, missed_day, IMPUTED_NOTES};
pub use journal::{Journal, JournalBuilder};
pub use store::{EntryStore, LockMode, DEFAULT_SLOT};
