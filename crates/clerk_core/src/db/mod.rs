//! SQLite storage bootstrap and the shared store handle.
//!
//! # Responsibility
//! - Open and configure SQLite connections for clerk core.
//! - Create the `tasks`, `notes` and `notes_contents` relations when missing.
//! - Own the single connection shared by every repository call.
//!
//! # Invariants
//! - Core code must not read/write application data before the schema exists.
//! - Returned connections enforce foreign keys, so note fragments never
//!   outlive their note.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod open;
pub mod schema;
mod store;

pub use open::{open_db, open_db_in_memory};
pub use store::Store;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The directory holding the database file could not be created.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A thread panicked while holding the store connection.
    Poisoned,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "cannot prepare database path `{}`: {source}", path.display())
            }
            Self::Poisoned => write!(f, "store connection lock is poisoned"),
        }
    }
}

/// `Display` already carries the inner error text, so no variant reports a
/// `source`; otherwise chain-walking printers repeat the same message.
impl Error for DbError {}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
