//! Process-wide store handle.
//!
//! # Responsibility
//! - Own the one SQLite connection used by a CLI run or an API process.
//! - Hand out exclusive access to that connection per repository call.
//!
//! # Invariants
//! - The connection is opened at process start and released exactly once,
//!   either through [`Store::close`] or when the store is dropped.
//! - Callers never keep the connection guard across requests.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Shared handle over the clerk database.
///
/// `Store` is `Send + Sync`; wrap it in an `Arc` to share it between
/// request workers.
#[derive(Debug)]
pub struct Store {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Store {
    /// Opens the database file at `path`, creating it and its schema if needed.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let conn = open_db(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file location, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Locks and returns the underlying connection.
    pub fn connection(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::Poisoned)
    }

    /// Releases the connection, reporting failures that `Drop` would swallow.
    pub fn close(self) -> DbResult<()> {
        let conn = self.conn.into_inner().map_err(|_| DbError::Poisoned)?;
        match conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                error!(
                    "event=db_close module=db status=error error_code=db_close_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Store;

    #[test]
    fn in_memory_store_has_no_path_and_closes_cleanly() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.path().is_none());
        {
            let conn = store.connection().unwrap();
            let enabled: i64 = conn
                .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
                .unwrap();
            assert_eq!(enabled, 1);
        }
        store.close().unwrap();
    }

    #[test]
    fn file_store_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("clerk.db");

        let store = Store::open(&path).unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
        assert!(path.exists());
        store.close().unwrap();
    }
}
