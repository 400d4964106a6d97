//! Core domain logic for clerk, a personal task and note store.
//! This crate is the single source of truth for storage and lookup rules;
//! the CLI and HTTP crates only parse input and print output.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod present;
pub mod reference;
pub mod repo;
pub mod search;

pub use config::{ClerkConfig, ConfigError};
pub use db::{DbError, DbResult, Store};
pub use logging::{default_log_level, flush_logging, init_logging, logging_status, LogSink};
pub use model::note::{Note, NoteHeader, NoteId, FRAGMENT_SEPARATOR};
pub use model::task::{Task, TaskId, TaskStatus};
pub use model::timestamp::TIMESTAMP_FORMAT;
pub use model::EntityKind;
pub use present::{highlight, Marker, Render};
pub use reference::{resolve, EntityRef, RefField};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{ErrorCategory, RepoError, RepoResult};
pub use search::substring::{search_all, SearchError, SearchHit, SearchResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
