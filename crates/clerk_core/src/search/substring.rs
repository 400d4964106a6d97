//! `LIKE`-based substring search over tasks and notes.
//!
//! # Responsibility
//! - Match a query against task `name`/`contents` and note `name`/fragments.
//! - Return full entities so hits render like `list`/`show` output.
//!
//! # Invariants
//! - Matching is case-sensitive containment; there is no ranking.
//! - Task hits come before note hits, each group ordered by id ascending,
//!   and each entity appears at most once.
//! - A note hit carries every fragment of the note, not only matching ones.
//! - The query is bound, never interpolated, but `%` and `_` inside it keep
//!   their `LIKE` wildcard meaning.

use crate::db::DbError;
use crate::model::note::Note;
use crate::model::task::Task;
use crate::model::EntityKind;
use crate::present::Render;
use crate::repo::note_repo::{load_fragments, parse_note_header_row, NOTE_HEADER_SELECT_SQL};
use crate::repo::task_repo::{parse_task_row, TASK_SELECT_SQL};
use crate::repo::{ErrorCategory, RepoError};
use log::debug;
use rusqlite::Connection;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for DB interaction and result decoding.
#[derive(Debug)]
pub enum SearchError {
    Db(DbError),
    InvalidData(String),
}

impl SearchError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Store
    }
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid search row: {message}"),
        }
    }
}

impl Error for SearchError {}

impl From<DbError> for SearchError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RepoError> for SearchError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Db(err) => Self::Db(err),
            other => Self::InvalidData(other.to_string()),
        }
    }
}

/// Single search hit: either a task or a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchHit {
    Task(Task),
    Note(Note),
}

impl SearchHit {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Task(_) => EntityKind::Task,
            Self::Note(_) => EntityKind::Note,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::Task(task) => task.id,
            Self::Note(note) => note.id(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Task(task) => task.render(),
            Self::Note(note) => note.render(),
        }
    }
}

/// Searches tasks, then notes, for `query` as a case-sensitive substring.
///
/// Returns an empty list for an empty query.
pub fn search_all(conn: &Connection, query: &str) -> SearchResult<Vec<SearchHit>> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let started_at = Instant::now();
    let pattern = like_pattern(query);
    let mut hits = search_tasks(conn, &pattern)?;
    let task_hits = hits.len();
    hits.extend(search_notes(conn, &pattern)?);

    debug!(
        "event=search module=search status=ok task_hits={} note_hits={} duration_ms={}",
        task_hits,
        hits.len() - task_hits,
        started_at.elapsed().as_millis()
    );
    Ok(hits)
}

fn like_pattern(query: &str) -> String {
    format!("%{query}%")
}

fn search_tasks(conn: &Connection, pattern: &str) -> SearchResult<Vec<SearchHit>> {
    let mut stmt = conn.prepare(&format!(
        "{TASK_SELECT_SQL}
         WHERE name LIKE ?1
            OR contents LIKE ?1
         ORDER BY id ASC;"
    ))?;
    let mut rows = stmt.query([pattern])?;
    let mut hits = Vec::new();
    while let Some(row) = rows.next()? {
        hits.push(SearchHit::Task(parse_task_row(row)?));
    }
    Ok(hits)
}

fn search_notes(conn: &Connection, pattern: &str) -> SearchResult<Vec<SearchHit>> {
    let mut stmt = conn.prepare(&format!(
        "{NOTE_HEADER_SELECT_SQL}
         WHERE name LIKE ?1
            OR EXISTS (
                SELECT 1
                FROM notes_contents c
                WHERE c.note_id = notes.id
                  AND c.contents LIKE ?1
            )
         ORDER BY id ASC;"
    ))?;
    let mut rows = stmt.query([pattern])?;
    let mut headers = Vec::new();
    while let Some(row) = rows.next()? {
        headers.push(parse_note_header_row(row)?);
    }

    headers
        .into_iter()
        .map(|header| -> SearchResult<SearchHit> {
            let fragments = load_fragments(conn, header.id)?;
            Ok(SearchHit::Note(Note { header, fragments }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{like_pattern, SearchError};
    use crate::db::DbError;
    use std::error::Error;

    #[test]
    fn like_pattern_wraps_query_without_escaping() {
        assert_eq!(like_pattern("milk"), "%milk%");
        assert_eq!(like_pattern("50%_off"), "%50%_off%");
    }

    #[test]
    fn store_failure_is_not_repeated_through_source() {
        let err = SearchError::from(DbError::Poisoned);
        assert_eq!(err.to_string(), "store connection lock is poisoned");
        assert!(err.source().is_none());
    }
}
