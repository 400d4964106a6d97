//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define CRUD contracts for tasks and notes.
//! - Isolate SQLite query details from the CLI/HTTP shells.
//! - Resolve [`EntityRef`] values to row ids through static statements.
//!
//! # Invariants
//! - Query text is never built from user input; values are always bound.
//! - A reference matching no row is `NotFound`, more than one row is
//!   `Ambiguous`, and in both cases nothing is written.

use crate::db::DbError;
use crate::reference::{EntityRef, ID_PREFIX};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod note_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Coarse error classes the HTTP shell maps to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A reference matched zero rows.
    NotFound,
    /// Malformed or ambiguous input.
    Validation,
    /// Underlying storage failure.
    Store,
}

/// Repository error for task/note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(EntityRef),
    /// A name reference matched several rows.
    Ambiguous {
        reference: EntityRef,
        matches: usize,
    },
    Validation(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Ambiguous { .. } | Self::Validation(_) => ErrorCategory::Validation,
            Self::Db(_)
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => ErrorCategory::Store,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(reference) => write!(f, "no entry matches {reference}"),
            Self::Ambiguous { reference, matches } => write!(
                f,
                "{reference} matches {matches} entries; use `{ID_PREFIX}<id>` to pick one"
            ),
            Self::Validation(message) => write!(f, "invalid input: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Statically known statements used to resolve references for one table.
///
/// Both statements take the reference value as `?1` and select the row id.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LookupStatements {
    pub by_id: &'static str,
    pub by_name: &'static str,
}

/// Resolves `reference` to exactly one row id.
pub(crate) fn lookup_row_id(
    conn: &Connection,
    statements: &LookupStatements,
    reference: &EntityRef,
) -> RepoResult<i64> {
    let sql = match reference {
        EntityRef::Id(_) => statements.by_id,
        EntityRef::Name(_) => statements.by_name,
    };

    let mut stmt = conn.prepare_cached(sql)?;
    let mut rows = stmt.query([reference.value()])?;
    let mut ids = Vec::new();
    while let Some(row) = rows.next()? {
        ids.push(row.get::<_, i64>(0)?);
    }

    match ids.as_slice() {
        [] => Err(RepoError::NotFound(reference.clone())),
        [id] => Ok(*id),
        _ => Err(RepoError::Ambiguous {
            reference: reference.clone(),
            matches: ids.len(),
        }),
    }
}

/// Rejects names that could not be addressed by a name reference later.
pub(crate) fn validate_name(name: &str) -> RepoResult<()> {
    if name.trim().is_empty() {
        return Err(RepoError::Validation("name cannot be blank".to_string()));
    }
    if name.starts_with(ID_PREFIX) {
        return Err(RepoError::Validation(format!(
            "name cannot start with `{ID_PREFIX}`, got `{name}`"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_table_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM pragma_table_info(?1)
            WHERE name = ?2
        );",
        [table, column],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::{validate_name, ErrorCategory, RepoError};
    use crate::db::DbError;
    use crate::reference::EntityRef;
    use std::error::Error;

    #[test]
    fn validate_name_rejects_blank_and_id_like_names() {
        assert!(validate_name("groceries").is_ok());
        assert!(matches!(validate_name("   "), Err(RepoError::Validation(_))));
        assert!(matches!(validate_name("#1"), Err(RepoError::Validation(_))));
    }

    #[test]
    fn store_failure_message_appears_once_in_error_chain() {
        let err = RepoError::from(DbError::Sqlite(rusqlite::Error::InvalidQuery));
        let mut messages = vec![err.to_string()];
        let mut source = err.source();
        while let Some(inner) = source {
            messages.push(inner.to_string());
            source = inner.source();
        }
        assert_eq!(messages, vec![rusqlite::Error::InvalidQuery.to_string()]);
    }

    #[test]
    fn categories_follow_error_taxonomy() {
        let not_found = RepoError::NotFound(EntityRef::id(1));
        let ambiguous = RepoError::Ambiguous {
            reference: EntityRef::Name("dup".to_string()),
            matches: 2,
        };
        let missing = RepoError::MissingRequiredTable("tasks");
        assert_eq!(not_found.category(), ErrorCategory::NotFound);
        assert_eq!(ambiguous.category(), ErrorCategory::Validation);
        assert_eq!(missing.category(), ErrorCategory::Store);
        assert!(ambiguous.to_string().contains("matches 2 entries"));
    }
}
