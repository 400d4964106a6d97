//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the flat `tasks` relation.
//! - Own the completion transition (`completed_at` set, never cleared).
//!
//! # Invariants
//! - Write paths validate names before SQL mutations.
//! - Read paths tolerate legacy rows: NULL text reads as empty and an empty
//!   or unparsable timestamp reads as absent, so one bad row never hides
//!   the others.
//! - Mutations by reference touch at most the single resolved row.

use crate::model::task::{Task, TaskId};
use crate::model::timestamp::{format_timestamp, parse_timestamp};
use crate::reference::EntityRef;
use crate::repo::{
    ensure_table_ready, lookup_row_id, validate_name, LookupStatements, RepoError, RepoResult,
};
use chrono::NaiveDateTime;
use log::{debug, warn};
use rusqlite::{params, Connection, Row};

pub(crate) const TASK_SELECT_SQL: &str = "SELECT
    id,
    COALESCE(name, '') AS name,
    COALESCE(contents, '') AS contents,
    created_at,
    completed_at
FROM tasks";

const TASK_LOOKUP: LookupStatements = LookupStatements {
    by_id: "SELECT id FROM tasks WHERE id = ?1;",
    by_name: "SELECT id FROM tasks WHERE name = ?1 ORDER BY id ASC;",
};

/// Repository interface for task operations.
pub trait TaskRepository {
    /// Lists every task ordered by id ascending.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Gets the task the reference resolves to.
    fn get_task(&self, reference: &EntityRef) -> RepoResult<Task>;
    /// Creates an open task and returns its id.
    fn add_task(&self, name: &str, contents: &str, now: NaiveDateTime) -> RepoResult<TaskId>;
    /// Replaces the contents of the referenced task.
    fn edit_task(&self, reference: &EntityRef, contents: &str) -> RepoResult<TaskId>;
    /// Deletes the referenced task.
    fn delete_task(&self, reference: &EntityRef) -> RepoResult<TaskId>;
    /// Marks the referenced task completed at `now`; repeated calls move the time.
    fn complete_task(&self, reference: &EntityRef, now: NaiveDateTime) -> RepoResult<TaskId>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(
            conn,
            "tasks",
            &["id", "name", "contents", "created_at", "completed_at"],
        )?;
        Ok(Self { conn })
    }

    fn resolve(&self, reference: &EntityRef) -> RepoResult<TaskId> {
        lookup_row_id(self.conn, &TASK_LOOKUP, reference)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn get_task(&self, reference: &EntityRef) -> RepoResult<Task> {
        let id = self.resolve(reference)?;
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => parse_task_row(row),
            None => Err(RepoError::NotFound(reference.clone())),
        }
    }

    fn add_task(&self, name: &str, contents: &str, now: NaiveDateTime) -> RepoResult<TaskId> {
        validate_name(name)?;

        self.conn.execute(
            "INSERT INTO tasks (name, contents, created_at) VALUES (?1, ?2, ?3);",
            params![name, contents, format_timestamp(&now)],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("event=task_add module=repo status=ok id={id}");
        Ok(id)
    }

    fn edit_task(&self, reference: &EntityRef, contents: &str) -> RepoResult<TaskId> {
        let id = self.resolve(reference)?;
        let changed = self.conn.execute(
            "UPDATE tasks SET contents = ?1 WHERE id = ?2;",
            params![contents, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(reference.clone()));
        }
        debug!("event=task_edit module=repo status=ok id={id}");
        Ok(id)
    }

    fn delete_task(&self, reference: &EntityRef) -> RepoResult<TaskId> {
        let id = self.resolve(reference)?;
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(reference.clone()));
        }
        debug!("event=task_delete module=repo status=ok id={id}");
        Ok(id)
    }

    fn complete_task(&self, reference: &EntityRef, now: NaiveDateTime) -> RepoResult<TaskId> {
        let id = self.resolve(reference)?;
        let changed = self.conn.execute(
            "UPDATE tasks SET completed_at = ?1 WHERE id = ?2;",
            params![format_timestamp(&now), id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(reference.clone()));
        }
        debug!("event=task_complete module=repo status=ok id={id}");
        Ok(id)
    }
}

pub(crate) fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id: TaskId = row.get("id")?;
    Ok(Task {
        id,
        name: row.get("name")?,
        contents: row.get("contents")?,
        created_at: read_stored_timestamp(row, "tasks", "created_at", id)?,
        completed_at: read_stored_timestamp(row, "tasks", "completed_at", id)?,
    })
}

/// Reads an optional timestamp column; NULL, blank and unreadable values
/// are all absent.
pub(crate) fn read_stored_timestamp(
    row: &Row<'_>,
    table: &str,
    column: &str,
    id: i64,
) -> RepoResult<Option<NaiveDateTime>> {
    let Some(raw) = row.get::<_, Option<String>>(column)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    match parse_timestamp(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            warn!("event=timestamp_unreadable module=repo table={table} column={column} id={id}");
            Ok(None)
        }
    }
}
