//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide note APIs over the `notes` header relation and its
//!   `notes_contents` fragment relation.
//! - Own append semantics: fragments are only ever added, never edited.
//!
//! # Invariants
//! - Creating a note writes the header and its first fragment in one
//!   transaction; a failed fragment insert leaves no header behind.
//! - Appends resolve the owning note id first and insert against that id.
//! - Deleting a header removes its fragments through `ON DELETE CASCADE`.
//! - Fragments are read back in storage order (`rowid ASC`).

use crate::model::note::{Note, NoteHeader, NoteId};
use crate::model::timestamp::format_timestamp;
use crate::reference::EntityRef;
use crate::repo::task_repo::read_stored_timestamp;
use crate::repo::{
    ensure_table_ready, lookup_row_id, validate_name, LookupStatements, RepoError, RepoResult,
};
use chrono::NaiveDateTime;
use log::debug;
use rusqlite::{params, Connection, Row, TransactionBehavior};

pub(crate) const NOTE_HEADER_SELECT_SQL: &str = "SELECT
    id,
    COALESCE(name, '') AS name,
    created_at
FROM notes";

const NOTE_LOOKUP: LookupStatements = LookupStatements {
    by_id: "SELECT id FROM notes WHERE id = ?1;",
    by_name: "SELECT id FROM notes WHERE name = ?1 ORDER BY id ASC;",
};

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Lists every note header ordered by id ascending.
    fn list_notes(&self) -> RepoResult<Vec<NoteHeader>>;
    /// Gets the referenced note with all fragments in append order.
    fn get_note(&self, reference: &EntityRef) -> RepoResult<Note>;
    /// Creates a note holding exactly one fragment and returns its id.
    fn add_note(
        &mut self,
        name: &str,
        initial_contents: &str,
        now: NaiveDateTime,
    ) -> RepoResult<NoteId>;
    /// Appends one fragment to the referenced note.
    fn append_note(&mut self, reference: &EntityRef, contents: &str) -> RepoResult<NoteId>;
    /// Deletes the referenced note and, by cascade, its fragments.
    fn delete_note(&mut self, reference: &EntityRef) -> RepoResult<NoteId>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "notes", &["id", "name", "created_at"])?;
        ensure_table_ready(conn, "notes_contents", &["note_id", "contents"])?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn list_notes(&self) -> RepoResult<Vec<NoteHeader>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_HEADER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut headers = Vec::new();
        while let Some(row) = rows.next()? {
            headers.push(parse_note_header_row(row)?);
        }
        Ok(headers)
    }

    fn get_note(&self, reference: &EntityRef) -> RepoResult<Note> {
        let id = lookup_row_id(self.conn, &NOTE_LOOKUP, reference)?;
        let header = {
            let mut stmt = self
                .conn
                .prepare(&format!("{NOTE_HEADER_SELECT_SQL} WHERE id = ?1;"))?;
            let mut rows = stmt.query([id])?;
            match rows.next()? {
                Some(row) => parse_note_header_row(row)?,
                None => return Err(RepoError::NotFound(reference.clone())),
            }
        };
        let fragments = load_fragments(self.conn, id)?;
        Ok(Note { header, fragments })
    }

    fn add_note(
        &mut self,
        name: &str,
        initial_contents: &str,
        now: NaiveDateTime,
    ) -> RepoResult<NoteId> {
        validate_name(name)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO notes (name, created_at) VALUES (?1, ?2);",
            params![name, format_timestamp(&now)],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO notes_contents (note_id, contents) VALUES (?1, ?2);",
            params![id, initial_contents],
        )?;
        tx.commit()?;

        debug!("event=note_add module=repo status=ok id={id}");
        Ok(id)
    }

    fn append_note(&mut self, reference: &EntityRef, contents: &str) -> RepoResult<NoteId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = lookup_row_id(&tx, &NOTE_LOOKUP, reference)?;
        tx.execute(
            "INSERT INTO notes_contents (note_id, contents) VALUES (?1, ?2);",
            params![id, contents],
        )?;
        tx.commit()?;

        debug!("event=note_append module=repo status=ok id={id}");
        Ok(id)
    }

    fn delete_note(&mut self, reference: &EntityRef) -> RepoResult<NoteId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = lookup_row_id(&tx, &NOTE_LOOKUP, reference)?;
        let changed = tx.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(reference.clone()));
        }
        tx.commit()?;

        debug!("event=note_delete module=repo status=ok id={id}");
        Ok(id)
    }
}

pub(crate) fn parse_note_header_row(row: &Row<'_>) -> RepoResult<NoteHeader> {
    let id: NoteId = row.get("id")?;
    Ok(NoteHeader {
        id,
        name: row.get("name")?,
        created_at: read_stored_timestamp(row, "notes", "created_at", id)?,
    })
}

/// Loads every fragment owned by `note_id` in append order.
pub(crate) fn load_fragments(conn: &Connection, note_id: NoteId) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT COALESCE(contents, '')
         FROM notes_contents
         WHERE note_id = ?1
         ORDER BY rowid ASC;",
    )?;
    let mut rows = stmt.query([note_id])?;
    let mut fragments = Vec::new();
    while let Some(row) = rows.next()? {
        fragments.push(row.get(0)?);
    }
    Ok(fragments)
}
