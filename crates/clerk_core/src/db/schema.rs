//! Idempotent schema bootstrap.
//!
//! Every statement uses `IF NOT EXISTS`, so running the bootstrap against an
//! already initialized database (including one created by older clerk builds)
//! leaves existing rows untouched.

use crate::db::DbResult;
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Tables the repositories rely on, in dependency order.
pub const REQUIRED_TABLES: [&str; 3] = ["tasks", "notes", "notes_contents"];

/// Creates all clerk relations that do not exist yet.
pub fn apply_schema(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.commit()?;
    Ok(())
}
