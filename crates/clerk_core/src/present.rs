//! Human-readable rendering of tasks, notes and search hits.
//!
//! # Invariants
//! - One header line (`id`, `name`, `created_at` when known, and
//!   `completed_at` for completed tasks), then an indented contents block
//!   only when there is something to show.
//! - Highlighting is applied to search output only; `render` never marks text.

use crate::model::note::{Note, NoteHeader};
use crate::model::task::Task;
use crate::model::timestamp::format_timestamp;
use chrono::NaiveDateTime;
use std::fmt::Write;

/// Capability shared by every displayable entity.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Task {
    fn render(&self) -> String {
        let mut out = header_line(self.id, &self.name, self.created_at.as_ref());
        if let Some(completed_at) = &self.completed_at {
            let _ = write!(out, " | completed_at: {}", format_timestamp(completed_at));
        }
        push_contents(&mut out, &self.contents);
        out
    }
}

impl Render for NoteHeader {
    fn render(&self) -> String {
        header_line(self.id, &self.name, self.created_at.as_ref())
    }
}

impl Render for Note {
    fn render(&self) -> String {
        let mut out = self.header.render();
        push_contents(&mut out, &self.contents());
        out
    }
}

fn header_line(id: i64, name: &str, created_at: Option<&NaiveDateTime>) -> String {
    let mut out = format!("- id: {id} | name: {name}");
    if let Some(created_at) = created_at {
        let _ = write!(out, " | created_at: {}", format_timestamp(created_at));
    }
    out
}

fn push_contents(out: &mut String, contents: &str) {
    if !contents.is_empty() {
        let _ = write!(out, "\n  Contents: {contents}");
    }
}

/// Opening/closing text placed around each highlighted occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub open: &'static str,
    pub close: &'static str,
}

impl Marker {
    /// Plain-text marker, usable where escape sequences are not.
    pub const BRACKETS: Marker = Marker {
        open: "[",
        close: "]",
    };
}

/// Wraps every literal occurrence of `query` in `text` with `marker`.
///
/// An empty query leaves `text` unchanged.
pub fn highlight(text: &str, query: &str, marker: &Marker) -> String {
    if query.is_empty() {
        return text.to_string();
    }
    text.replace(query, &format!("{}{query}{}", marker.open, marker.close))
}
