//! Note domain model: a header row owning ordered content fragments.
//!
//! # Invariants
//! - Fragments keep append order; they carry no identity of their own.
//! - A freshly created note owns exactly one fragment.

use super::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Row id of a note header.
pub type NoteId = i64;

/// Separator used when a note's fragments are shown as one text.
pub const FRAGMENT_SEPARATOR: &str = "; ";

/// One row of the `notes` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteHeader {
    pub id: NoteId,
    pub name: String,
    #[serde(with = "timestamp::serde_format_opt", default)]
    pub created_at: Option<NaiveDateTime>,
}

/// A note header together with all of its fragments in append order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(flatten)]
    pub header: NoteHeader,
    #[serde(rename = "contents")]
    pub fragments: Vec<String>,
}

impl Note {
    pub fn id(&self) -> NoteId {
        self.header.id
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    /// Fragments joined for display.
    pub fn contents(&self) -> String {
        self.fragments.join(FRAGMENT_SEPARATOR)
    }
}
