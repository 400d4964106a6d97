//! Domain model for the two entity kinds clerk stores.
//!
//! # Responsibility
//! - Define the transient read projections of persisted tasks and notes.
//! - Own the one timestamp layout shared by storage, display and JSON.
//!
//! # Invariants
//! - Every entity is identified by its integer row id, unique and immutable.
//! - Names are not unique; the id is the only stable identity.

pub mod note;
pub mod task;
pub mod timestamp;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Entity kinds addressable through references and returned by search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Task,
    Note,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Note => "note",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
