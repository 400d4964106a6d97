//! Task domain model.
//!
//! # Invariants
//! - `completed_at` is absent for open tasks and set once a task is done.
//! - There is no transition from `Completed` back to `Open`.

use super::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Row id of a task.
pub type TaskId = i64;

/// Lifecycle state derived from `completed_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    Completed,
}

/// One row of the `tasks` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    /// Single mutable blob, replaced wholesale on edit.
    pub contents: String,
    /// Absent for legacy rows stored without a readable creation time.
    #[serde(with = "timestamp::serde_format_opt", default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(with = "timestamp::serde_format_opt", default)]
    pub completed_at: Option<NaiveDateTime>,
}

impl Task {
    pub fn status(&self) -> TaskStatus {
        if self.completed_at.is_some() {
            TaskStatus::Completed
        } else {
            TaskStatus::Open
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status() == TaskStatus::Completed
    }
}
