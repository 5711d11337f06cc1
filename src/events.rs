//! Task lifecycle events.
//!
//! Every mutating `TaskStore` operation returns the events it produced
//! instead of calling collaborators inline. The application layer forwards
//! completion events to the activity ledger and may also emit them as JSON
//! lines for external integrations.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::task::TaskId;

pub const EVENT_SCHEMA_VERSION: &str = "tend.event.v1";

/// High-level event kinds emitted by task mutations.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TaskAdded,
    TaskEdited,
    TaskDeleted,
    TaskCompleted,
    TaskUncompleted,
    TaskReordered,
}

/// A structured event tied to a single task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskEvent {
    pub schema_version: &'static str,
    pub event: EventKind,
    pub task_id: TaskId,
    pub timestamp: DateTime<Utc>,
}

impl TaskEvent {
    pub fn new(event: EventKind, task_id: TaskId) -> Self {
        Self {
            schema_version: EVENT_SCHEMA_VERSION,
            event,
            task_id,
            timestamp: Utc::now(),
        }
    }
}
