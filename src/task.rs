//! Task records and the in-memory task store.
//!
//! `TaskStore` is the sole owner of the ordered task list (most recent
//! first) and of two denormalized counters that must always agree with a
//! full scan of the list. Mutations return the lifecycle events they
//! produced; callers forward completion events to the activity ledger.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::events::{EventKind, TaskEvent};

/// Opaque task identity, assigned at creation, immutable.
pub type TaskId = Uuid;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// View filter over the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" | "done" => Ok(Filter::Completed),
            other => Err(Error::InvalidArgument(format!(
                "unknown filter '{other}' (expected all, active, or completed)"
            ))),
        }
    }
}

/// Optional fields accepted by `add` and `edit`.
#[derive(Debug, Clone, Default)]
pub struct TaskFields {
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub location: Option<String>,
}

/// Outcome of an `edit` call: empty text degrades to deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Updated,
    DeletedEmptyText,
}

/// Owner of the ordered task list and its cached counters.
///
/// Counters are recomputed from scratch on load (`recalculate_counters`)
/// and incrementally adjusted on every mutation path. After any public
/// operation returns, `active_count + completed_count == tasks.len()` and
/// `completed_count` equals the true count of completed tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    active_count: usize,
    completed_count: usize,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a persisted or restored task list.
    /// Counters are recomputed; the incremental paths are bypassed here.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut store = Self {
            tasks,
            active_count: 0,
            completed_count: 0,
        };
        store.recalculate_counters();
        store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn completed_count(&self) -> usize {
        self.completed_count
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Tasks matching the given view filter, in list order.
    pub fn filtered(&self, filter: Filter) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| filter.matches(task))
            .collect()
    }

    /// Deep copy of the current list, for history snapshots.
    pub fn to_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Replace the entire list (undo/redo, load). Recomputes counters.
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.recalculate_counters();
    }

    /// Create a task. The new task is prepended (most recent first).
    /// Fails with `EmptyInput` if the trimmed text is empty; no state
    /// changes in that case.
    pub fn add(&mut self, text: &str, fields: TaskFields) -> Result<(TaskId, Vec<TaskEvent>)> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyInput);
        }

        let task = Task {
            id: Uuid::new_v4(),
            text: trimmed.to_string(),
            completed: false,
            created_at: Utc::now(),
            due_date: fields.due_date,
            due_time: fields.due_time,
            location: fields.location,
        };
        let id = task.id;
        self.tasks.insert(0, task);
        self.active_count += 1;

        Ok((id, vec![TaskEvent::new(EventKind::TaskAdded, id)]))
    }

    /// Remove a task. Missing ids are an idempotent no-op reported via
    /// `NotFound` so the caller can decide whether to surface it.
    pub fn delete(&mut self, id: TaskId) -> Result<Vec<TaskEvent>> {
        let index = match self.tasks.iter().position(|task| task.id == id) {
            Some(index) => index,
            None => return Err(Error::NotFound(id.to_string())),
        };

        let removed = self.tasks.remove(index);
        if removed.completed {
            self.completed_count -= 1;
        } else {
            self.active_count -= 1;
        }

        Ok(vec![TaskEvent::new(EventKind::TaskDeleted, id)])
    }

    /// Flip a task's completed flag, moving its counter contribution.
    /// The returned events carry exactly one `TaskCompleted` or
    /// `TaskUncompleted` so the ledger is never double-counted.
    pub fn toggle(&mut self, id: TaskId) -> Result<Vec<TaskEvent>> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        task.completed = !task.completed;
        let kind = if task.completed {
            self.active_count -= 1;
            self.completed_count += 1;
            EventKind::TaskCompleted
        } else {
            self.completed_count -= 1;
            self.active_count += 1;
            EventKind::TaskUncompleted
        };

        Ok(vec![TaskEvent::new(kind, id)])
    }

    /// Update a task's text and optional fields in place. Empty trimmed
    /// text degrades to `delete`. Completion state and counters are
    /// untouched on the update path.
    pub fn edit(
        &mut self,
        id: TaskId,
        new_text: &str,
        fields: TaskFields,
    ) -> Result<(EditOutcome, Vec<TaskEvent>)> {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            let events = self.delete(id)?;
            return Ok((EditOutcome::DeletedEmptyText, events));
        }

        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        task.text = trimmed.to_string();
        task.due_date = fields.due_date;
        task.due_time = fields.due_time;
        task.location = fields.location;

        Ok((
            EditOutcome::Updated,
            vec![TaskEvent::new(EventKind::TaskEdited, id)],
        ))
    }

    /// Set every task to the opposite of "all currently completed".
    /// Counters are recomputed in the same pass; each individual flip is
    /// reported through the same completion events as `toggle`.
    pub fn toggle_all(&mut self) -> Vec<TaskEvent> {
        let target = !self.tasks.iter().all(|task| task.completed);
        let mut events = Vec::new();

        for task in &mut self.tasks {
            if task.completed == target {
                continue;
            }
            task.completed = target;
            let kind = if target {
                EventKind::TaskCompleted
            } else {
                EventKind::TaskUncompleted
            };
            events.push(TaskEvent::new(kind, task.id));
        }

        if target {
            self.completed_count = self.tasks.len();
            self.active_count = 0;
        } else {
            self.active_count = self.tasks.len();
            self.completed_count = 0;
        }

        events
    }

    /// Remove every completed task. Returns the removed count for user
    /// feedback along with the per-task deletion events.
    pub fn clear_completed(&mut self) -> (usize, Vec<TaskEvent>) {
        let mut events = Vec::new();
        let before = self.tasks.len();

        self.tasks.retain(|task| {
            if task.completed {
                events.push(TaskEvent::new(EventKind::TaskDeleted, task.id));
                false
            } else {
                true
            }
        });

        let removed = before - self.tasks.len();
        self.completed_count = 0;

        (removed, events)
    }

    /// Move task `id` to immediately before `before_id`. Pure permutation,
    /// no counter effect. Reordering a task before itself is a no-op.
    pub fn reorder(&mut self, id: TaskId, before_id: TaskId) -> Result<Vec<TaskEvent>> {
        if id == before_id {
            return Ok(Vec::new());
        }

        let from = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let task = self.tasks.remove(from);

        let to = self
            .tasks
            .iter()
            .position(|task| task.id == before_id)
            .ok_or_else(|| {
                // Put the moved task back before reporting the miss.
                self.tasks.insert(from, task.clone());
                Error::NotFound(before_id.to_string())
            })?;
        self.tasks.insert(to, task);

        Ok(vec![TaskEvent::new(EventKind::TaskReordered, id)])
    }

    /// Full O(n) rescan setting both counters from the live list.
    /// Required after bulk state replacement (undo/redo, load), which
    /// bypasses the incremental paths.
    pub fn recalculate_counters(&mut self) {
        self.completed_count = self.tasks.iter().filter(|task| task.completed).count();
        self.active_count = self.tasks.len() - self.completed_count;
    }

    /// Resolve a task by full id or unambiguous id prefix.
    pub fn resolve_id(&self, input: &str) -> Result<TaskId> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidArgument("task id cannot be empty".to_string()));
        }

        if let Ok(id) = Uuid::parse_str(trimmed) {
            return if self.get(id).is_some() {
                Ok(id)
            } else {
                Err(Error::NotFound(trimmed.to_string()))
            };
        }

        let needle = trimmed.to_ascii_lowercase();
        let matches: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|task| task.id.to_string().starts_with(&needle))
            .map(|task| task.id)
            .collect();

        match matches.len() {
            0 => Err(Error::NotFound(trimmed.to_string())),
            1 => Ok(matches[0]),
            _ => Err(Error::InvalidArgument(format!(
                "ambiguous task id '{trimmed}' ({} matches)",
                matches.len()
            ))),
        }
    }
}
