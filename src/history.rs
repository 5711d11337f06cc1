//! Bounded linear undo/redo over task-list snapshots.
//!
//! Every mutating store operation records a deep copy of the pre-mutation
//! list. A new snapshot taken while the cursor sits behind the tail
//! discards the abandoned redo branch first. Capacity is bounded; the
//! oldest entry is evicted and the cursor clamped so it keeps pointing at
//! the same logical entry.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::task::Task;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// An immutable deep copy of the task list at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Snapshot {
    tasks: Vec<Task>,
}

/// Ordered snapshot log with a cursor at the "current" entry.
///
/// Cursor invariant: `-1 <= cursor < entries.len() <= capacity`, where
/// `-1` means "no snapshot recorded yet". The log is persisted as a blob
/// so undo works across CLI invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vec<Snapshot>,
    cursor: isize,
    #[serde(default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: -1,
            capacity: capacity.max(1),
        }
    }

    /// Clamp a loaded log to the configured capacity and force the cursor
    /// back into bounds, evicting oldest entries as needed.
    pub fn restore(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        while self.entries.len() > self.capacity {
            self.entries.remove(0);
            self.cursor -= 1;
        }
        self.cursor = self
            .cursor
            .clamp(-1, self.entries.len() as isize - 1);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor < self.entries.len() as isize - 1
    }

    /// True when the cursor sits at the newest entry.
    pub fn at_tail(&self) -> bool {
        !self.entries.is_empty() && self.cursor == self.entries.len() as isize - 1
    }

    /// True when the entry under the cursor equals `tasks`.
    pub fn current_matches(&self, tasks: &[Task]) -> bool {
        if self.cursor < 0 {
            return false;
        }
        self.entries[self.cursor as usize].tasks == tasks
    }

    /// Drop the newest entry. Used when a mutation aborts after its
    /// pre-mutation snapshot was already taken, so a later undo does not
    /// replay a no-op. Only valid while the cursor is at the tail.
    pub fn undo_discard(&mut self) -> bool {
        if !self.at_tail() {
            return false;
        }
        self.entries.pop();
        self.cursor -= 1;
        true
    }

    /// Record a deep copy of `tasks` as the new current entry.
    pub fn snapshot(&mut self, tasks: &[Task]) {
        // A new edit after undo erases the abandoned redo branch.
        let keep = (self.cursor + 1) as usize;
        self.entries.truncate(keep);

        self.entries.push(Snapshot {
            tasks: tasks.to_vec(),
        });
        self.cursor += 1;

        if self.entries.len() > self.capacity {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step the cursor back and return a deep copy of that snapshot.
    pub fn undo(&mut self) -> Result<Vec<Task>> {
        if self.cursor <= 0 {
            return Err(Error::NothingToUndo);
        }
        self.cursor -= 1;
        Ok(self.entries[self.cursor as usize].tasks.clone())
    }

    /// Step the cursor forward and return a deep copy of that snapshot.
    pub fn redo(&mut self) -> Result<Vec<Task>> {
        if !self.can_redo() {
            return Err(Error::NothingToRedo);
        }
        self.cursor += 1;
        Ok(self.entries[self.cursor as usize].tasks.clone())
    }
}
