//! Due-task scanning.
//!
//! A task is "due" when its due instant falls within a fixed window
//! (default ±60 seconds) of now at scan time. The scanner is poll-driven
//! (default every 30 seconds), fires at most once per task, and skips
//! completed tasks; a task toggled back incomplete re-enters eligibility.
//! A task whose window falls entirely between two polls is missed — the
//! window check is deliberately instantaneous, not an interval sweep.

use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveTime};

use crate::task::{Task, TaskId};

/// A due alert for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueAlert {
    pub id: TaskId,
    pub text: String,
}

/// Poll-driven due scanner with per-task fire tracking.
#[derive(Debug, Clone, Default)]
pub struct DueScanner {
    fired: HashSet<TaskId>,
}

impl DueScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the task list at `now`, returning alerts for tasks that just
    /// became due. `window_secs` is the half-width of the due window.
    pub fn scan(&mut self, tasks: &[Task], now: DateTime<Local>, window_secs: i64) -> Vec<DueAlert> {
        let mut alerts = Vec::new();

        for task in tasks {
            if task.completed {
                // Re-arm so uncompleting the task restores eligibility.
                self.fired.remove(&task.id);
                continue;
            }

            let Some(due) = due_instant(task) else {
                continue;
            };

            let delta = (due - now).num_seconds().abs();
            if delta > window_secs {
                continue;
            }

            if self.fired.insert(task.id) {
                alerts.push(DueAlert {
                    id: task.id,
                    text: task.text.clone(),
                });
            }
        }

        alerts
    }
}

/// The instant a task is due at, in local time. Tasks without a due date
/// are never due; a date without a time means midnight.
fn due_instant(task: &Task) -> Option<DateTime<Local>> {
    let date = task.due_date?;
    let time = task.due_time.unwrap_or(NaiveTime::MIN);
    date.and_time(time).and_local_timezone(Local).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::task::{TaskFields, TaskStore};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap()
    }

    fn store_with_due(offset_secs: i64) -> (TaskStore, TaskId) {
        let due = now() + Duration::seconds(offset_secs);
        let mut store = TaskStore::new();
        let (id, _) = store
            .add(
                "due task",
                TaskFields {
                    due_date: Some(due.date_naive()),
                    due_time: Some(due.time()),
                    location: None,
                },
            )
            .unwrap();
        (store, id)
    }

    #[test]
    fn fires_inside_window_once() {
        let (store, id) = store_with_due(30);
        let mut scanner = DueScanner::new();

        let alerts = scanner.scan(store.tasks(), now(), 60);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, id);

        // Same poll result on the next pass: already fired.
        let alerts = scanner.scan(store.tasks(), now() + Duration::seconds(30), 60);
        assert!(alerts.is_empty());
    }

    #[test]
    fn outside_window_does_not_fire() {
        let (store, _) = store_with_due(300);
        let mut scanner = DueScanner::new();
        assert!(scanner.scan(store.tasks(), now(), 60).is_empty());
    }

    #[test]
    fn completed_tasks_are_skipped_and_rearmed() {
        let (mut store, id) = store_with_due(0);
        let mut scanner = DueScanner::new();

        assert_eq!(scanner.scan(store.tasks(), now(), 60).len(), 1);

        store.toggle(id).unwrap();
        assert!(scanner.scan(store.tasks(), now(), 60).is_empty());

        // Uncompleting re-enters eligibility while still in the window.
        store.toggle(id).unwrap();
        assert_eq!(scanner.scan(store.tasks(), now(), 60).len(), 1);
    }

    #[test]
    fn tasks_without_due_date_never_fire() {
        let mut store = TaskStore::new();
        store.add("no due", TaskFields::default()).unwrap();
        let mut scanner = DueScanner::new();
        assert!(scanner.scan(store.tasks(), now(), 60).is_empty());
    }
}
