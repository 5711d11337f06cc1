//! tend task command implementations.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::app::App;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{EditOutcome, Filter, Task, TaskFields};

#[derive(Serialize)]
struct TaskData<'a> {
    task: &'a Task,
    active_count: usize,
    completed_count: usize,
}

#[derive(Serialize)]
struct ListData<'a> {
    filter: Filter,
    tasks: Vec<&'a Task>,
    active_count: usize,
    completed_count: usize,
}

#[derive(Serialize)]
struct RemovalData {
    removed: usize,
    active_count: usize,
    completed_count: usize,
}

fn parse_due_date(raw: &str) -> Result<NaiveDate> {
    raw.parse::<NaiveDate>().map_err(|_| {
        Error::InvalidArgument(format!("invalid due date '{raw}' (expected YYYY-MM-DD)"))
    })
}

fn parse_due_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| Error::InvalidArgument(format!("invalid due time '{raw}' (expected HH:MM)")))
}

fn parse_fields(
    due_date: Option<String>,
    due_time: Option<String>,
    location: Option<String>,
) -> Result<TaskFields> {
    Ok(TaskFields {
        due_date: due_date
            .as_deref()
            .map(str::trim)
            .map(parse_due_date)
            .transpose()?,
        due_time: due_time
            .as_deref()
            .map(str::trim)
            .map(parse_due_time)
            .transpose()?,
        location: location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()),
    })
}

/// Edit-flag semantics: an omitted flag keeps the current value, an
/// empty value clears it.
fn merge_field<T, F>(raw: Option<String>, current: Option<T>, parse: F) -> Result<Option<T>>
where
    F: Fn(&str) -> Result<T>,
{
    match raw.as_deref().map(str::trim) {
        None => Ok(current),
        Some("") => Ok(None),
        Some(raw) => parse(raw).map(Some),
    }
}

fn describe(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!("[{mark}] {}  {}", &task.id.to_string()[..8], task.text);
    if let Some(date) = task.due_date {
        line.push_str(&format!("  (due {date}"));
        if let Some(time) = task.due_time {
            line.push_str(&format!(" {}", time.format("%H:%M")));
        }
        line.push(')');
    }
    if let Some(location) = &task.location {
        line.push_str(&format!("  @{location}"));
    }
    line
}

fn push_counts(human: &mut HumanOutput, app: &App) {
    human.push_summary("active", app.store().active_count().to_string());
    human.push_summary("completed", app.store().completed_count().to_string());
}

pub fn run_add(
    app: &mut App,
    output: OutputOptions,
    text: &str,
    due_date: Option<String>,
    due_time: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let fields = parse_fields(due_date, due_time, location)?;
    let id = app.add(text, fields)?;

    let task = app.store().get(id).expect("task was just added");
    let mut human = HumanOutput::new(format!("Added: {}", describe(task)));
    push_counts(&mut human, app);

    emit_success(
        output,
        "add",
        &TaskData {
            task,
            active_count: app.store().active_count(),
            completed_count: app.store().completed_count(),
        },
        Some(&human),
    )
}

pub fn run_list(app: &App, output: OutputOptions, filter: &str) -> Result<()> {
    let filter: Filter = filter.parse()?;
    let tasks = app.store().filtered(filter);

    let mut human = HumanOutput::new(format!("Tasks ({} shown)", tasks.len()));
    for task in &tasks {
        human.push_detail(describe(task));
    }
    push_counts(&mut human, app);

    emit_success(
        output,
        "list",
        &ListData {
            filter,
            tasks,
            active_count: app.store().active_count(),
            completed_count: app.store().completed_count(),
        },
        Some(&human),
    )
}

pub fn run_done(app: &mut App, output: OutputOptions, id: &str) -> Result<()> {
    let id = app.store().resolve_id(id)?;
    app.toggle(id)?;

    let task = app.store().get(id).expect("toggle keeps the task");
    let header = if task.completed {
        format!("Completed: {}", task.text)
    } else {
        format!("Reopened: {}", task.text)
    };
    let mut human = HumanOutput::new(header);
    push_counts(&mut human, app);

    emit_success(
        output,
        "done",
        &TaskData {
            task,
            active_count: app.store().active_count(),
            completed_count: app.store().completed_count(),
        },
        Some(&human),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn run_edit(
    app: &mut App,
    output: OutputOptions,
    id: &str,
    text: &str,
    due_date: Option<String>,
    due_time: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let id = app.store().resolve_id(id)?;
    let (current_date, current_time, current_location) = {
        let task = app.store().get(id).expect("resolved id exists");
        (task.due_date, task.due_time, task.location.clone())
    };
    let fields = TaskFields {
        due_date: merge_field(due_date, current_date, parse_due_date)?,
        due_time: merge_field(due_time, current_time, parse_due_time)?,
        location: merge_field(location, current_location, |raw| Ok(raw.to_string()))?,
    };
    let outcome = app.edit(id, text, fields)?;

    match outcome {
        EditOutcome::Updated => {
            let task = app.store().get(id).expect("task was just edited");
            let mut human = HumanOutput::new(format!("Updated: {}", describe(task)));
            push_counts(&mut human, app);
            emit_success(
                output,
                "edit",
                &TaskData {
                    task,
                    active_count: app.store().active_count(),
                    completed_count: app.store().completed_count(),
                },
                Some(&human),
            )
        }
        EditOutcome::DeletedEmptyText => {
            let mut human = HumanOutput::new("Deleted (empty text)");
            human.push_warning("editing a task to empty text deletes it");
            push_counts(&mut human, app);
            emit_success(
                output,
                "edit",
                &RemovalData {
                    removed: 1,
                    active_count: app.store().active_count(),
                    completed_count: app.store().completed_count(),
                },
                Some(&human),
            )
        }
    }
}

pub fn run_rm(app: &mut App, output: OutputOptions, id: &str) -> Result<()> {
    let id = app.store().resolve_id(id)?;
    app.delete(id)?;

    let mut human = HumanOutput::new(format!("Deleted {id}"));
    push_counts(&mut human, app);

    emit_success(
        output,
        "rm",
        &RemovalData {
            removed: 1,
            active_count: app.store().active_count(),
            completed_count: app.store().completed_count(),
        },
        Some(&human),
    )
}

pub fn run_move(app: &mut App, output: OutputOptions, id: &str, before: &str) -> Result<()> {
    let id = app.store().resolve_id(id)?;
    let before_id = app.store().resolve_id(before)?;
    app.reorder(id, before_id)?;

    let mut human = HumanOutput::new(format!("Moved {id} before {before_id}"));
    for task in app.store().tasks() {
        human.push_detail(describe(task));
    }

    emit_success(
        output,
        "move",
        &ListData {
            filter: Filter::All,
            tasks: app.store().tasks().iter().collect(),
            active_count: app.store().active_count(),
            completed_count: app.store().completed_count(),
        },
        Some(&human),
    )
}

pub fn run_toggle_all(app: &mut App, output: OutputOptions) -> Result<()> {
    app.toggle_all()?;

    let mut human = HumanOutput::new("Toggled all tasks");
    push_counts(&mut human, app);

    emit_success(
        output,
        "toggle-all",
        &ListData {
            filter: Filter::All,
            tasks: app.store().tasks().iter().collect(),
            active_count: app.store().active_count(),
            completed_count: app.store().completed_count(),
        },
        Some(&human),
    )
}

pub fn run_clear_completed(app: &mut App, output: OutputOptions) -> Result<()> {
    let removed = app.clear_completed()?;

    let mut human = HumanOutput::new(format!(
        "Cleared {removed} completed task{}",
        if removed == 1 { "" } else { "s" }
    ));
    push_counts(&mut human, app);

    emit_success(
        output,
        "clear-completed",
        &RemovalData {
            removed,
            active_count: app.store().active_count(),
            completed_count: app.store().completed_count(),
        },
        Some(&human),
    )
}

pub fn run_locations(app: &App, output: OutputOptions) -> Result<()> {
    let entries = app.locations().entries();

    let mut human = HumanOutput::new(format!("Recent locations ({})", entries.len()));
    for entry in entries {
        human.push_detail(entry.clone());
    }

    emit_success(output, "locations", &entries, Some(&human))
}
