//! tend undo/redo command implementations.
//!
//! History boundaries are transient messages, not failures: hitting the
//! start or end of history prints a note and exits 0.

use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

#[derive(Serialize)]
struct HistoryData {
    applied: bool,
    active_count: usize,
    completed_count: usize,
}

pub fn run_undo(app: &mut App, output: OutputOptions) -> Result<()> {
    run_step(app, output, "undo", App::undo)
}

pub fn run_redo(app: &mut App, output: OutputOptions) -> Result<()> {
    run_step(app, output, "redo", App::redo)
}

fn run_step(
    app: &mut App,
    output: OutputOptions,
    command: &str,
    step: fn(&mut App) -> Result<()>,
) -> Result<()> {
    let applied = match step(app) {
        Ok(()) => true,
        Err(err) if err.is_history_boundary() => {
            let human = HumanOutput::new(err.to_string());
            return emit_success(
                output,
                command,
                &HistoryData {
                    applied: false,
                    active_count: app.store().active_count(),
                    completed_count: app.store().completed_count(),
                },
                Some(&human),
            );
        }
        Err(err) => return Err(err),
    };

    let mut human = HumanOutput::new(if command == "undo" {
        "Undid last change"
    } else {
        "Redid last undone change"
    });
    human.push_summary("tasks", app.store().len().to_string());
    human.push_summary("active", app.store().active_count().to_string());
    human.push_summary("completed", app.store().completed_count().to_string());

    emit_success(
        output,
        command,
        &HistoryData {
            applied,
            active_count: app.store().active_count(),
            completed_count: app.store().completed_count(),
        },
        Some(&human),
    )
}
