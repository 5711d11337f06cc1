//! tend focus command implementation.
//!
//! Runs the countdown in the foreground, one tick per elapsed second.
//! Work completion records the session in the activity ledger and rolls
//! straight into the granted break unless `--no-break` was given.
//! Interrupting the process discards the session with no partial credit.

use std::io::Write;
use std::time::Duration;

use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::focus::{parse_minutes, FocusTimer, TickOutcome};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::TaskId;

#[derive(Serialize)]
struct FocusData {
    minutes: u32,
    task: Option<TaskId>,
    break_minutes: Option<u32>,
    streak_days: usize,
    total_focus_minutes: u64,
}

pub fn run_focus(
    app: &mut App,
    output: OutputOptions,
    minutes: &str,
    task: Option<String>,
    no_break: bool,
) -> Result<()> {
    let minutes = parse_minutes(minutes)?;
    let task_id = task
        .map(|raw| app.store().resolve_id(&raw))
        .transpose()?;

    let mut timer = FocusTimer::new(app.config().focus.clone());
    timer.start_work(minutes, task_id)?;

    if let Some(id) = task_id {
        let text = app
            .store()
            .get(id)
            .map(|task| task.text.clone())
            .unwrap_or_default();
        announce(output, &format!("Focusing on: {text}"));
    }

    let break_minutes = match run_countdown(&mut timer, output, "focus")? {
        TickOutcome::WorkComplete { break_minutes } => break_minutes,
        _ => unreachable!("work countdown ends in work completion"),
    };

    app.record_focus_session(minutes as u64)?;
    announce(output, "Focus session complete.");

    let granted_break = if no_break {
        None
    } else {
        announce(output, &format!("Starting {break_minutes} minute break."));
        timer.start_break(break_minutes)?;
        run_countdown(&mut timer, output, "break")?;
        announce(output, "Break over.");
        Some(break_minutes)
    };

    let mut human = HumanOutput::new("Focus session recorded");
    human.push_summary("minutes", minutes.to_string());
    human.push_summary("streak", format!("{} day(s)", app.ledger().current_streak()));
    human.push_summary(
        "total focus",
        format!("{} min", app.ledger().total_focus_minutes()),
    );

    emit_success(
        output,
        "focus",
        &FocusData {
            minutes,
            task: task_id,
            break_minutes: granted_break,
            streak_days: app.ledger().current_streak(),
            total_focus_minutes: app.ledger().total_focus_minutes(),
        },
        Some(&human),
    )
}

/// Drive the timer to completion at one tick per wall-clock second,
/// repainting a countdown line between ticks.
fn run_countdown(
    timer: &mut FocusTimer,
    output: OutputOptions,
    label: &str,
) -> Result<TickOutcome> {
    loop {
        if let Some(remaining) = remaining_secs(timer) {
            paint_countdown(output, label, remaining);
        }

        std::thread::sleep(Duration::from_secs(1));
        match timer.tick() {
            TickOutcome::Running => continue,
            done => {
                clear_countdown(output);
                return Ok(done);
            }
        }
    }
}

fn remaining_secs(timer: &FocusTimer) -> Option<u32> {
    match timer.state() {
        crate::focus::FocusState::Running { remaining_secs, .. } => Some(*remaining_secs),
        crate::focus::FocusState::Idle => None,
    }
}

fn paint_countdown(output: OutputOptions, label: &str, remaining: u32) {
    if output.quiet || output.json {
        return;
    }
    print!("\r{label}: {:02}:{:02} ", remaining / 60, remaining % 60);
    let _ = std::io::stdout().flush();
}

fn clear_countdown(output: OutputOptions) {
    if output.quiet || output.json {
        return;
    }
    println!();
}

fn announce(output: OutputOptions, message: &str) {
    if output.quiet || output.json {
        return;
    }
    println!("{message}");
}
