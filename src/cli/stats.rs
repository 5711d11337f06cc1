//! tend stats command implementation.

use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

const HEATMAP_CELLS: [char; 5] = ['.', '\u{2591}', '\u{2592}', '\u{2593}', '\u{2588}'];

#[derive(Serialize)]
struct StatsData {
    active_count: usize,
    completed_count: usize,
    today_tasks_completed: u32,
    today_focus_sessions: u32,
    streak_days: usize,
    active_days: usize,
    window_days: usize,
    total_focus_minutes: u64,
    heatmap_levels: Vec<u8>,
}

pub fn run_stats(app: &App, output: OutputOptions) -> Result<()> {
    let ledger = app.ledger();
    let today = ledger.today();
    let levels = ledger.heatmap_levels();

    let mut human = HumanOutput::new("Activity");
    human.push_summary("active tasks", app.store().active_count().to_string());
    human.push_summary("completed tasks", app.store().completed_count().to_string());
    human.push_summary("completed today", today.tasks_completed.to_string());
    human.push_summary("focus sessions today", today.focus_sessions_completed.to_string());
    human.push_summary("streak", format!("{} day(s)", ledger.current_streak()));
    human.push_summary(
        "active days",
        format!("{} of {}", ledger.active_day_count(), ledger.window_days()),
    );
    human.push_summary("total focus", format!("{} min", ledger.total_focus_minutes()));
    for week in render_heatmap(&levels) {
        human.push_detail(week);
    }

    emit_success(
        output,
        "stats",
        &StatsData {
            active_count: app.store().active_count(),
            completed_count: app.store().completed_count(),
            today_tasks_completed: today.tasks_completed,
            today_focus_sessions: today.focus_sessions_completed,
            streak_days: ledger.current_streak(),
            active_days: ledger.active_day_count(),
            window_days: ledger.window_days(),
            total_focus_minutes: ledger.total_focus_minutes(),
            heatmap_levels: levels,
        },
        Some(&human),
    )
}

/// One line of cells per week, oldest week first.
fn render_heatmap(levels: &[u8]) -> Vec<String> {
    levels
        .chunks(7)
        .map(|week| {
            week.iter()
                .map(|level| HEATMAP_CELLS[(*level as usize).min(4)])
                .collect()
        })
        .collect()
}
