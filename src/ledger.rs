//! Daily activity ledger: a fixed trailing window of per-day counters
//! backing the streak and heatmap reporting.
//!
//! The window always spans exactly `window_days` calendar days ending
//! today. Rolling to a new day evicts the oldest entry and appends a
//! fresh zero entry; days the app never saw appear as zeros, not gaps.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_DAYS: usize = 84;

/// One calendar day of activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub tasks_completed: u32,
    pub focus_sessions_completed: u32,
}

impl DayEntry {
    fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            tasks_completed: 0,
            focus_sessions_completed: 0,
        }
    }

    pub fn total_activity(&self) -> u32 {
        self.tasks_completed + self.focus_sessions_completed
    }
}

/// Fixed-length rolling window of daily activity plus the accumulated
/// focus-minute total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLedger {
    entries: Vec<DayEntry>,
    total_focus_minutes: u64,
}

impl ActivityLedger {
    /// A fresh ledger: a full window of zero entries ending at `today`,
    /// never a partial one.
    pub fn new(window_days: usize, today: NaiveDate) -> Self {
        let window_days = window_days.max(1);
        let entries = (0..window_days)
            .map(|offset| {
                let back = (window_days - 1 - offset) as i64;
                DayEntry::zero(today - Duration::days(back))
            })
            .collect();
        Self {
            entries,
            total_focus_minutes: 0,
        }
    }

    pub fn entries(&self) -> &[DayEntry] {
        &self.entries
    }

    pub fn window_days(&self) -> usize {
        self.entries.len()
    }

    pub fn total_focus_minutes(&self) -> u64 {
        self.total_focus_minutes
    }

    pub fn today(&self) -> &DayEntry {
        self.entries.last().expect("window is never empty")
    }

    fn today_mut(&mut self) -> &mut DayEntry {
        self.entries.last_mut().expect("window is never empty")
    }

    /// Advance the window until its last entry is `today`. Handles the
    /// app being unused for any number of days; a window that is already
    /// current is untouched. A last entry in the future (clock rollback)
    /// is reset to a fresh window rather than left inconsistent.
    pub fn roll_to(&mut self, today: NaiveDate) {
        let window = self.window_days();
        let last = self.today().date;

        if last > today || (today - last).num_days() as usize >= window {
            *self = Self {
                total_focus_minutes: self.total_focus_minutes,
                ..Self::new(window, today)
            };
            return;
        }

        let mut date = last;
        while date < today {
            date += Duration::days(1);
            self.entries.remove(0);
            self.entries.push(DayEntry::zero(date));
        }
    }

    /// Renormalize a loaded window to `window_days` entries ending at
    /// `today`: truncate the oldest entries or pad zeros at the front.
    pub fn restore(mut self, window_days: usize, today: NaiveDate) -> Self {
        let window_days = window_days.max(1);
        if self.entries.is_empty() {
            return Self {
                total_focus_minutes: self.total_focus_minutes,
                ..Self::new(window_days, today)
            };
        }

        self.roll_to(today);

        while self.entries.len() > window_days {
            self.entries.remove(0);
        }
        while self.entries.len() < window_days {
            let first = self.entries[0].date;
            self.entries.insert(0, DayEntry::zero(first - Duration::days(1)));
        }

        self.roll_to(today);
        self
    }

    pub fn record_task_completed(&mut self) {
        self.today_mut().tasks_completed += 1;
    }

    /// Decrement today's task counter, clamped at zero. The clamp guards
    /// against a completion recorded on a previous day being undone today.
    pub fn record_task_uncompleted(&mut self) {
        let today = self.today_mut();
        today.tasks_completed = today.tasks_completed.saturating_sub(1);
    }

    pub fn record_focus_session_completed(&mut self, minutes: u64) {
        self.today_mut().focus_sessions_completed += 1;
        self.total_focus_minutes += minutes;
    }

    /// Consecutive trailing days (from today backward) with nonzero
    /// activity, stopping at the first zero day.
    pub fn current_streak(&self) -> usize {
        self.entries
            .iter()
            .rev()
            .take_while(|entry| entry.total_activity() > 0)
            .count()
    }

    /// Days in the window with nonzero activity.
    pub fn active_day_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.total_activity() > 0)
            .count()
    }

    /// Heatmap cell levels, one per window entry: 0 for no activity,
    /// otherwise the quartile (1-4) of the day's total relative to the
    /// window maximum.
    pub fn heatmap_levels(&self) -> Vec<u8> {
        let max = self
            .entries
            .iter()
            .map(DayEntry::total_activity)
            .max()
            .unwrap_or(0);

        self.entries
            .iter()
            .map(|entry| {
                let total = entry.total_activity();
                if total == 0 || max == 0 {
                    0
                } else {
                    let level = (total as u64 * 4).div_ceil(max as u64);
                    level.clamp(1, 4) as u8
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn fresh_ledger_is_a_full_zero_window_ending_today() {
        let today = date("2026-08-29");
        let ledger = ActivityLedger::new(84, today);

        assert_eq!(ledger.window_days(), 84);
        assert_eq!(ledger.today().date, today);
        assert_eq!(ledger.entries()[0].date, today - Duration::days(83));
        assert!(ledger.entries().iter().all(|e| e.total_activity() == 0));
    }

    #[test]
    fn roll_fills_skipped_days_with_zeros() {
        let mut ledger = ActivityLedger::new(7, date("2026-08-20"));
        ledger.record_task_completed();

        ledger.roll_to(date("2026-08-23"));
        assert_eq!(ledger.window_days(), 7);
        assert_eq!(ledger.today().date, date("2026-08-23"));
        assert_eq!(ledger.today().total_activity(), 0);

        // The active day slid back three positions but is still in view.
        let entry = ledger
            .entries()
            .iter()
            .find(|e| e.date == date("2026-08-20"))
            .unwrap();
        assert_eq!(entry.tasks_completed, 1);
    }

    #[test]
    fn roll_past_whole_window_resets_but_keeps_focus_minutes() {
        let mut ledger = ActivityLedger::new(7, date("2026-01-01"));
        ledger.record_focus_session_completed(25);

        ledger.roll_to(date("2026-06-01"));
        assert_eq!(ledger.window_days(), 7);
        assert_eq!(ledger.today().date, date("2026-06-01"));
        assert!(ledger.entries().iter().all(|e| e.total_activity() == 0));
        assert_eq!(ledger.total_focus_minutes(), 25);
    }

    /// Lay down an activity pattern, oldest to newest, ending today.
    fn ledger_with_pattern(today: NaiveDate, pattern: &[bool]) -> ActivityLedger {
        let days = pattern.len() as i64;
        let mut ledger = ActivityLedger::new(pattern.len(), today - Duration::days(days - 1));
        for (offset, active) in pattern.iter().enumerate() {
            ledger.roll_to(today - Duration::days(days - 1 - offset as i64));
            if *active {
                ledger.record_task_completed();
            }
        }
        ledger
    }

    #[test]
    fn streak_counts_trailing_run_only() {
        let today = date("2026-08-29");
        // A zero day between two runs: the earlier run must not count.
        // Trailing run of three, not four.
        let ledger = ledger_with_pattern(today, &[true, false, true, true, true]);
        assert_eq!(ledger.current_streak(), 3);
        assert_eq!(ledger.active_day_count(), 4);
    }

    #[test]
    fn streak_stops_at_first_zero_day() {
        let today = date("2026-08-29");
        let mut ledger = ledger_with_pattern(today, &[false, true, true, true, false, true]);
        assert_eq!(ledger.current_streak(), 1);

        // Uncomplete today's task: streak breaks immediately.
        ledger.record_task_uncompleted();
        assert_eq!(ledger.current_streak(), 0);
        assert_eq!(ledger.active_day_count(), 3);
    }

    #[test]
    fn uncomplete_clamps_at_zero() {
        let mut ledger = ActivityLedger::new(7, date("2026-08-29"));
        ledger.record_task_uncompleted();
        assert_eq!(ledger.today().tasks_completed, 0);
    }

    #[test]
    fn heatmap_buckets_by_quartile_of_window_max() {
        let today = date("2026-08-29");
        let mut ledger = ActivityLedger::new(5, today - Duration::days(4));
        let counts = [8u32, 0, 2, 4, 6];
        for (offset, count) in counts.iter().enumerate() {
            ledger.roll_to(today - Duration::days(4 - offset as i64));
            for _ in 0..*count {
                ledger.record_task_completed();
            }
        }

        assert_eq!(ledger.heatmap_levels(), vec![4, 0, 1, 2, 3]);
    }

    #[test]
    fn restore_renormalizes_window_length() {
        let today = date("2026-08-29");
        let short = ActivityLedger::new(3, today);
        let restored = short.restore(7, today);
        assert_eq!(restored.window_days(), 7);
        assert_eq!(restored.today().date, today);

        let long = ActivityLedger::new(10, today);
        let restored = long.restore(7, today);
        assert_eq!(restored.window_days(), 7);
        assert_eq!(restored.today().date, today);
    }
}
