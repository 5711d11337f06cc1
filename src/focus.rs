//! Focus session state machine.
//!
//! At most one session exists at a time: either `Idle` or `Running` with a
//! work or break phase. The machine is driven by one tick per elapsed
//! second while not paused; completion of a work phase reports the session
//! and offers a break whose length follows the long-break cadence.

use serde::Serialize;

use crate::config::FocusConfig;
use crate::error::{Error, Result};
use crate::task::TaskId;

/// Phase of a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    Break,
}

/// Current machine state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FocusState {
    #[default]
    Idle,
    Running {
        phase: Phase,
        paused: bool,
        remaining_secs: u32,
        total_secs: u32,
        /// Weak reference: the session never owns task lifecycle.
        task: Option<TaskId>,
    },
}

impl FocusState {
    pub fn is_idle(&self) -> bool {
        matches!(self, FocusState::Idle)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, FocusState::Running { paused: true, .. })
    }
}

/// What a tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Idle, paused, or still counting down.
    Running,
    /// A work phase finished; the session counts. Carries the granted
    /// break length in minutes.
    WorkComplete { break_minutes: u32 },
    /// A break phase finished; back to idle.
    BreakComplete,
}

/// Single-instance countdown machine with the long-break cadence.
#[derive(Debug, Clone, Default)]
pub struct FocusTimer {
    state: FocusState,
    config: FocusConfig,
    /// Work sessions completed in the current run, for the cadence.
    completed_work_sessions: u32,
}

impl FocusTimer {
    pub fn new(config: FocusConfig) -> Self {
        Self {
            state: FocusState::Idle,
            config,
            completed_work_sessions: 0,
        }
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work_sessions
    }

    /// Start a work session. Rejects a zero duration and refuses to
    /// replace a session that is already running.
    pub fn start_work(&mut self, minutes: u32, task: Option<TaskId>) -> Result<()> {
        if minutes == 0 {
            return Err(Error::InvalidDuration(minutes.to_string()));
        }
        if !self.state.is_idle() {
            return Err(Error::OperationFailed(
                "a focus session is already running".to_string(),
            ));
        }

        let total_secs = Self::secs_for(minutes)?;
        self.state = FocusState::Running {
            phase: Phase::Work,
            paused: false,
            remaining_secs: total_secs,
            total_secs,
            task,
        };
        Ok(())
    }

    /// Start the break granted by the last work completion.
    pub fn start_break(&mut self, minutes: u32) -> Result<()> {
        if minutes == 0 {
            return Err(Error::InvalidDuration(minutes.to_string()));
        }
        if !self.state.is_idle() {
            return Err(Error::OperationFailed(
                "a focus session is already running".to_string(),
            ));
        }

        let total_secs = Self::secs_for(minutes)?;
        self.state = FocusState::Running {
            phase: Phase::Break,
            paused: false,
            remaining_secs: total_secs,
            total_secs,
            task: None,
        };
        Ok(())
    }

    /// Pause the countdown. No-op if already paused or idle.
    pub fn pause(&mut self) {
        if let FocusState::Running { paused, .. } = &mut self.state {
            *paused = true;
        }
    }

    /// Resume the countdown. No-op if not paused or idle.
    pub fn resume(&mut self) {
        if let FocusState::Running { paused, .. } = &mut self.state {
            *paused = false;
        }
    }

    /// Stop the session, discarding remaining time. No partial credit.
    pub fn stop(&mut self) {
        self.state = FocusState::Idle;
    }

    /// Advance one elapsed second. Ticks while idle are ignored so a
    /// stray timer firing after cleanup cannot corrupt state.
    pub fn tick(&mut self) -> TickOutcome {
        let (phase, paused, remaining) = match &mut self.state {
            FocusState::Idle => return TickOutcome::Running,
            FocusState::Running {
                phase,
                paused,
                remaining_secs,
                ..
            } => (*phase, *paused, remaining_secs),
        };

        if paused {
            return TickOutcome::Running;
        }

        *remaining = remaining.saturating_sub(1);
        if *remaining > 0 {
            return TickOutcome::Running;
        }

        self.state = FocusState::Idle;
        match phase {
            Phase::Work => {
                self.completed_work_sessions += 1;
                TickOutcome::WorkComplete {
                    break_minutes: self.break_minutes_for(self.completed_work_sessions),
                }
            }
            Phase::Break => TickOutcome::BreakComplete,
        }
    }

    /// Durations are tracked in whole seconds; a minute count that does
    /// not fit in `u32` seconds is rejected, not wrapped.
    fn secs_for(minutes: u32) -> Result<u32> {
        minutes
            .checked_mul(60)
            .ok_or_else(|| Error::InvalidDuration(minutes.to_string()))
    }

    /// Every Nth completed work session in the run earns the long break.
    fn break_minutes_for(&self, completed: u32) -> u32 {
        let every = self.config.long_break_every.max(1);
        if completed % every == 0 {
            self.config.long_break_minutes
        } else {
            self.config.short_break_minutes
        }
    }
}

/// Parse a user-supplied duration in minutes. Non-numeric and
/// non-positive input both reject with `InvalidDuration`.
pub fn parse_minutes(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(minutes) if minutes > 0 && minutes <= u32::MAX as i64 => Ok(minutes as u32),
        _ => Err(Error::InvalidDuration(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> FocusTimer {
        FocusTimer::new(FocusConfig::default())
    }

    #[test]
    fn full_work_session_completes_with_short_break() {
        let mut timer = timer();
        timer.start_work(25, None).unwrap();

        for _ in 0..(25 * 60 - 1) {
            assert_eq!(timer.tick(), TickOutcome::Running);
        }
        // 1st completed session of the run: 5 minutes, not 15.
        assert_eq!(
            timer.tick(),
            TickOutcome::WorkComplete { break_minutes: 5 }
        );
        assert!(timer.state().is_idle());
        assert_eq!(timer.completed_work_sessions(), 1);
    }

    #[test]
    fn every_fourth_session_earns_long_break() {
        let mut timer = timer();
        let mut breaks = Vec::new();
        for _ in 0..4 {
            timer.start_work(1, None).unwrap();
            for _ in 0..59 {
                timer.tick();
            }
            match timer.tick() {
                TickOutcome::WorkComplete { break_minutes } => breaks.push(break_minutes),
                other => panic!("expected work completion, got {other:?}"),
            }
        }
        assert_eq!(breaks, vec![5, 5, 5, 15]);
    }

    #[test]
    fn zero_duration_rejected_without_transition() {
        let mut timer = timer();
        assert!(matches!(
            timer.start_work(0, None),
            Err(Error::InvalidDuration(_))
        ));
        assert!(timer.state().is_idle());
    }

    #[test]
    fn oversized_duration_rejected_without_transition() {
        // 71_582_788 minutes is the largest count whose second total
        // still fits in u32.
        let mut timer = timer();
        timer.start_work(71_582_788, None).unwrap();
        timer.stop();

        assert!(matches!(
            timer.start_work(71_582_789, None),
            Err(Error::InvalidDuration(_))
        ));
        assert!(matches!(
            timer.start_work(u32::MAX, None),
            Err(Error::InvalidDuration(_))
        ));
        assert!(matches!(
            timer.start_break(u32::MAX),
            Err(Error::InvalidDuration(_))
        ));
        assert!(timer.state().is_idle());
    }

    #[test]
    fn paused_timer_does_not_count_down() {
        let mut timer = timer();
        timer.start_work(1, None).unwrap();
        timer.tick();
        timer.pause();
        assert!(timer.state().is_paused());

        for _ in 0..120 {
            assert_eq!(timer.tick(), TickOutcome::Running);
        }
        timer.resume();
        for _ in 0..58 {
            assert_eq!(timer.tick(), TickOutcome::Running);
        }
        assert!(matches!(timer.tick(), TickOutcome::WorkComplete { .. }));
    }

    #[test]
    fn stop_discards_remaining_time_without_credit() {
        let mut timer = timer();
        timer.start_work(25, None).unwrap();
        timer.tick();
        timer.stop();

        assert!(timer.state().is_idle());
        assert_eq!(timer.completed_work_sessions(), 0);
    }

    #[test]
    fn ticks_while_idle_are_ignored() {
        let mut timer = timer();
        assert_eq!(timer.tick(), TickOutcome::Running);
        assert!(timer.state().is_idle());
    }

    #[test]
    fn break_completion_returns_to_idle() {
        let mut timer = timer();
        timer.start_break(5).unwrap();
        for _ in 0..(5 * 60 - 1) {
            timer.tick();
        }
        assert_eq!(timer.tick(), TickOutcome::BreakComplete);
        assert!(timer.state().is_idle());
        assert_eq!(timer.completed_work_sessions(), 0);
    }

    #[test]
    fn parse_minutes_rejects_garbage_and_negatives() {
        assert!(matches!(parse_minutes("abc"), Err(Error::InvalidDuration(_))));
        assert!(matches!(parse_minutes("-5"), Err(Error::InvalidDuration(_))));
        assert!(matches!(parse_minutes("0"), Err(Error::InvalidDuration(_))));
        assert_eq!(parse_minutes(" 25 ").unwrap(), 25);
    }
}
