//! Timer state: `Idle` → `Running` → `Idle`.
//!
//! The state is a plain value passed through the command handlers. A
//! transition never mutates the current value; it returns the next state or
//! an error, so a refused transition leaves the caller's state untouched.

use crate::errors::{AppError, AppResult};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running {
        start: NaiveDateTime,
    },
}

/// A timer interval whose start and end are both known, ready to be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedTimer {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_seconds: i64,
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running { .. })
    }

    pub fn start_time(&self) -> Option<NaiveDateTime> {
        match self {
            TimerState::Idle => None,
            TimerState::Running { start } => Some(*start),
        }
    }

    /// `Idle` → `Running { start: now }`.
    pub fn start(&self, now: NaiveDateTime) -> AppResult<TimerState> {
        match self {
            TimerState::Running { start } => Err(AppError::AlreadyRunning(*start)),
            TimerState::Idle => Ok(TimerState::Running { start: now }),
        }
    }

    /// Close the running interval at `end`.
    ///
    /// The caller resets to `Idle` once the interval has been handled
    /// (stored or discarded).
    pub fn finish(&self, end: NaiveDateTime) -> AppResult<FinishedTimer> {
        let start = match self {
            TimerState::Idle => return Err(AppError::NotRunning),
            TimerState::Running { start } => *start,
        };

        if end < start {
            return Err(AppError::EndBeforeStart { start, end });
        }

        Ok(FinishedTimer {
            start,
            end,
            duration_seconds: (end - start).num_seconds(),
        })
    }

    /// Seconds elapsed since the start, `None` while idle.
    pub fn elapsed(&self, now: NaiveDateTime) -> Option<i64> {
        self.start_time()
            .map(|start| (now - start).num_seconds().max(0))
    }
}
