//! Persistence of a running timer between two invocations of the CLI.
//!
//! At most one row (`id = 1`) lives in `active_timer`; no row means idle.
//! Nothing is written to `sessions` until the timer is finished.

use crate::errors::{AppError, AppResult};
use crate::models::timer_state::TimerState;
use crate::utils::date;
use rusqlite::{Connection, OptionalExtension, params};

pub fn load_timer_state(conn: &Connection) -> AppResult<TimerState> {
    let raw: Option<String> = conn
        .query_row("SELECT start_time FROM active_timer WHERE id = 1", [], |row| {
            row.get(0)
        })
        .optional()?;

    match raw {
        None => Ok(TimerState::Idle),
        Some(s) => {
            let start = date::from_db(&s).ok_or(AppError::InvalidDateTime(s))?;
            Ok(TimerState::Running { start })
        }
    }
}

/// Write `state` through: `Running` stores the start, `Idle` clears it.
pub fn save_timer_state(conn: &Connection, state: &TimerState) -> AppResult<()> {
    match state {
        TimerState::Idle => {
            conn.execute("DELETE FROM active_timer WHERE id = 1", [])?;
        }
        TimerState::Running { start } => {
            conn.execute(
                "INSERT OR REPLACE INTO active_timer (id, start_time) VALUES (1, ?1)",
                params![date::to_db(start)],
            )?;
        }
    }
    Ok(())
}
