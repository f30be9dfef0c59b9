use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::sessions::insert_session;
use crate::db::timer::save_timer_state;
use crate::errors::AppResult;
use crate::models::session::NewSession;
use crate::models::timer_state::{FinishedTimer, TimerState};
use chrono::NaiveDateTime;

/// What to do with a finished interval, as answered at the tag prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagChoice {
    Save(Vec<String>),
    Discard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishOutcome {
    pub finished: FinishedTimer,
    /// `None` when the session was discarded.
    pub session_id: Option<i64>,
    pub tags: Vec<String>,
}

/// High-level logic behind the Start / Finish actions.
pub struct TimerLogic;

impl TimerLogic {
    /// `Idle` → `Running`. Refused (state untouched) when already running.
    pub fn start(
        pool: &mut DbPool,
        state: &TimerState,
        now: NaiveDateTime,
    ) -> AppResult<TimerState> {
        let next = state.start(now)?;
        save_timer_state(&pool.conn, &next)?;

        ttlog_quiet(
            &pool.conn,
            "start",
            &now.format("%Y-%m-%d %H:%M:%S").to_string(),
            "Timer started",
        );

        Ok(next)
    }

    /// Store (or discard) a finished interval and reset the timer.
    ///
    /// The timer is reset to `Idle` whether or not storing succeeded; a
    /// storage error is returned afterwards. No retry.
    pub fn complete(
        pool: &mut DbPool,
        finished: &FinishedTimer,
        choice: TagChoice,
    ) -> AppResult<FinishOutcome> {
        let stored = match &choice {
            TagChoice::Save(tags) => {
                let new = NewSession::from_finished(finished, tags.clone());
                insert_session(&mut pool.conn, &new).map(Some)
            }
            TagChoice::Discard => Ok(None),
        };

        let reset = save_timer_state(&pool.conn, &TimerState::Idle);

        let session_id = stored?;
        reset?;

        let tags = match choice {
            TagChoice::Save(tags) => tags,
            TagChoice::Discard => Vec::new(),
        };

        match session_id {
            Some(id) => ttlog_quiet(
                &pool.conn,
                "finish",
                &format!("session {id}"),
                &format!(
                    "Session saved ({}s) with tags: {}",
                    finished.duration_seconds,
                    tags.join(", ")
                ),
            ),
            None => ttlog_quiet(
                &pool.conn,
                "discard",
                &finished.start.format("%Y-%m-%d %H:%M:%S").to_string(),
                "Session discarded",
            ),
        }

        Ok(FinishOutcome {
            finished: *finished,
            session_id,
            tags,
        })
    }
}
