use super::timer_state::FinishedTimer;
use crate::utils::date;
use chrono::NaiveDateTime;
use serde::Serialize;

/// A completed, persisted work session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: i64,
    pub name: String,               // ⇔ sessions.name ("YYYY-MM-DD HH:MM" of the start)
    pub start_time: NaiveDateTime,  // ⇔ sessions.start_time (TEXT, DB_DATETIME_FMT)
    pub end_time: NaiveDateTime,    // ⇔ sessions.end_time
    pub duration_seconds: i64,      // ⇔ sessions.duration_seconds (end - start, >= 0)
    pub tags: Vec<String>,          // ⇔ tags.name via session_tags
}

/// A session about to be inserted. Only built from a finished timer, so a
/// row is never written without both start and end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_seconds: i64,
    pub tags: Vec<String>,
}

impl NewSession {
    pub fn from_finished(finished: &FinishedTimer, tags: Vec<String>) -> Self {
        Self {
            name: session_name(&finished.start),
            start_time: finished.start,
            end_time: finished.end,
            duration_seconds: finished.duration_seconds.max(0),
            tags,
        }
    }

    pub fn start_str(&self) -> String {
        date::to_db(&self.start_time)
    }

    pub fn end_str(&self) -> String {
        date::to_db(&self.end_time)
    }
}

pub fn session_name(start: &NaiveDateTime) -> String {
    start.format("%Y-%m-%d %H:%M").to_string()
}
