// src/export/model.rs

use crate::models::session::Session;
use crate::utils::date;
use crate::utils::formatting::format_duration;
use serde::Serialize;

/// Flat session row written by the CSV and JSON exporters.
#[derive(Serialize, Clone, Debug)]
pub struct SessionExport {
    pub id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_seconds: i64,
    pub duration: String,
    /// Tag names joined with `;` so the CSV stays one value per column.
    pub tags: String,
}

impl From<&Session> for SessionExport {
    fn from(s: &Session) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            start_time: date::to_db(&s.start_time),
            end_time: date::to_db(&s.end_time),
            duration_seconds: s.duration_seconds,
            duration: format_duration(s.duration_seconds),
            tags: s.tags.join(";"),
        }
    }
}
