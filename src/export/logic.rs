// src/export/logic.rs

use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::sessions::load_sessions;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::SessionExport;
use crate::models::period::Period;
use crate::ui::messages::warning;
use chrono::NaiveDateTime;
use std::path::Path;

/// High-level export of stored sessions.
pub struct ExportLogic;

impl ExportLogic {
    /// Write the sessions of `period` (optionally only those tagged `tag`)
    /// to `file`. Returns the number of exported sessions.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        period: Period,
        tag: Option<&str>,
        now: NaiveDateTime,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        ensure_writable(path, force)?;

        let sessions = load_sessions(&pool.conn, period.since(now), tag)?;

        if sessions.is_empty() {
            warning("No sessions found for the selected period.");
            return Ok(0);
        }

        let rows: Vec<SessionExport> = sessions.iter().map(SessionExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        ttlog_quiet(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!(
                "Exported {} session(s) as {} ({})",
                rows.len(),
                format.as_str(),
                period.label()
            ),
        );

        Ok(rows.len())
    }
}
