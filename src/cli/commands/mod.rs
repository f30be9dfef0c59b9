pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod finish;
pub mod init;
pub mod list;
pub mod log;
pub mod menu;
pub mod start;
pub mod stats;
pub mod status;
pub mod tags;

use crate::errors::AppResult;
use crate::utils::date;
use chrono::NaiveDateTime;

/// `--at` override or the current time.
pub(crate) fn resolve_time(at: &Option<String>) -> AppResult<NaiveDateTime> {
    match at {
        Some(s) => date::parse_user_datetime(s),
        None => Ok(date::now()),
    }
}
