//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use chrono::NaiveDateTime;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("DB Error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Timer state
    // ---------------------------
    #[error("Already running! (started at {})", .0.format("%Y-%m-%d %H:%M:%S"))]
    AlreadyRunning(NaiveDateTime),

    #[error("Not running!")]
    NotRunning,

    #[error("End time {end} is before start time {start}")]
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date/time format: {0}")]
    InvalidDateTime(String),

    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
