//! SQLite connection wrapper (one connection per command).

use crate::config::ensure_db_dir;
use crate::db::initialize::init_db;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> rusqlite::Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Open the database, creating its directory if needed, and bring the
    /// schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        ensure_db_dir(path)?;
        let pool = Self::new(path)?;
        init_db(&pool.conn)?;
        Ok(pool)
    }
}
