use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// A `sessions` table carrying a free-text `tag` column comes from the
/// denormalized layout (one tag per session, no tag dictionary).
fn is_denormalized_schema(conn: &Connection) -> Result<bool> {
    Ok(table_exists(conn, "sessions")? && table_has_column(conn, "sessions", "tag")?)
}

/// True when the normalized tables are missing or the legacy `tag` column
/// is still there, i.e. `init` / `db --migrate` has not been run yet.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    Ok(!table_exists(conn, "session_tags")? || is_denormalized_schema(conn)?)
}

/// Create the normalized schema: sessions, tag dictionary, join table and
/// the single-row table holding a running timer between invocations.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            name             TEXT NOT NULL DEFAULT '',
            start_time       TEXT NOT NULL,
            end_time         TEXT NOT NULL,
            duration_seconds INTEGER NOT NULL CHECK(duration_seconds >= 0)
        );

        CREATE TABLE IF NOT EXISTS tags (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS session_tags (
            session_id INTEGER NOT NULL,
            tag_id     INTEGER NOT NULL,
            PRIMARY KEY(session_id, tag_id),
            FOREIGN KEY(session_id) REFERENCES sessions(id),
            FOREIGN KEY(tag_id) REFERENCES tags(id)
        );

        CREATE TABLE IF NOT EXISTS active_timer (
            id         INTEGER PRIMARY KEY CHECK(id = 1),
            start_time TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Move the free-text `sessions.tag` column into `tags` / `session_tags`
/// and rebuild `sessions` without it.
fn migrate_denormalized_tags(conn: &Connection) -> Result<()> {
    warning("Single-tag sessions table detected, moving tags into the tag dictionary...");

    conn.execute_batch(
        r#"
        PRAGMA foreign_keys=OFF;
        BEGIN;

        ALTER TABLE sessions RENAME TO sessions_legacy;

        CREATE TABLE sessions (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            name             TEXT NOT NULL DEFAULT '',
            start_time       TEXT NOT NULL,
            end_time         TEXT NOT NULL,
            duration_seconds INTEGER NOT NULL CHECK(duration_seconds >= 0)
        );

        INSERT INTO sessions (id, name, start_time, end_time, duration_seconds)
        SELECT id,
               COALESCE(strftime('%Y-%m-%d %H:%M', start_time), substr(start_time, 1, 16)),
               COALESCE(strftime('%Y-%m-%dT%H:%M:%S', start_time), start_time),
               COALESCE(strftime('%Y-%m-%dT%H:%M:%S', end_time), end_time),
               MAX(COALESCE(duration_seconds, 0), 0)
        FROM sessions_legacy
        WHERE start_time IS NOT NULL AND end_time IS NOT NULL;

        CREATE TABLE IF NOT EXISTS tags (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS session_tags (
            session_id INTEGER NOT NULL,
            tag_id     INTEGER NOT NULL,
            PRIMARY KEY(session_id, tag_id),
            FOREIGN KEY(session_id) REFERENCES sessions(id),
            FOREIGN KEY(tag_id) REFERENCES tags(id)
        );

        INSERT OR IGNORE INTO tags (name)
        SELECT DISTINCT trim(tag) FROM sessions_legacy
        WHERE tag IS NOT NULL AND trim(tag) <> '';

        INSERT OR IGNORE INTO session_tags (session_id, tag_id)
        SELECT l.id, t.id
        FROM sessions_legacy l
        JOIN tags t ON t.name = trim(l.tag)
        JOIN sessions s ON s.id = l.id;

        DROP TABLE sessions_legacy;

        COMMIT;
        PRAGMA foreign_keys=ON;
        "#,
    )?;

    let moved: i64 = conn.query_row("SELECT COUNT(*) FROM session_tags", [], |row| row.get(0))?;
    success(format!("Tags moved to the tag dictionary ({moved} session links)."));

    Ok(())
}

fn backup_before_migration(db_path: &str) -> AppResult<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_db_pre_tag_dictionary.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = match std::path::Path::new(db_path).parent() {
        Some(dir) => dir.join(&backup_name),
        None => std::path::PathBuf::from(&backup_name),
    };

    let zip_err = |stage: &str, e: zip::result::ZipError| {
        AppError::Migration(format!("Backup failed ({stage}): {e}"))
    };

    let file = File::create(&backup_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| zip_err("start_file", e))?;

    let db_content = fs::read(db_path)?;
    zip.write_all(&db_content)?;
    zip.finish().map_err(|e| zip_err("finish", e))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

fn is_migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    // same local RFC 3339 stamp as ttlog
    let now = chrono::Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        [now.as_str(), version, message],
    )?;
    Ok(())
}

fn migrate_add_aggregation_indexes(conn: &Connection) -> Result<()> {
    let version = "20250301_0001_add_aggregation_indexes";

    if is_migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sessions_start_time ON sessions(start_time);
        CREATE INDEX IF NOT EXISTS idx_session_tags_tag ON session_tags(tag_id);
        "#,
    )?;

    mark_migration_applied(
        conn,
        version,
        "Added start_time and tag_id indexes for aggregation queries",
    )
}

/// Public entry point: run all pending migrations.
///
/// Idempotent; called by db::init_db() every time the database is opened.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Legacy single-tag layout → backup, then normalize
    if is_denormalized_schema(conn)? {
        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if db_path.is_empty() {
            warning("Could not determine DB path — backup skipped.");
        } else {
            backup_before_migration(&db_path)?;
        }

        if let Err(e) = migrate_denormalized_tags(conn) {
            // leave the legacy table as it was
            let _ = conn.execute_batch("ROLLBACK; PRAGMA foreign_keys=ON;");
            return Err(AppError::Migration(format!("normalizing tags: {e}")));
        }
        mark_migration_applied(
            conn,
            "20250215_0000_normalize_session_tags",
            "Moved sessions.tag into tags/session_tags",
        )?;
    }

    // 3) Create missing tables
    create_schema(conn)?;

    // 4) Versioned migrations
    migrate_add_aggregation_indexes(conn)?;

    Ok(())
}
