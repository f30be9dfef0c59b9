//! Session store: insert completed sessions and aggregate them by time
//! window and tag.

use crate::errors::{AppError, AppResult};
use crate::models::session::{NewSession, Session};
use crate::models::tag::TagUsage;
use crate::utils::date;
use chrono::NaiveDateTime;
use rusqlite::{Connection, Row, params};

/// Insert one session and link its tags.
///
/// Tags are created on first use (`INSERT OR IGNORE` on the unique name);
/// duplicate links are ignored. Everything runs in a single transaction.
pub fn insert_session(conn: &mut Connection, s: &NewSession) -> AppResult<i64> {
    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO sessions (name, start_time, end_time, duration_seconds)
         VALUES (?1, ?2, ?3, ?4)",
        params![s.name, s.start_str(), s.end_str(), s.duration_seconds.max(0)],
    )?;
    let session_id = tx.last_insert_rowid();

    {
        let mut ins_tag = tx.prepare_cached("INSERT OR IGNORE INTO tags (name) VALUES (?1)")?;
        let mut get_tag = tx.prepare_cached("SELECT id FROM tags WHERE name = ?1")?;
        let mut link = tx.prepare_cached(
            "INSERT OR IGNORE INTO session_tags (session_id, tag_id) VALUES (?1, ?2)",
        )?;

        for tag in &s.tags {
            ins_tag.execute([tag])?;
            let tag_id: i64 = get_tag.query_row([tag], |row| row.get(0))?;
            link.execute(params![session_id, tag_id])?;
        }
    }

    tx.commit()?;
    Ok(session_id)
}

/// Sum of `duration_seconds` for sessions started on/after `since`; 0 when
/// nothing matches.
pub fn total_duration_since(conn: &Connection, since: NaiveDateTime) -> AppResult<i64> {
    let total: i64 = conn.query_row(
        "SELECT COALESCE(SUM(duration_seconds), 0)
         FROM sessions
         WHERE start_time >= ?1",
        [date::to_db(&since)],
        |row| row.get(0),
    )?;
    Ok(total)
}

/// Same as `total_duration_since`, restricted to sessions linked to `tag`.
pub fn total_duration_for_tag_since(
    conn: &Connection,
    tag: &str,
    since: NaiveDateTime,
) -> AppResult<i64> {
    let total: i64 = conn.query_row(
        "SELECT COALESCE(SUM(s.duration_seconds), 0)
         FROM sessions s
         JOIN session_tags st ON s.id = st.session_id
         JOIN tags t ON t.id = st.tag_id
         WHERE t.name = ?1 AND s.start_time >= ?2",
        params![tag, date::to_db(&since)],
        |row| row.get(0),
    )?;
    Ok(total)
}

fn tag_usage(conn: &Connection, limit: i64) -> AppResult<Vec<TagUsage>> {
    let mut stmt = conn.prepare_cached(
        "SELECT t.name, COUNT(*) AS usage_count
         FROM tags t
         JOIN session_tags st ON t.id = st.tag_id
         GROUP BY t.id, t.name
         ORDER BY usage_count DESC, t.name ASC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map([limit], |row| {
        Ok(TagUsage {
            name: row.get(0)?,
            usage_count: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Up to `limit` tags by descending usage count; equal counts are ordered
/// by name.
pub fn top_tags(conn: &Connection, limit: usize) -> AppResult<Vec<TagUsage>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    tag_usage(conn, limit)
}

/// Every tag that is linked to at least one session.
pub fn all_tags(conn: &Connection) -> AppResult<Vec<TagUsage>> {
    // negative LIMIT = no limit in SQLite
    tag_usage(conn, -1)
}

fn parse_db_datetime(idx: usize, raw: String) -> rusqlite::Result<NaiveDateTime> {
    date::from_db(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDateTime(raw)),
        )
    })
}

fn map_session(row: &Row) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get("id")?,
        name: row.get::<_, Option<String>>("name")?.unwrap_or_default(),
        start_time: parse_db_datetime(2, row.get("start_time")?)?,
        end_time: parse_db_datetime(3, row.get("end_time")?)?,
        duration_seconds: row.get("duration_seconds")?,
        tags: Vec::new(),
    })
}

fn load_tags_for(conn: &Connection, session_id: i64) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT t.name
         FROM session_tags st
         JOIN tags t ON t.id = st.tag_id
         WHERE st.session_id = ?1
         ORDER BY t.id ASC",
    )?;
    let rows = stmt.query_map([session_id], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Sessions started on/after `since` (all when `None`), optionally only
/// those linked to `tag`, oldest first, with their tags.
pub fn load_sessions(
    conn: &Connection,
    since: Option<NaiveDateTime>,
    tag: Option<&str>,
) -> AppResult<Vec<Session>> {
    let since_str = since.map(|s| date::to_db(&s));

    let mut stmt = conn.prepare(
        "SELECT s.id, s.name, s.start_time, s.end_time, s.duration_seconds
         FROM sessions s
         WHERE (?1 IS NULL OR s.start_time >= ?1)
           AND (?2 IS NULL OR EXISTS (
                SELECT 1 FROM session_tags st
                JOIN tags t ON t.id = st.tag_id
                WHERE st.session_id = s.id AND t.name = ?2))
         ORDER BY s.start_time ASC, s.id ASC",
    )?;

    let rows = stmt.query_map(params![since_str, tag], map_session)?;

    let mut out = Vec::new();
    for r in rows {
        let mut session = r?;
        session.tags = load_tags_for(conn, session.id)?;
        out.push(session);
    }
    Ok(out)
}
