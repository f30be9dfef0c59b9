use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date;
use crate::utils::formatting::format_duration;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTAL SESSIONS / TAGS
    //
    let (sessions, total_seconds): (i64, i64) = pool.conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(duration_seconds), 0) FROM sessions",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    let tags: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))?;

    println!(
        "{}• Total sessions:{} {}{}{}",
        CYAN, RESET, GREEN, sessions, RESET
    );
    println!("{}• Total tags:{} {}{}{}", CYAN, RESET, GREEN, tags, RESET);
    println!(
        "{}• Tracked time:{} {}",
        CYAN,
        RESET,
        format_duration(total_seconds)
    );

    //
    // 3) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(start_time) FROM sessions", [], |row| {
            row.get::<_, Option<String>>(0)
        })
        .optional()?
        .flatten();
    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(start_time) FROM sessions", [], |row| {
            row.get::<_, Option<String>>(0)
        })
        .optional()?
        .flatten();

    let fmt = |v: Option<String>| match v.as_deref().and_then(date::from_db) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => format!("{GREY}--{RESET}"),
    };

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(first));
    println!("    to:   {}", fmt(last));

    println!();
    Ok(())
}
