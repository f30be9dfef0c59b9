mod common;
use common::{dt, temp_dir};
use rusqlite::Connection;
use worktimer::db::initialize::init_db;
use worktimer::db::sessions::{
    load_sessions, top_tags, total_duration_for_tag_since, total_duration_since,
};

fn legacy_db(path: &str) {
    let conn = Connection::open(path).expect("open legacy db");
    conn.execute_batch(
        r#"
        CREATE TABLE sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            start_time TEXT,
            end_time TEXT,
            duration_seconds INTEGER,
            tag TEXT
        );
        INSERT INTO sessions (start_time, end_time, duration_seconds, tag) VALUES
            ('2024-01-01T09:00:00.123456', '2024-01-01T10:30:00.000001', 5400, 'deep-work'),
            ('2024-01-02T09:00:00', '2024-01-02T09:30:00', 1800, ' deep-work '),
            ('2024-01-03T09:00:00', '2024-01-03T09:10:00', 600, 'email'),
            ('2024-01-04T09:00:00', '2024-01-04T09:05:00', 300, ''),
            ('2024-01-05T09:00:00', NULL, NULL, 'broken');
        "#,
    )
    .expect("create legacy schema");
}

#[test]
fn test_single_tag_column_is_normalized() {
    let dir = temp_dir("legacy_tag_column");
    let db_path = dir.join("legacy.sqlite").to_string_lossy().to_string();
    legacy_db(&db_path);

    let conn = Connection::open(&db_path).unwrap();
    init_db(&conn).expect("migrations run");

    // the tag column is gone
    let has_tag: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('sessions') WHERE name = 'tag'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(has_tag, 0);

    // rows without an end are not sessions
    let sessions = load_sessions(&conn, None, None).unwrap();
    assert_eq!(sessions.len(), 4);
    assert_eq!(sessions[0].name, "2024-01-01 09:00");
    assert_eq!(sessions[0].tags, vec!["deep-work".to_string()]);
    assert!(sessions[3].tags.is_empty());

    let top = top_tags(&conn, 10).unwrap();
    assert_eq!(top[0].name, "deep-work");
    assert_eq!(top[0].usage_count, 2);
    assert_eq!(
        total_duration_for_tag_since(&conn, "deep-work", dt("2024-01-01T00:00:00")).unwrap(),
        7200
    );

    // a safety backup was written next to the database
    let backups = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".zip"))
        .count();
    assert_eq!(backups, 1);
}

#[test]
fn test_migrations_are_idempotent() {
    let dir = temp_dir("migrations_idempotent");
    let db_path = dir.join("fresh.sqlite").to_string_lossy().to_string();

    let conn = Connection::open(&db_path).unwrap();
    init_db(&conn).unwrap();
    init_db(&conn).unwrap();

    let applied: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(applied, 1);

    for table in ["sessions", "tags", "session_tags", "active_timer"] {
        let n: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(n, 1, "missing table {table}");
    }
}

#[test]
fn test_space_separated_legacy_times_count_in_window_totals() {
    let dir = temp_dir("legacy_space_times");
    let db_path = dir.join("legacy.sqlite").to_string_lossy().to_string();
    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                start_time TEXT,
                end_time TEXT,
                duration_seconds INTEGER,
                tag TEXT
            );
            INSERT INTO sessions (start_time, end_time, duration_seconds, tag) VALUES
                ('2024-05-15 09:00:00', '2024-05-15 10:00:00', 3600, 'deep-work');
            "#,
        )
        .unwrap();
    }

    let conn = Connection::open(&db_path).unwrap();
    init_db(&conn).expect("migrations run");

    let stored: String = conn
        .query_row("SELECT start_time FROM sessions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(stored, "2024-05-15T09:00:00");

    assert_eq!(
        total_duration_since(&conn, dt("2024-05-15T00:00:00")).unwrap(),
        3600
    );
    assert_eq!(
        total_duration_for_tag_since(&conn, "deep-work", dt("2024-05-15T00:00:00")).unwrap(),
        3600
    );
}

#[test]
fn test_migration_log_dates_use_local_rfc3339() {
    let dir = temp_dir("migration_log_dates");
    let db_path = dir.join("fresh.sqlite").to_string_lossy().to_string();

    let conn = Connection::open(&db_path).unwrap();
    init_db(&conn).unwrap();

    let date: String = conn
        .query_row(
            "SELECT date FROM log WHERE operation = 'migration_applied'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!(
        chrono::DateTime::parse_from_rfc3339(&date).is_ok(),
        "not RFC 3339: {date}"
    );
}
