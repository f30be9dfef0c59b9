mod common;
use common::{fmt_at, init_db, record_session, setup_test_db, today_at, wt};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use worktimer::errors::AppError;
use worktimer::models::timer_state::TimerState;

#[test]
fn test_start_twice_keeps_first_start() {
    let start = common::dt("2024-01-01T09:00:00");
    let idle = TimerState::Idle;

    let running = idle.start(start).expect("idle timer starts");
    assert_eq!(running.start_time(), Some(start));

    let later = common::dt("2024-01-01T09:05:00");
    let err = running.start(later).unwrap_err();
    assert!(matches!(err, AppError::AlreadyRunning(s) if s == start));

    // refused transition leaves the value untouched
    assert_eq!(running.start_time(), Some(start));
}

#[test]
fn test_finish_computes_duration() {
    let running = TimerState::Running {
        start: common::dt("2024-01-01T09:00:00"),
    };

    let finished = running
        .finish(common::dt("2024-01-01T10:30:00"))
        .expect("running timer finishes");

    assert_eq!(finished.duration_seconds, 5400);
    assert_eq!(worktimer::utils::format_duration(finished.duration_seconds), "1h 30m");
}

#[test]
fn test_finish_when_idle_is_refused() {
    let err = TimerState::Idle
        .finish(common::dt("2024-01-01T10:30:00"))
        .unwrap_err();
    assert!(matches!(err, AppError::NotRunning));
}

#[test]
fn test_finish_before_start_is_refused() {
    let running = TimerState::Running {
        start: common::dt("2024-01-01T10:00:00"),
    };
    let err = running.finish(common::dt("2024-01-01T09:00:00")).unwrap_err();
    assert!(matches!(err, AppError::EndBeforeStart { .. }));
    assert!(running.is_running());
}

#[test]
fn test_cli_start_twice_reports_already_running() {
    let db_path = setup_test_db("start_twice");
    init_db(&db_path);

    let first = today_at(60);
    wt().args(["--db", &db_path, "start", "--at", &fmt_at(first)])
        .assert()
        .success();

    wt().args(["--db", &db_path, "start"])
        .assert()
        .failure()
        .stderr(contains("Already running"));

    // the first start time is still the one reported
    wt().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains(first.format("%Y-%m-%d %H:%M:%S").to_string()));
}

#[test]
fn test_cli_finish_when_idle_fails() {
    let db_path = setup_test_db("finish_idle");
    init_db(&db_path);

    wt().args(["--db", &db_path, "finish", "--tags", "x"])
        .assert()
        .failure()
        .stderr(contains("Not running"));
}

#[test]
fn test_cli_finish_saves_session_and_resets() {
    let db_path = setup_test_db("finish_saves");
    init_db(&db_path);

    record_session(&db_path, today_at(9 * 60), today_at(10 * 60 + 30), "deep-work, email");

    wt().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("Idle"));

    wt().args(["--db", &db_path, "list", "--period", "all"])
        .assert()
        .success()
        .stdout(contains("1h 30m"))
        .stdout(contains("deep-work, email"));
}

#[test]
fn test_cli_finish_prompt_uses_default_tag_on_empty_input() {
    let db_path = setup_test_db("finish_default_tag");
    init_db(&db_path);

    wt().args(["--db", &db_path, "start", "--at", &fmt_at(today_at(0))])
        .assert()
        .success();

    wt().args(["--db", &db_path, "finish", "--at", &fmt_at(today_at(25))])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(contains("focus-time"));

    wt().args(["--db", &db_path, "tags"])
        .assert()
        .success()
        .stdout(contains("focus-time"));
}

#[test]
fn test_cli_finish_prompt_reads_tags() {
    let db_path = setup_test_db("finish_prompt_tags");
    init_db(&db_path);

    wt().args(["--db", &db_path, "start", "--at", &fmt_at(today_at(0))])
        .assert()
        .success();

    wt().args(["--db", &db_path, "finish", "--at", &fmt_at(today_at(45))])
        .write_stdin("reading , , writing,reading\n")
        .assert()
        .success()
        .stdout(contains("reading, writing"));
}

#[test]
fn test_cli_discard_drops_session() {
    let db_path = setup_test_db("finish_discard");
    init_db(&db_path);

    wt().args(["--db", &db_path, "start", "--at", &fmt_at(today_at(0))])
        .assert()
        .success();

    wt().args(["--db", &db_path, "finish", "--discard"])
        .assert()
        .success()
        .stdout(contains("discarded"));

    wt().args(["--db", &db_path, "list", "--period", "all"])
        .assert()
        .success()
        .stdout(contains("No sessions"));

    // idle again: a new start is accepted
    wt().args(["--db", &db_path, "start"])
        .assert()
        .success()
        .stdout(contains("Started"));
}

#[test]
fn test_cli_invalid_at_is_rejected() {
    let db_path = setup_test_db("invalid_at");
    init_db(&db_path);

    wt().args(["--db", &db_path, "start", "--at", "yesterday-ish"])
        .assert()
        .failure()
        .stderr(contains("Invalid date/time").and(contains("yesterday-ish")));
}

#[test]
fn test_cli_finish_resets_timer_when_store_fails() {
    let db_path = setup_test_db("finish_store_fails");
    init_db(&db_path);

    wt().args(["--db", &db_path, "start", "--at", &fmt_at(today_at(0))])
        .assert()
        .success();

    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER refuse_sessions BEFORE INSERT ON sessions
             BEGIN SELECT RAISE(ABORT, 'disk says no'); END;",
        )
        .unwrap();
    }

    wt().args([
        "--db",
        &db_path,
        "finish",
        "--tags",
        "x",
        "--at",
        &fmt_at(today_at(10)),
    ])
    .assert()
    .code(1)
    .stderr(contains("DB Error").and(contains("disk says no")));

    wt().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("Idle"));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    for table in ["sessions", "tags", "session_tags"] {
        let n: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 0, "{table} should be empty");
    }
}

#[test]
fn test_cli_finish_with_only_separators_uses_default_tag() {
    let db_path = setup_test_db("finish_separators");
    init_db(&db_path);

    wt().args(["--db", &db_path, "start", "--at", &fmt_at(today_at(0))])
        .assert()
        .success();
    wt().args([
        "--db",
        &db_path,
        "finish",
        "--tags",
        " , ,",
        "--at",
        &fmt_at(today_at(10)),
    ])
    .assert()
    .success()
    .stdout(contains("with tags: focus-time"));
}
