mod common;
use common::{dt, init_db, memory_db, record_session, setup_test_db, today_at, wt};
use predicates::str::contains;
use serde_json::Value;
use worktimer::core::stats::StatsLogic;
use worktimer::db::sessions::insert_session;
use worktimer::models::period::Period;
use worktimer::models::session::NewSession;
use worktimer::models::timer_state::FinishedTimer;

fn add(conn: &mut rusqlite::Connection, start: &str, end: &str, tags: &[&str]) {
    let (start, end) = (dt(start), dt(end));
    let finished = FinishedTimer {
        start,
        end,
        duration_seconds: (end - start).num_seconds(),
    };
    let tags = tags.iter().map(|t| t.to_string()).collect();
    insert_session(conn, &NewSession::from_finished(&finished, tags)).unwrap();
}

#[test]
fn test_report_buckets_by_window() {
    let mut conn = memory_db();
    // now = Wednesday 2024-05-15 18:00
    let now = dt("2024-05-15T18:00:00");

    add(&mut conn, "2024-05-15T09:00:00", "2024-05-15T10:30:00", &["deep-work"]); // today
    add(&mut conn, "2024-05-13T09:00:00", "2024-05-13T10:00:00", &["deep-work"]); // this week
    add(&mut conn, "2024-05-02T09:00:00", "2024-05-02T09:20:00", &["email"]); // this month
    add(&mut conn, "2024-02-10T09:00:00", "2024-02-10T11:00:00", &["deep-work"]); // this year
    add(&mut conn, "2023-12-31T09:00:00", "2023-12-31T12:00:00", &["email"]); // last year

    let report = StatsLogic::build(&conn, now, 10).unwrap();

    let totals: Vec<(Period, i64)> = report.totals.iter().map(|t| (t.window, t.seconds)).collect();
    assert_eq!(
        totals,
        vec![
            (Period::Today, 5400),
            (Period::Week, 5400 + 3600),
            (Period::Month, 5400 + 3600 + 1200),
            (Period::Year, 5400 + 3600 + 1200 + 7200),
        ]
    );
    assert_eq!(report.totals[0].formatted, "1h 30m");

    assert_eq!(report.top_tags.len(), 2);
    assert_eq!(report.top_tags[0].name, "deep-work");
    assert_eq!(report.top_tags[0].totals[1].seconds, 5400 + 3600);
    assert_eq!(report.top_tags[1].name, "email");
    assert_eq!(report.top_tags[1].totals[0].seconds, 0);
    assert_eq!(report.top_tags[1].totals[3].seconds, 1200);
}

#[test]
fn test_report_text_layout() {
    let mut conn = memory_db();
    let now = dt("2024-05-15T18:00:00");
    add(&mut conn, "2024-05-15T09:00:00", "2024-05-15T10:30:00", &["deep-work"]);

    let report = StatsLogic::build(&conn, now, 10).unwrap();
    let text = StatsLogic::render_text(&report, false);

    assert!(text.starts_with("=== TOTAL DURATIONS ==="));
    assert!(text.contains("Today     : 1h 30m"));
    assert!(text.contains("This Year : 1h 30m"));
    assert!(text.contains("=== TOP 10 TAGS ==="));
    assert!(text.contains("[deep-work]"));
    assert!(text.contains("  This Week : 1h 30m"));
}

#[test]
fn test_report_on_empty_store() {
    let conn = memory_db();
    let report = StatsLogic::build(&conn, dt("2024-05-15T18:00:00"), 10).unwrap();

    assert!(report.totals.iter().all(|t| t.seconds == 0 && t.formatted == "0m"));
    assert!(report.top_tags.is_empty());
}

#[test]
fn test_cli_stats_text() {
    let db_path = setup_test_db("cli_stats_text");
    init_db(&db_path);

    record_session(&db_path, today_at(0), today_at(90), "deep-work");

    wt().args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("=== TOTAL DURATIONS ==="))
        .stdout(contains("Today     : 1h 30m"))
        .stdout(contains("[deep-work]"));
}

#[test]
fn test_cli_stats_json_and_top_limit() {
    let db_path = setup_test_db("cli_stats_json");
    init_db(&db_path);

    record_session(&db_path, today_at(0), today_at(30), "deep-work");
    record_session(&db_path, today_at(40), today_at(70), "deep-work, email");
    record_session(&db_path, today_at(80), today_at(90), "deep-work");

    let out = wt()
        .args(["--db", &db_path, "stats", "--json", "--top", "1"])
        .output()
        .expect("run stats --json");
    assert!(out.status.success());

    let v: Value = serde_json::from_slice(&out.stdout).expect("stats --json prints JSON");
    assert_eq!(v["tag_limit"], 1);
    assert_eq!(v["totals"][0]["window"], "today");
    assert_eq!(v["totals"][0]["seconds"], 70 * 60);

    let tags = v["top_tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["name"], "deep-work");
    assert_eq!(tags[0]["usage_count"], 3);
}

#[test]
fn test_cli_tags_lists_usage() {
    let db_path = setup_test_db("cli_tags");
    init_db(&db_path);

    record_session(&db_path, today_at(0), today_at(10), "email");
    record_session(&db_path, today_at(20), today_at(30), "deep-work");
    record_session(&db_path, today_at(40), today_at(50), "deep-work");

    let out = wt()
        .args(["--db", &db_path, "tags"])
        .output()
        .expect("run tags");
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let deep = stdout.find("deep-work").expect("deep-work listed");
    let email = stdout.find("email").expect("email listed");
    assert!(deep < email, "most used tag first:\n{stdout}");
}
