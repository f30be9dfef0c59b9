#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Local, NaiveDateTime, NaiveTime};
use rusqlite::Connection;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn wt() -> Command {
    cargo_bin_cmd!("worktimer")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_worktimer.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_worktimer_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh directory for tests that produce side files (e.g. migration backups).
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_worktimer_dir", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// `--test init` on a fresh DB.
pub fn init_db(db_path: &str) {
    wt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Midnight of the current local day, shifted by `minutes`.
pub fn today_at(minutes: i64) -> NaiveDateTime {
    Local::now().date_naive().and_time(NaiveTime::MIN) + chrono::Duration::minutes(minutes)
}

pub fn fmt_at(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Record one session through the CLI: start at `start`, finish at `end`.
pub fn record_session(db_path: &str, start: NaiveDateTime, end: NaiveDateTime, tags: &str) {
    wt().args(["--db", db_path, "start", "--at", &fmt_at(start)])
        .assert()
        .success();
    wt().args([
        "--db",
        db_path,
        "finish",
        "--at",
        &fmt_at(end),
        "--tags",
        tags,
    ])
    .assert()
    .success();
}

/// In-memory database with the full schema.
pub fn memory_db() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    worktimer::db::initialize::init_db(&conn).expect("init db");
    conn
}

pub fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").expect("valid test datetime")
}
