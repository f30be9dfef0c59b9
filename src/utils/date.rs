//! Date utilities: time-window boundaries and parsing of user supplied
//! date/times. All timestamps are local wall-clock times.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Storage format of `start_time` / `end_time`. Lexicographic order of the
/// stored text equals chronological order.
pub const DB_DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

/// Current local time, truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let n = Local::now().naive_local();
    n.with_nanosecond(0).unwrap_or(n)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn to_db(dt: &NaiveDateTime) -> String {
    dt.format(DB_DATETIME_FMT).to_string()
}

/// Parse a stored timestamp. Accepts fractional seconds and a space
/// separator as written by older databases.
pub fn from_db(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
}

/// Parse a `--at` value: `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS]`
/// or `HH:MM[:SS]` (today).
pub fn parse_user_datetime(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();

    if let Some(dt) = from_db(s) {
        return Ok(dt);
    }

    for f in ["%H:%M:%S", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(s, f) {
            return Ok(today().and_time(t));
        }
    }

    Err(AppError::InvalidDateTime(s.to_string()))
}

pub fn start_of_day(now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_time(NaiveTime::MIN)
}

/// Monday of the current week at midnight.
pub fn start_of_week(now: NaiveDateTime) -> NaiveDateTime {
    let days = i64::from(now.weekday().num_days_from_monday());
    start_of_day(now) - Duration::days(days)
}

pub fn start_of_month(now: NaiveDateTime) -> NaiveDateTime {
    let first = NaiveDate::from_ymd_opt(now.year(), now.month(), 1).unwrap_or(now.date());
    first.and_time(NaiveTime::MIN)
}

pub fn start_of_year(now: NaiveDateTime) -> NaiveDateTime {
    let first = NaiveDate::from_ymd_opt(now.year(), 1, 1).unwrap_or(now.date());
    first.and_time(NaiveTime::MIN)
}
