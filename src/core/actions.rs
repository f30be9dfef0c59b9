//! The Start / Finish / Statistics actions, shared by the one-shot
//! sub-commands and the interactive menu.

use crate::core::stats::StatsLogic;
use crate::core::timer::{TagChoice, TimerLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::tag::parse_tags;
use crate::models::timer_state::TimerState;
use crate::ui::messages::{info, success};
use crate::ui::prompt::prompt_tags;
use crate::utils::formatting::{format_duration, format_elapsed};
use chrono::NaiveDateTime;
use std::io::IsTerminal;

/// How the tag list for a finished session is obtained.
#[derive(Debug, Clone, Copy)]
pub enum TagSource<'a> {
    /// Given up front (`finish --tags`).
    Given(&'a str),
    /// Ask on stdin, with `default_tag` as the default answer.
    Prompt,
    /// Cancel: the session is not stored.
    Discard,
}

pub fn start_action(
    pool: &mut DbPool,
    state: &TimerState,
    now: NaiveDateTime,
) -> AppResult<TimerState> {
    let next = TimerLogic::start(pool, state, now)?;
    success(format!("Started: {}", now.format("%H:%M:%S")));
    Ok(next)
}

/// Finish the running timer. On success `state` is `Idle`, also when
/// storing the session failed (the error is still returned). A refused
/// finish (not running, end before start) leaves `state` untouched.
pub fn finish_action(
    pool: &mut DbPool,
    state: &mut TimerState,
    now: NaiveDateTime,
    source: TagSource<'_>,
    default_tag: &str,
) -> AppResult<()> {
    let finished = state.finish(now)?;

    let choice = match source {
        TagSource::Discard => TagChoice::Discard,
        TagSource::Given(raw) => TagChoice::Save(parse_tags(raw, default_tag)),
        TagSource::Prompt => {
            let raw = prompt_tags(default_tag)?;
            TagChoice::Save(parse_tags(&raw, default_tag))
        }
    };

    *state = TimerState::Idle;
    let outcome = TimerLogic::complete(pool, &finished, choice)?;

    match outcome.session_id {
        Some(_) => success(format!(
            "Session saved ({}) with tags: {}",
            format_duration(outcome.finished.duration_seconds),
            outcome.tags.join(", ")
        )),
        None => info(format!(
            "Session discarded ({} not recorded)",
            format_duration(outcome.finished.duration_seconds)
        )),
    }

    Ok(())
}

pub fn status_action(state: &TimerState, now: NaiveDateTime) {
    match (state.start_time(), state.elapsed(now)) {
        (Some(start), Some(elapsed)) => info(format!(
            "Running since {} (elapsed {})",
            start.format("%Y-%m-%d %H:%M:%S"),
            format_elapsed(elapsed)
        )),
        _ => info("Idle: no timer running."),
    }
}

pub fn stats_action(
    pool: &mut DbPool,
    now: NaiveDateTime,
    limit: usize,
    json: bool,
) -> AppResult<()> {
    let report = StatsLogic::build(&pool.conn, now, limit)?;

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;
        println!("{out}");
    } else {
        let color = std::io::stdout().is_terminal();
        println!("{}", StatsLogic::render_text(&report, color));
    }

    Ok(())
}
