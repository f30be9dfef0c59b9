use crate::db::sessions::{top_tags, total_duration_for_tag_since, total_duration_since};
use crate::errors::AppResult;
use crate::models::period::Period;
use crate::utils::colors::colorize_duration;
use crate::utils::date;
use crate::utils::formatting::{format_duration, pad_right};
use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct WindowTotal {
    pub window: Period,
    pub since: String,
    pub seconds: i64,
    pub formatted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagStats {
    pub name: String,
    pub usage_count: i64,
    pub totals: Vec<WindowTotal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub generated_at: String,
    pub totals: Vec<WindowTotal>,
    pub tag_limit: usize,
    pub top_tags: Vec<TagStats>,
}

fn window_totals<F>(now: NaiveDateTime, mut sum_since: F) -> AppResult<Vec<WindowTotal>>
where
    F: FnMut(NaiveDateTime) -> AppResult<i64>,
{
    let mut out = Vec::with_capacity(Period::WINDOWS.len());
    for window in Period::WINDOWS {
        // WINDOWS never contains `All`, so there is always a bound
        let Some(since) = window.since(now) else {
            continue;
        };
        let seconds = sum_since(since)?;
        out.push(WindowTotal {
            window,
            since: date::to_db(&since),
            seconds,
            formatted: format_duration(seconds),
        });
    }
    Ok(out)
}

pub struct StatsLogic;

impl StatsLogic {
    /// Totals for today / this week / this month / this year, overall and
    /// for each of the `limit` most used tags. Windows are relative to `now`.
    pub fn build(conn: &Connection, now: NaiveDateTime, limit: usize) -> AppResult<StatsReport> {
        let totals = window_totals(now, |since| total_duration_since(conn, since))?;

        let mut tags = Vec::new();
        for usage in top_tags(conn, limit)? {
            let totals = window_totals(now, |since| {
                total_duration_for_tag_since(conn, &usage.name, since)
            })?;
            tags.push(TagStats {
                name: usage.name,
                usage_count: usage.usage_count,
                totals,
            });
        }

        Ok(StatsReport {
            generated_at: date::to_db(&now),
            totals,
            tag_limit: limit,
            top_tags: tags,
        })
    }

    /// Plain-text rendering of the report. `color` greys out empty windows.
    pub fn render_text(report: &StatsReport, color: bool) -> String {
        let label_w = Period::WINDOWS
            .iter()
            .map(|w| w.label().len())
            .max()
            .unwrap_or(0);

        let value = |t: &WindowTotal| {
            if color {
                colorize_duration(&t.formatted)
            } else {
                t.formatted.clone()
            }
        };

        let mut lines: Vec<String> = Vec::new();
        lines.push("=== TOTAL DURATIONS ===".to_string());
        for t in &report.totals {
            lines.push(format!("{}: {}", pad_right(t.window.label(), label_w), value(t)));
        }
        lines.push(String::new());

        lines.push(format!("=== TOP {} TAGS ===", report.tag_limit));
        if report.top_tags.is_empty() {
            lines.push("(no tagged sessions yet)".to_string());
        }
        for tag in &report.top_tags {
            lines.push(String::new());
            lines.push(format!("[{}]", tag.name));
            for t in &tag.totals {
                lines.push(format!(
                    "  {}: {}",
                    pad_right(t.window.label(), label_w),
                    value(t)
                ));
            }
        }

        lines.join("\n")
    }
}
