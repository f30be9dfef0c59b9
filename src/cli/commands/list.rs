use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::sessions::load_sessions;
use crate::errors::AppResult;
use crate::models::session::Session;
use crate::models::tag::validate_tag;
use crate::utils::date;
use crate::utils::formatting::format_duration;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, tag } = cmd {
        let tag = tag.as_deref().map(validate_tag).transpose()?;
        let pool = DbPool::open(&cfg.database)?;

        let sessions = load_sessions(&pool.conn, period.since(date::now()), tag.as_deref())?;

        if sessions.is_empty() {
            println!("No sessions for {}.", period.label().to_lowercase());
            return Ok(());
        }

        print!("{}", render_sessions(&sessions, &cfg.separator_char));

        let total: i64 = sessions.iter().map(|s| s.duration_seconds).sum();
        println!(
            "\n{} session(s), total {}",
            sessions.len(),
            format_duration(total)
        );
    }
    Ok(())
}

fn render_sessions(sessions: &[Session], separator_char: &str) -> String {
    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new("Start"),
        Column::new("End"),
        Column::new("Duration"),
        Column::new("Tags"),
    ]);

    for s in sessions {
        table.add_row(vec![
            s.id.to_string(),
            s.start_time.format("%Y-%m-%d %H:%M").to_string(),
            s.end_time.format("%Y-%m-%d %H:%M").to_string(),
            format_duration(s.duration_seconds),
            s.tags.join(", "),
        ]);
    }

    table.render(separator_char)
}
