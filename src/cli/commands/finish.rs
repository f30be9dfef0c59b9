use super::resolve_time;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::actions::{TagSource, finish_action};
use crate::db::pool::DbPool;
use crate::db::timer::load_timer_state;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Finish { tags, discard, at } = cmd {
        let now = resolve_time(at)?;
        let mut pool = DbPool::open(&cfg.database)?;
        let mut state = load_timer_state(&pool.conn)?;

        let source = match (tags, discard) {
            (_, true) => TagSource::Discard,
            (Some(t), false) => TagSource::Given(t),
            (None, false) => TagSource::Prompt,
        };

        finish_action(&mut pool, &mut state, now, source, &cfg.default_tag)?;
    }

    Ok(())
}
