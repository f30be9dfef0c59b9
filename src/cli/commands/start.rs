use super::resolve_time;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::actions::start_action;
use crate::db::pool::DbPool;
use crate::db::timer::load_timer_state;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { at } = cmd {
        let now = resolve_time(at)?;
        let mut pool = DbPool::open(&cfg.database)?;
        let state = load_timer_state(&pool.conn)?;

        start_action(&mut pool, &state, now)?;
    }

    Ok(())
}
