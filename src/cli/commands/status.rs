use crate::config::Config;
use crate::core::actions::status_action;
use crate::db::pool::DbPool;
use crate::db::timer::load_timer_state;
use crate::errors::AppResult;
use crate::utils::date;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = DbPool::open(&cfg.database)?;
    let state = load_timer_state(&pool.conn)?;
    status_action(&state, date::now());
    Ok(())
}
