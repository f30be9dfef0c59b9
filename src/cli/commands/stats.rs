use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::actions::stats_action;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { top, json } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;
        let limit = top.unwrap_or(cfg.top_tags_limit);
        stats_action(&mut pool, date::now(), limit, *json)?;
    }

    Ok(())
}
