use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::models::tag::validate_tag;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        period,
        tag,
        force,
    } = cmd
    {
        let tag = tag.as_deref().map(validate_tag).transpose()?;
        let mut pool = DbPool::open(&cfg.database)?;

        ExportLogic::export(
            &mut pool,
            *format,
            file,
            *period,
            tag.as_deref(),
            date::now(),
            *force,
        )?;
    }

    Ok(())
}
