use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::sessions::all_tags;
use crate::errors::AppResult;
use crate::utils::table::{Column, Table};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = DbPool::open(&cfg.database)?;
    let tags = all_tags(&pool.conn)?;

    if tags.is_empty() {
        println!("No tags yet.");
        return Ok(());
    }

    let mut table = Table::new(vec![Column::new("Tag"), Column::new("Sessions")]);
    for t in &tags {
        table.add_row(vec![t.name.clone(), t.usage_count.to_string()]);
    }

    print!("{}", table.render(&cfg.separator_char));
    Ok(())
}
