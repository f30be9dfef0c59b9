use crate::config::Config;
use crate::core::actions::{TagSource, finish_action, start_action, stats_action, status_action};
use crate::db::pool::DbPool;
use crate::db::timer::load_timer_state;
use crate::errors::AppResult;
use crate::models::timer_state::TimerState;
use crate::ui::messages::{error, header, warning};
use crate::ui::prompt::read_command;
use crate::utils::date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Start,
    Finish,
    Statistics,
    Status,
    Quit,
}

impl MenuCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "1" | "s" | "start" => Some(MenuCommand::Start),
            "2" | "f" | "finish" => Some(MenuCommand::Finish),
            "3" | "t" | "stats" | "statistics" => Some(MenuCommand::Statistics),
            "?" | "status" => Some(MenuCommand::Status),
            "q" | "quit" | "exit" => Some(MenuCommand::Quit),
            _ => None,
        }
    }
}

fn print_menu(state: &TimerState) {
    let marker = if state.is_running() { "●" } else { "○" };
    println!();
    header(format!("WorkTimer {marker}"));
    println!("  1) Start");
    println!("  2) Finish");
    println!("  3) Statistics");
    println!("  ?) Status");
    println!("  q) Quit");
}

pub struct MenuLogic;

impl MenuLogic {
    /// Interactive loop. The timer state is held here and handed to each
    /// action; an action error is reported and the loop goes on.
    pub fn run(pool: &mut DbPool, cfg: &Config) -> AppResult<()> {
        let mut state = load_timer_state(&pool.conn)?;

        loop {
            print_menu(&state);

            let Some(input) = read_command("> ")? else {
                break;
            };
            if input.is_empty() {
                continue;
            }

            let now = date::now();
            let result = match MenuCommand::parse(&input) {
                Some(MenuCommand::Start) => {
                    start_action(pool, &state, now).map(|next| state = next)
                }
                Some(MenuCommand::Finish) => finish_action(
                    pool,
                    &mut state,
                    now,
                    TagSource::Prompt,
                    &cfg.default_tag,
                ),
                Some(MenuCommand::Statistics) => {
                    stats_action(pool, now, cfg.top_tags_limit, false)
                }
                Some(MenuCommand::Status) => {
                    status_action(&state, now);
                    Ok(())
                }
                Some(MenuCommand::Quit) => break,
                None => {
                    warning(format!("Unknown command '{input}'"));
                    Ok(())
                }
            };

            if let Err(e) = result {
                error(e);
            }
        }

        Ok(())
    }
}
