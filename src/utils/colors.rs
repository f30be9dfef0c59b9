/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey for a zero duration, so empty windows fade out in the report.
pub fn colorize_duration(value: &str) -> String {
    if value.trim() == "0m" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
