use crate::export::ExportFormat;
use crate::models::period::Period;
use clap::{Parser, Subcommand};

/// Command-line interface definition for worktimer
/// Start/finish tagged work sessions and view time statistics (SQLite)
#[derive(Parser)]
#[command(
    name = "worktimer",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small work timer: start/finish tagged sessions and view time statistics using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start the work timer
    Start {
        /// Start time instead of now (YYYY-MM-DD HH:MM[:SS] or HH:MM)
        #[arg(long = "at", value_name = "DATETIME")]
        at: Option<String>,
    },

    /// Finish the running timer and save the session
    Finish {
        /// Comma separated tags (asked interactively when omitted)
        #[arg(long = "tags", short = 't', conflicts_with = "discard")]
        tags: Option<String>,

        /// Drop the running session without saving it
        #[arg(long = "discard")]
        discard: bool,

        /// End time instead of now (YYYY-MM-DD HH:MM[:SS] or HH:MM)
        #[arg(long = "at", value_name = "DATETIME")]
        at: Option<String>,
    },

    /// Show whether a timer is running
    Status,

    /// Show total durations for today, this week, this month and this year
    Stats {
        /// How many of the most used tags to break down
        #[arg(
            long = "top",
            value_name = "N",
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
        )]
        top: Option<usize>,

        /// Print the report as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Interactive menu: Start / Finish / Statistics / Quit
    Menu,

    /// List stored sessions
    List {
        #[arg(long, short, value_enum, default_value = "week")]
        period: Period,

        #[arg(long, help = "Only sessions with this tag")]
        tag: Option<String>,
    },

    /// List tags with their usage count
    Tags,

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export stored sessions
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short, value_enum, default_value = "all")]
        period: Period,

        #[arg(long, help = "Only sessions with this tag")]
        tag: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
