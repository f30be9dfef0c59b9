use crate::utils::date;
use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::Serialize;

/// Time window selecting sessions whose start is on/after a boundary
/// computed from "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    Week,
    Month,
    Year,
    All,
}

impl Period {
    /// Windows shown by the statistics report, narrowest first.
    pub const WINDOWS: [Period; 4] = [Period::Today, Period::Week, Period::Month, Period::Year];

    /// Lower bound of the window; `None` means no bound.
    pub fn since(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Period::Today => Some(date::start_of_day(now)),
            Period::Week => Some(date::start_of_week(now)),
            Period::Month => Some(date::start_of_month(now)),
            Period::Year => Some(date::start_of_year(now)),
            Period::All => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::Week => "This Week",
            Period::Month => "This Month",
            Period::Year => "This Year",
            Period::All => "All Time",
        }
    }
}
