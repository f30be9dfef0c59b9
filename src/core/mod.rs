pub mod actions;
pub mod backup;
pub mod log;
pub mod menu;
pub mod stats;
pub mod timer;
