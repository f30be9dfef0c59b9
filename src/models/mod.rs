pub mod period;
pub mod session;
pub mod tag;
pub mod timer_state;
