//! Background jobs for Purse.
//!
//! - `scheduler` - The daily budget reset timer

pub mod scheduler;

pub use scheduler::{DailyReset, ResetScheduler, clock_from_config};
