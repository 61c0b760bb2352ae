//! Pay-day matching and the fixed-offset reset clock.

pub mod clock;
pub mod pay_day;
pub mod report;

pub use clock::{ClockError, ReferenceClock};
pub use pay_day::{PayDay, PayDayError, day_code};
pub use report::ResetReport;
