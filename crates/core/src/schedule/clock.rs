//! Fixed-offset reference clock for the daily reset.
//!
//! The reference offset is a plain `FixedOffset`, not a named zone, so a
//! region that observes daylight saving sees the run shift by an hour for
//! part of the year.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use thiserror::Error;

/// Invalid clock settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// Offset outside +/- 24 hours.
    #[error("UTC offset of {0} seconds is out of range")]
    InvalidOffset(i32),

    /// Run time is not `HH:MM` or `HH:MM:SS`.
    #[error("Run time {0:?} is not a valid HH:MM wall time")]
    InvalidRunAt(String),
}

/// Decides the local "today" and when the next daily run fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceClock {
    offset: FixedOffset,
    run_at: NaiveTime,
}

impl ReferenceClock {
    /// Creates a clock from an offset and a local run time.
    #[must_use]
    pub const fn new(offset: FixedOffset, run_at: NaiveTime) -> Self {
        Self { offset, run_at }
    }

    /// Builds a clock from configuration values.
    pub fn from_settings(utc_offset_seconds: i32, run_at: &str) -> Result<Self, ClockError> {
        let offset = FixedOffset::east_opt(utc_offset_seconds)
            .ok_or(ClockError::InvalidOffset(utc_offset_seconds))?;
        let run_at = NaiveTime::parse_from_str(run_at, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(run_at, "%H:%M:%S"))
            .map_err(|_| ClockError::InvalidRunAt(run_at.to_string()))?;

        Ok(Self { offset, run_at })
    }

    /// The reference offset.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Local wall time of the daily run.
    #[must_use]
    pub const fn run_at(&self) -> NaiveTime {
        self.run_at
    }

    /// Calendar date at the reference offset for the instant `now`.
    #[must_use]
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }

    /// First instant strictly after `now` at which the local wall clock
    /// reads `run_at`.
    #[must_use]
    pub fn next_run_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local_now = now.with_timezone(&self.offset).naive_local();
        let mut candidate = local_now.date().and_time(self.run_at);
        if candidate <= local_now {
            candidate += Duration::days(1);
        }

        let utc = candidate - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Utc.from_utc_datetime(&utc)
    }
}
