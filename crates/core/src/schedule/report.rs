//! Outcome of one daily reset run.

use chrono::NaiveDate;
use serde::Serialize;

use super::pay_day::day_code;

/// Counts reported by a daily budget reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    /// Local date the run was performed for.
    pub reference_date: NaiveDate,
    /// Day code profiles were matched against.
    pub day_code: String,
    /// Profiles whose `pay_day` matched.
    pub users_matched: usize,
    /// Budget rows reset across all matched users.
    pub budgets_reset: u64,
    /// Matched users whose reset failed.
    pub users_failed: usize,
}

impl ResetReport {
    /// Empty report for `reference_date`.
    #[must_use]
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            day_code: day_code(reference_date),
            users_matched: 0,
            budgets_reset: 0,
            users_failed: 0,
        }
    }

    /// Records a user whose budgets were reset.
    pub fn record_success(&mut self, budgets_reset: u64) {
        self.users_matched += 1;
        self.budgets_reset += budgets_reset;
    }

    /// Records a user whose reset failed.
    pub fn record_failure(&mut self) {
        self.users_matched += 1;
        self.users_failed += 1;
    }

    /// True when every matched user was reset.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.users_failed == 0
    }
}
