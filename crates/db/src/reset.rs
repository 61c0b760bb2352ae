//! Daily budget reset for users whose pay day is today.

use chrono::NaiveDate;
use purse_core::schedule::{PayDay, ResetReport};
use purse_shared::types::UserId;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

use crate::error::RepositoryResult;
use crate::repositories::{BudgetRepository, ProfileRepository};

/// Resets every budget of each user whose `pay_day` matches the run date.
#[derive(Debug, Clone)]
pub struct BudgetResetJob {
    db: DatabaseConnection,
    profiles: ProfileRepository,
}

impl BudgetResetJob {
    /// Creates the job.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            profiles: ProfileRepository::new(db.clone()),
            db,
        }
    }

    /// Runs the reset for `reference_date` (the local date at the reference
    /// offset).
    ///
    /// Users are processed one by one, each with its own single-statement
    /// reset. A failing user is logged and counted; the others still run.
    /// Zero matches is a normal, successful run.
    ///
    /// # Errors
    ///
    /// Returns an error only if the matching profiles cannot be loaded.
    #[instrument(skip(self))]
    pub async fn run_daily_reset(
        &self,
        reference_date: NaiveDate,
    ) -> RepositoryResult<ResetReport> {
        let pay_day = PayDay::for_date(reference_date);

        let matched = self.profiles.find_by_pay_day(&pay_day).await?;
        let mut report = ResetReport::new(reference_date);

        for profile in matched {
            let user_id = UserId::from(profile.user_id);
            match BudgetRepository::reset_for_user(&self.db, user_id).await {
                Ok(count) => report.record_success(count),
                Err(err) => {
                    error!(user_id = %user_id, error = %err, "Budget reset failed for user");
                    report.record_failure();
                }
            }
        }

        info!(
            day_code = %report.day_code,
            users_matched = report.users_matched,
            budgets_reset = report.budgets_reset,
            users_failed = report.users_failed,
            "Daily budget reset finished"
        );
        Ok(report)
    }
}
