//! Daily reset timer.
//!
//! One tokio task sleeps until the next configured wall time at the
//! reference offset, runs the reset for that local date, and repeats until
//! stopped. Stopping takes effect between runs; a run in progress finishes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use purse_core::schedule::{ClockError, ReferenceClock, ResetReport};
use purse_db::BudgetResetJob;
use purse_shared::AppResult;
use purse_shared::config::SchedulerConfig;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Work performed once per scheduled day.
#[async_trait]
pub trait DailyReset: Send + Sync {
    /// Resets budgets for users whose pay day is `reference_date`.
    async fn run_daily_reset(&self, reference_date: NaiveDate) -> AppResult<ResetReport>;
}

#[async_trait]
impl DailyReset for BudgetResetJob {
    async fn run_daily_reset(&self, reference_date: NaiveDate) -> AppResult<ResetReport> {
        Ok(Self::run_daily_reset(self, reference_date).await?)
    }
}

/// Builds the reference clock from configuration.
///
/// # Errors
///
/// Returns an error for an out-of-range offset or a malformed run time.
pub fn clock_from_config(config: &SchedulerConfig) -> Result<ReferenceClock, ClockError> {
    ReferenceClock::from_settings(config.utc_offset_seconds, &config.run_at)
}

/// Handle to the running reset timer.
#[derive(Debug)]
pub struct ResetScheduler {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl ResetScheduler {
    /// Spawns the timer task.
    pub fn start<J>(job: Arc<J>, clock: ReferenceClock) -> Self
    where
        J: DailyReset + ?Sized + 'static,
    {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_loop(job, clock, cancel.clone()));

        info!(
            utc_offset_seconds = clock.offset().local_minus_utc(),
            run_at = %clock.run_at(),
            "Budget reset scheduler started"
        );
        Self { cancel, handle }
    }

    /// Next scheduled run strictly after `now`.
    #[must_use]
    pub fn next_run_after(clock: &ReferenceClock, now: DateTime<Utc>) -> DateTime<Utc> {
        clock.next_run_after(now)
    }

    /// Returns true once the timer task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancels the timer and waits for the task to exit.
    pub async fn stop(self) {
        self.cancel.cancel();
        if let Err(err) = self.handle.await {
            warn!(error = %err, "Budget reset scheduler task ended abnormally");
        }
        info!("Budget reset scheduler stopped");
    }
}

async fn run_loop<J>(job: Arc<J>, clock: ReferenceClock, cancel: CancellationToken)
where
    J: DailyReset + ?Sized,
{
    let mut last_run: Option<DateTime<Utc>> = None;

    loop {
        // Never schedule the same instant twice, even if the wall clock lags
        // the timer slightly.
        let now = Utc::now();
        let from = last_run.map_or(now, |last| last.max(now));
        let next = clock.next_run_after(from);
        let wait = (next - now).to_std().unwrap_or_default();

        info!(next_run = %next, "Next budget reset scheduled");

        tokio::select! {
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(wait) => {}
        }

        run_once(job.as_ref(), clock.local_date(next)).await;
        last_run = Some(next);
    }
}

/// Runs one reset and logs its outcome. Failures are logged, not retried.
pub(crate) async fn run_once<J>(job: &J, reference_date: NaiveDate) -> Option<ResetReport>
where
    J: DailyReset + ?Sized,
{
    match job.run_daily_reset(reference_date).await {
        Ok(report) => {
            if report.is_clean() {
                info!(
                    reference_date = %report.reference_date,
                    users_matched = report.users_matched,
                    budgets_reset = report.budgets_reset,
                    "Budget reset run complete"
                );
            } else {
                warn!(
                    reference_date = %report.reference_date,
                    users_matched = report.users_matched,
                    budgets_reset = report.budgets_reset,
                    users_failed = report.users_failed,
                    "Budget reset run completed with failures"
                );
            }
            Some(report)
        }
        Err(err) => {
            error!(reference_date = %reference_date, error = %err, "Budget reset run failed");
            None
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
