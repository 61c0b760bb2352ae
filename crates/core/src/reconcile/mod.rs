//! Translating expense lifecycle events into budget ledger adjustments.
//!
//! Planning is pure: given the expense state before and after a transition,
//! [`Reconciler`] returns the exact set of ledger deltas to apply. Executing
//! the plan atomically with the expense write is the persistence layer's job.

pub mod service;
pub mod types;


pub use service::Reconciler;
pub use types::{ExpenseSnapshot, LedgerAdjustment, PriorState, ReconciliationPlan};
