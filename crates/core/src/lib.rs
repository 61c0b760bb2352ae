//! Core business logic for Purse.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `amount` - Expense and budget amount validation
//! - `budget` - Budgets and the remaining-amount ledger arithmetic
//! - `reconcile` - Translating expense lifecycle events into ledger adjustments
//! - `schedule` - Pay-day matching and the fixed-offset reset clock
//! - `recurring` - Recurring expense/income schedules and their deletion lifecycle
//! - `profile` - User profile normalization and registration defaults
//! - `category`, `expense` - Field validation for categories and expenses
//! - `patch` - Three-state updates for optional fields

pub mod amount;
pub mod budget;
pub mod category;
pub mod expense;
pub mod patch;
pub mod profile;
pub mod reconcile;
pub mod recurring;
pub mod schedule;
