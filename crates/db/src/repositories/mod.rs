//! Repository layer for database operations.

pub mod budget;
pub mod category;
pub mod expense;
pub mod profile;
pub mod recurring;

pub use budget::BudgetRepository;
pub use category::CategoryRepository;
pub use expense::{ExpensePatch, ExpenseRepository, NewExpense};
pub use profile::{ProfileRepository, RegisterInput, Registration};
pub use recurring::{NewRecurring, RecurringRecord, RecurringRepository};
