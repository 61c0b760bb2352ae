//! `SeaORM` entity definitions.

pub mod budgets;
pub mod expenses;
pub mod recurring_expenses;
pub mod recurring_incomes;
pub mod user_categories;
pub mod user_profiles;

pub mod prelude {
    //! Entity re-exports.

    pub use super::budgets::Entity as Budgets;
    pub use super::expenses::Entity as Expenses;
    pub use super::recurring_expenses::Entity as RecurringExpenses;
    pub use super::recurring_incomes::Entity as RecurringIncomes;
    pub use super::user_categories::Entity as UserCategories;
    pub use super::user_profiles::Entity as UserProfiles;
}
