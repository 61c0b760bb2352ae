//! Budgets seeded for every newly registered user.

use rust_decimal::Decimal;

/// A budget created at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultBudget {
    /// Budget and matching category name.
    pub name: &'static str,
    /// Nominal amount in whole currency units.
    pub amount: i64,
}

impl DefaultBudget {
    /// Nominal amount as a decimal.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::from(self.amount)
    }
}

/// The three default budgets. Each also gets a category of the same name.
pub const DEFAULT_BUDGETS: [DefaultBudget; 3] = [
    DefaultBudget {
        name: "Food",
        amount: 2000,
    },
    DefaultBudget {
        name: "Home",
        amount: 1500,
    },
    DefaultBudget {
        name: "General",
        amount: 1000,
    },
];
