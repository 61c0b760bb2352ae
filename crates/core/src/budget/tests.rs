//! Property-based tests for budget module.

use proptest::prelude::*;
use purse_shared::types::{BudgetId, UserId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::defaults::DEFAULT_BUDGETS;
use super::error::BudgetError;
use super::ledger::BudgetLedger;
use super::types::{Budget, BudgetUpdate, MAX_NAME_LEN};
use crate::amount::AmountError;

/// Strategy for two-place amounts (0.00 to 10,000.00).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for signed deltas.
fn delta_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn budget(amount: Decimal) -> Budget {
    Budget::new(BudgetId::new(), UserId::new(), "Test Budget", amount).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A new budget starts with remaining == amount.
    #[test]
    fn prop_new_budget_is_full(amount in amount_strategy()) {
        let b = budget(amount);
        prop_assert_eq!(b.remaining_amount, amount);
        prop_assert_eq!(b.spent(), Decimal::ZERO);
    }

    /// After any deltas, remaining == amount - sum(deltas).
    #[test]
    fn prop_deltas_accumulate(
        amount in amount_strategy(),
        deltas in prop::collection::vec(delta_strategy(), 0..30),
    ) {
        let mut b = budget(amount);
        for delta in &deltas {
            BudgetLedger::apply_delta(&mut b, *delta);
        }
        let total: Decimal = deltas.iter().copied().sum();
        prop_assert_eq!(b.remaining_amount, amount - total);
    }

    /// Reset restores the nominal amount regardless of history, and a
    /// second reset changes nothing.
    #[test]
    fn prop_reset_restores_and_is_idempotent(
        amount in amount_strategy(),
        deltas in prop::collection::vec(delta_strategy(), 0..10),
    ) {
        let mut b = budget(amount);
        for delta in deltas {
            BudgetLedger::apply_delta(&mut b, delta);
        }
        BudgetLedger::reset(&mut b);
        let first = b.remaining_amount;
        prop_assert!(!BudgetLedger::reset(&mut b));
        prop_assert_eq!(first, amount);
        prop_assert_eq!(b.remaining_amount, first);
    }

    /// Editing the nominal amount never changes what has been spent.
    #[test]
    fn prop_rebase_preserves_spent(
        amount in amount_strategy(),
        spent in amount_strategy(),
        new_amount in amount_strategy(),
    ) {
        let mut b = budget(amount);
        BudgetLedger::apply_delta(&mut b, spent);
        BudgetLedger::rebase(&mut b, new_amount);
        prop_assert_eq!(b.amount, new_amount);
        prop_assert_eq!(b.spent(), spent);
    }
}

#[test]
fn test_negative_amount_rejected() {
    let result = Budget::new(BudgetId::new(), UserId::new(), "Food", dec!(-1));
    assert_eq!(
        result,
        Err(BudgetError::InvalidAmount(AmountError::Negative))
    );
}

#[test]
fn test_zero_amount_allowed() {
    assert!(Budget::new(BudgetId::new(), UserId::new(), "Food", dec!(0)).is_ok());
}

#[test]
fn test_name_is_trimmed_and_required() {
    let b = Budget::new(BudgetId::new(), UserId::new(), "  Rent ", dec!(10)).unwrap();
    assert_eq!(b.name, "Rent");

    let empty = Budget::new(BudgetId::new(), UserId::new(), "   ", dec!(10));
    assert_eq!(empty, Err(BudgetError::EmptyName));

    let long = "x".repeat(MAX_NAME_LEN + 1);
    assert_eq!(
        Budget::new(BudgetId::new(), UserId::new(), long, dec!(10)),
        Err(BudgetError::NameTooLong { max: MAX_NAME_LEN })
    );
}

#[test]
fn test_update_validation() {
    let update = BudgetUpdate {
        name: Some(" Groceries ".into()),
        amount: Some(dec!(250.75)),
    };
    assert_eq!(update.validate(), Ok(Some("Groceries".to_string())));

    let bad = BudgetUpdate {
        name: None,
        amount: Some(dec!(1.001)),
    };
    assert!(matches!(
        bad.validate(),
        Err(BudgetError::InvalidAmount(AmountError::Money(_)))
    ));

    assert_eq!(BudgetUpdate::default().validate(), Ok(None));
}

#[test]
fn test_default_budgets() {
    let total: Decimal = DEFAULT_BUDGETS.iter().map(|d| d.amount()).sum();
    assert_eq!(DEFAULT_BUDGETS.len(), 3);
    assert_eq!(total, dec!(4500));
    assert_eq!(DEFAULT_BUDGETS[0].amount(), dec!(2000));
}
