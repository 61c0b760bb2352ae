//! Integration tests for expense writes and their budget reconciliation.

mod common;

use chrono::NaiveDate;
use common::{fail_updates_of_budget_named, register_user, setup_db};
use purse_core::patch::Patch;
use purse_db::RepositoryError;
use purse_db::repositories::{
    BudgetRepository, CategoryRepository, ExpensePatch, ExpenseRepository, NewExpense,
};
use purse_shared::types::{BudgetId, ExpenseId, UserId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

async fn remaining(db: &DatabaseConnection, user_id: UserId, budget_id: BudgetId) -> Decimal {
    BudgetRepository::new(db.clone())
        .get(user_id, budget_id)
        .await
        .unwrap()
        .remaining_amount
}

#[tokio::test]
async fn test_create_update_delete_scenario() {
    let db = setup_db().await;
    let (user_id, registration) = register_user(&db).await;
    let food = registration.budgets[0].id;
    let repo = ExpenseRepository::new(db.clone());

    let expense = repo
        .create(
            user_id,
            NewExpense {
                amount: dec!(300),
                budget_id: Some(food),
                ..NewExpense::default()
            },
        )
        .await
        .unwrap();
    let expense_id = ExpenseId::from(expense.id);
    assert_eq!(remaining(&db, user_id, food).await, dec!(1700));

    repo.update(
        user_id,
        expense_id,
        ExpensePatch {
            amount: Some(dec!(500)),
            ..ExpensePatch::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(remaining(&db, user_id, food).await, dec!(1500));

    repo.delete(user_id, expense_id).await.unwrap();
    assert_eq!(remaining(&db, user_id, food).await, dec!(2000));
}

#[tokio::test]
async fn test_move_between_budgets() {
    let db = setup_db().await;
    let (user_id, _) = register_user(&db).await;
    let budgets = BudgetRepository::new(db.clone());
    let x = budgets.create(user_id, "X", dec!(1000)).await.unwrap().id;
    let y = budgets.create(user_id, "Y", dec!(1000)).await.unwrap().id;
    let repo = ExpenseRepository::new(db.clone());

    let expense = repo
        .create(
            user_id,
            NewExpense {
                amount: dec!(200),
                budget_id: Some(x),
                ..NewExpense::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(remaining(&db, user_id, x).await, dec!(800));

    let moved = repo
        .update(
            user_id,
            ExpenseId::from(expense.id),
            ExpensePatch {
                budget_id: Patch::Set(y),
                ..ExpensePatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(moved.budget_id, Some(y.into_inner()));
    assert_eq!(remaining(&db, user_id, x).await, dec!(1000));
    assert_eq!(remaining(&db, user_id, y).await, dec!(800));
}

#[tokio::test]
async fn test_move_and_resize_together() {
    let db = setup_db().await;
    let (user_id, registration) = register_user(&db).await;
    let food = registration.budgets[0].id;
    let home = registration.budgets[1].id;
    let repo = ExpenseRepository::new(db.clone());

    let expense = repo
        .create(
            user_id,
            NewExpense {
                amount: dec!(100),
                budget_id: Some(food),
                ..NewExpense::default()
            },
        )
        .await
        .unwrap();

    repo.update(
        user_id,
        ExpenseId::from(expense.id),
        ExpensePatch {
            amount: Some(dec!(40)),
            budget_id: Patch::Set(home),
            ..ExpensePatch::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(remaining(&db, user_id, food).await, dec!(2000));
    assert_eq!(remaining(&db, user_id, home).await, dec!(1460));
}

#[tokio::test]
async fn test_clearing_budget_refunds_and_linking_charges() {
    let db = setup_db().await;
    let (user_id, registration) = register_user(&db).await;
    let general = registration.budgets[2].id;
    let repo = ExpenseRepository::new(db.clone());

    let expense = repo
        .create(
            user_id,
            NewExpense {
                amount: dec!(75.25),
                budget_id: Some(general),
                ..NewExpense::default()
            },
        )
        .await
        .unwrap();
    let expense_id = ExpenseId::from(expense.id);
    assert_eq!(remaining(&db, user_id, general).await, dec!(924.75));

    repo.update(
        user_id,
        expense_id,
        ExpensePatch {
            budget_id: Patch::Clear,
            ..ExpensePatch::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(remaining(&db, user_id, general).await, dec!(1000));

    repo.update(
        user_id,
        expense_id,
        ExpensePatch {
            budget_id: Patch::Set(general),
            ..ExpensePatch::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(remaining(&db, user_id, general).await, dec!(924.75));
}

#[tokio::test]
async fn test_unbudgeted_expense_touches_no_budget() {
    let db = setup_db().await;
    let (user_id, registration) = register_user(&db).await;
    let repo = ExpenseRepository::new(db.clone());

    let expense = repo
        .create(
            user_id,
            NewExpense {
                amount: dec!(60),
                description: Some(" Coffee ".into()),
                ..NewExpense::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(expense.description.as_deref(), Some("Coffee"));

    repo.delete(user_id, ExpenseId::from(expense.id)).await.unwrap();

    for budget in &registration.budgets {
        assert_eq!(remaining(&db, user_id, budget.id).await, budget.amount);
    }
}

#[tokio::test]
async fn test_metadata_only_update_leaves_ledger_alone() {
    let db = setup_db().await;
    let (user_id, registration) = register_user(&db).await;
    let food = registration.budgets[0].id;
    let repo = ExpenseRepository::new(db.clone());

    let expense = repo
        .create(
            user_id,
            NewExpense {
                amount: dec!(10),
                budget_id: Some(food),
                description: Some("Bread".into()),
                ..NewExpense::default()
            },
        )
        .await
        .unwrap();

    let pay_date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
    let updated = repo
        .update(
            user_id,
            ExpenseId::from(expense.id),
            ExpensePatch {
                pay_date: Patch::Set(pay_date),
                description: Patch::Clear,
                ..ExpensePatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.pay_date, Some(pay_date));
    assert_eq!(updated.description, None);
    assert_eq!(remaining(&db, user_id, food).await, dec!(1990));
}

#[tokio::test]
async fn test_zero_amount_is_legal() {
    let db = setup_db().await;
    let (user_id, registration) = register_user(&db).await;
    let food = registration.budgets[0].id;
    let home = registration.budgets[1].id;
    let repo = ExpenseRepository::new(db.clone());

    let expense = repo
        .create(
            user_id,
            NewExpense {
                amount: dec!(0),
                budget_id: Some(food),
                ..NewExpense::default()
            },
        )
        .await
        .unwrap();

    repo.update(
        user_id,
        ExpenseId::from(expense.id),
        ExpensePatch {
            budget_id: Patch::Set(home),
            ..ExpensePatch::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(remaining(&db, user_id, food).await, dec!(2000));
    assert_eq!(remaining(&db, user_id, home).await, dec!(1500));
}

#[tokio::test]
async fn test_invalid_amounts_rejected() {
    let db = setup_db().await;
    let (user_id, _) = register_user(&db).await;
    let repo = ExpenseRepository::new(db.clone());

    for amount in [dec!(-5), dec!(3.141), dec!(100000000), dec!(90000000000000000)] {
        let result = repo
            .create(
                user_id,
                NewExpense {
                    amount,
                    ..NewExpense::default()
                },
            )
            .await;
        assert!(matches!(result, Err(RepositoryError::Validation(_))));
    }
    assert!(repo.list_for_user(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_amounts_leave_ledger_intact() {
    let db = setup_db().await;
    let (user_id, registration) = register_user(&db).await;
    let food = registration.budgets[0].id;
    let repo = ExpenseRepository::new(db.clone());

    let huge = dec!(90000000000000000);
    assert!(matches!(
        BudgetRepository::new(db.clone()).create(user_id, "Huge", huge).await,
        Err(RepositoryError::Validation(_))
    ));
    for _ in 0..3 {
        let result = repo
            .create(
                user_id,
                NewExpense {
                    amount: huge,
                    budget_id: Some(food),
                    ..NewExpense::default()
                },
            )
            .await;
        assert!(matches!(result, Err(RepositoryError::Validation(_))));
    }

    let largest = repo
        .create(
            user_id,
            NewExpense {
                amount: dec!(99999999.99),
                budget_id: Some(food),
                ..NewExpense::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(remaining(&db, user_id, food).await, dec!(-99997999.99));

    repo.delete(user_id, ExpenseId::from(largest.id)).await.unwrap();
    assert_eq!(remaining(&db, user_id, food).await, dec!(2000));
}

#[tokio::test]
async fn test_foreign_budget_and_category_rejected() {
    let db = setup_db().await;
    let (alice, _) = register_user(&db).await;
    let (_, bob_reg) = register_user(&db).await;
    let repo = ExpenseRepository::new(db.clone());

    let foreign_budget = repo
        .create(
            alice,
            NewExpense {
                amount: dec!(1),
                budget_id: Some(bob_reg.budgets[0].id),
                ..NewExpense::default()
            },
        )
        .await;
    assert!(matches!(foreign_budget, Err(RepositoryError::NotFound { entity: "Budget", .. })));

    let foreign_category = repo
        .create(
            alice,
            NewExpense {
                amount: dec!(1),
                category_id: Some(bob_reg.categories[0].id.into()),
                ..NewExpense::default()
            },
        )
        .await;
    assert!(matches!(
        foreign_category,
        Err(RepositoryError::NotFound { entity: "Category", .. })
    ));

    // Bob's budget is untouched.
    assert_eq!(
        remaining(&db, bob_reg.profile.user_id.into(), bob_reg.budgets[0].id).await,
        dec!(2000)
    );
}

#[tokio::test]
async fn test_repeated_delete_refunds_once() {
    let db = setup_db().await;
    let (user_id, registration) = register_user(&db).await;
    let food = registration.budgets[0].id;
    let repo = ExpenseRepository::new(db.clone());

    let expense = repo
        .create(
            user_id,
            NewExpense {
                amount: dec!(120),
                budget_id: Some(food),
                ..NewExpense::default()
            },
        )
        .await
        .unwrap();
    let expense_id = ExpenseId::from(expense.id);
    assert_eq!(remaining(&db, user_id, food).await, dec!(1880));

    let (first, second) = tokio::join!(
        repo.delete(user_id, expense_id),
        repo.delete(user_id, expense_id)
    );
    let outcomes = [first, second];

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| matches!(r, Err(RepositoryError::NotFound { entity: "Expense", .. })))
            .count(),
        1
    );
    assert_eq!(remaining(&db, user_id, food).await, dec!(2000));

    let late = repo
        .update(
            user_id,
            expense_id,
            ExpensePatch {
                amount: Some(dec!(50)),
                ..ExpensePatch::default()
            },
        )
        .await;
    assert!(matches!(late, Err(RepositoryError::NotFound { entity: "Expense", .. })));
    assert_eq!(remaining(&db, user_id, food).await, dec!(2000));
}

#[tokio::test]
async fn test_other_users_expense_is_not_found() {
    let db = setup_db().await;
    let (alice, registration) = register_user(&db).await;
    let (bob, _) = register_user(&db).await;
    let repo = ExpenseRepository::new(db.clone());

    let expense = repo
        .create(
            alice,
            NewExpense {
                amount: dec!(5),
                budget_id: Some(registration.budgets[0].id),
                ..NewExpense::default()
            },
        )
        .await
        .unwrap();
    let expense_id = ExpenseId::from(expense.id);

    assert!(repo.get(bob, expense_id).await.is_err());
    assert!(repo.delete(bob, expense_id).await.is_err());
    assert_eq!(remaining(&db, alice, registration.budgets[0].id).await, dec!(1995));
}

#[tokio::test]
async fn test_failed_ledger_write_rolls_back_expense() {
    let db = setup_db().await;
    let (user_id, _) = register_user(&db).await;
    let locked = BudgetRepository::new(db.clone())
        .create(user_id, "Locked", dec!(100))
        .await
        .unwrap()
        .id;
    fail_updates_of_budget_named(&db, "Locked").await;
    let repo = ExpenseRepository::new(db.clone());

    let result = repo
        .create(
            user_id,
            NewExpense {
                amount: dec!(10),
                budget_id: Some(locked),
                ..NewExpense::default()
            },
        )
        .await;

    assert!(matches!(result, Err(RepositoryError::Database(_))));
    assert!(repo.list_for_user(user_id).await.unwrap().is_empty());
    assert_eq!(remaining(&db, user_id, locked).await, dec!(100));
}

#[tokio::test]
async fn test_category_link_and_listing_order() {
    let db = setup_db().await;
    let (user_id, registration) = register_user(&db).await;
    let repo = ExpenseRepository::new(db.clone());
    let category = registration.categories[0].id;

    for day in [3, 17, 9] {
        repo.create(
            user_id,
            NewExpense {
                amount: dec!(1),
                category_id: Some(category.into()),
                pay_date: NaiveDate::from_ymd_opt(2026, 2, day),
                ..NewExpense::default()
            },
        )
        .await
        .unwrap();
    }

    let days: Vec<_> = repo
        .list_for_user(user_id)
        .await
        .unwrap()
        .into_iter()
        .filter_map(|e| e.pay_date)
        .collect();
    assert_eq!(
        days,
        [17, 9, 3].map(|d| NaiveDate::from_ymd_opt(2026, 2, d).unwrap())
    );

    CategoryRepository::new(db.clone())
        .delete(user_id, category.into())
        .await
        .unwrap();
    assert!(
        repo.list_for_user(user_id)
            .await
            .unwrap()
            .iter()
            .all(|e| e.category_id.is_none())
    );
}

#[tokio::test]
async fn test_invariant_holds_over_mixed_operations() {
    let db = setup_db().await;
    let (user_id, registration) = register_user(&db).await;
    let ids: Vec<BudgetId> = registration.budgets.iter().map(|b| b.id).collect();
    let repo = ExpenseRepository::new(db.clone());

    let mut live = Vec::new();
    for (i, amount) in [dec!(12.50), dec!(300), dec!(0), dec!(45.05), dec!(999.99)]
        .into_iter()
        .enumerate()
    {
        let budget_id = (i % 4 < 3).then(|| ids[i % 3]);
        let expense = repo
            .create(
                user_id,
                NewExpense {
                    amount,
                    budget_id,
                    ..NewExpense::default()
                },
            )
            .await
            .unwrap();
        live.push(ExpenseId::from(expense.id));
    }

    repo.update(
        user_id,
        live[0],
        ExpensePatch {
            amount: Some(dec!(20)),
            budget_id: Patch::Set(ids[2]),
            ..ExpensePatch::default()
        },
    )
    .await
    .unwrap();
    repo.update(
        user_id,
        live[3],
        ExpensePatch {
            budget_id: Patch::Set(ids[1]),
            ..ExpensePatch::default()
        },
    )
    .await
    .unwrap();
    repo.delete(user_id, live[1]).await.unwrap();

    let expenses = repo.list_for_user(user_id).await.unwrap();
    for budget in BudgetRepository::new(db.clone()).list_for_user(user_id).await.unwrap() {
        let linked: i64 = expenses
            .iter()
            .filter(|e| e.budget_id == Some(budget.id.into_inner()))
            .map(|e| e.amount_minor)
            .sum();
        assert_eq!(
            budget.remaining_amount,
            budget.amount - Decimal::new(linked, 2),
            "budget {}",
            budget.name
        );
    }
}
