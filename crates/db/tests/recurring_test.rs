//! Integration tests for recurring templates and their deletion lifecycle.

mod common;

use chrono::NaiveDate;
use common::{register_user, setup_db};
use purse_core::recurring::{DeletionOutcome, Frequency, RecurringKind};
use purse_db::RepositoryError;
use purse_db::repositories::{NewRecurring, RecurringRepository};
use rust_decimal_macros::dec;

fn salary(start: NaiveDate) -> NewRecurring {
    NewRecurring {
        amount: dec!(6000),
        frequency: Frequency::Monthly,
        start_date: start,
        end_date: None,
        description: Some("Salary".into()),
        category_id: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_delete_deactivates_then_removes() {
    let db = setup_db().await;
    let (user_id, _) = register_user(&db).await;
    let repo = RecurringRepository::new(db.clone());

    let record = repo
        .create(user_id, RecurringKind::Income, salary(date(2026, 1, 10)))
        .await
        .unwrap();
    assert!(record.is_active);

    let first = repo
        .delete(user_id, RecurringKind::Income, record.id)
        .await
        .unwrap();
    assert_eq!(first, DeletionOutcome::Deactivated);
    let stored = repo
        .get(user_id, RecurringKind::Income, record.id)
        .await
        .unwrap();
    assert!(!stored.is_active);

    let second = repo
        .delete(user_id, RecurringKind::Income, record.id)
        .await
        .unwrap();
    assert_eq!(second, DeletionOutcome::Removed);
    assert!(matches!(
        repo.get(user_id, RecurringKind::Income, record.id).await,
        Err(RepositoryError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_reactivated_record_needs_two_deletes_again() {
    let db = setup_db().await;
    let (user_id, _) = register_user(&db).await;
    let repo = RecurringRepository::new(db.clone());

    let record = repo
        .create(user_id, RecurringKind::Expense, salary(date(2026, 1, 1)))
        .await
        .unwrap();
    repo.delete(user_id, RecurringKind::Expense, record.id)
        .await
        .unwrap();
    repo.set_active(user_id, RecurringKind::Expense, record.id, true)
        .await
        .unwrap();

    assert_eq!(
        repo.delete(user_id, RecurringKind::Expense, record.id)
            .await
            .unwrap(),
        DeletionOutcome::Deactivated
    );
}

#[tokio::test]
async fn test_kinds_are_kept_apart() {
    let db = setup_db().await;
    let (user_id, _) = register_user(&db).await;
    let repo = RecurringRepository::new(db.clone());

    let income = repo
        .create(user_id, RecurringKind::Income, salary(date(2026, 1, 1)))
        .await
        .unwrap();

    assert!(
        repo.list_for_user(user_id, RecurringKind::Expense)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        repo.get(user_id, RecurringKind::Expense, income.id)
            .await
            .is_err()
    );
    assert_eq!(income.kind, RecurringKind::Income);
    assert_eq!(income.amount, dec!(6000));
    assert_eq!(income.frequency, Frequency::Monthly);
}

#[tokio::test]
async fn test_list_latest_start_first() {
    let db = setup_db().await;
    let (user_id, _) = register_user(&db).await;
    let repo = RecurringRepository::new(db.clone());

    for month in [2, 6, 4] {
        repo.create(user_id, RecurringKind::Expense, salary(date(2026, month, 1)))
            .await
            .unwrap();
    }

    let starts: Vec<_> = repo
        .list_for_user(user_id, RecurringKind::Expense)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.start_date)
        .collect();
    assert_eq!(starts, [date(2026, 6, 1), date(2026, 4, 1), date(2026, 2, 1)]);
}

#[tokio::test]
async fn test_invalid_templates_rejected() {
    let db = setup_db().await;
    let (user_id, _) = register_user(&db).await;
    let repo = RecurringRepository::new(db.clone());

    let mut backwards = salary(date(2026, 3, 1));
    backwards.end_date = Some(date(2026, 2, 1));
    assert!(matches!(
        repo.create(user_id, RecurringKind::Expense, backwards).await,
        Err(RepositoryError::Validation(_))
    ));

    let mut negative = salary(date(2026, 3, 1));
    negative.amount = dec!(-1);
    assert!(matches!(
        repo.create(user_id, RecurringKind::Income, negative).await,
        Err(RepositoryError::Validation(_))
    ));
}

#[tokio::test]
async fn test_other_users_cannot_delete() {
    let db = setup_db().await;
    let (alice, _) = register_user(&db).await;
    let (bob, _) = register_user(&db).await;
    let repo = RecurringRepository::new(db.clone());

    let record = repo
        .create(alice, RecurringKind::Expense, salary(date(2026, 1, 1)))
        .await
        .unwrap();

    assert!(
        repo.delete(bob, RecurringKind::Expense, record.id)
            .await
            .is_err()
    );
    assert!(
        repo.get(alice, RecurringKind::Expense, record.id)
            .await
            .unwrap()
            .is_active
    );
}
