//! Initial schema: profiles, categories, budgets, expenses and recurring
//! templates.
//!
//! Money columns are `BIGINT` minor units. Deleting a profile cascades to
//! everything the user owns; deleting a budget or category sets references
//! to it to NULL.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum UserProfiles {
    Table,
    UserId,
    FirstName,
    LastName,
    Email,
    PayDay,
    SalaryDay,
    DesiredBudget,
    SavingTarget,
    ExpectedIncome,
    JoinDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum UserCategories {
    Table,
    Id,
    UserId,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
    UserId,
    Name,
    AmountMinor,
    RemainingMinor,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    UserId,
    AmountMinor,
    PayDate,
    Description,
    CategoryId,
    BudgetId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
enum RecurringExpenses {
    Table,
}

#[derive(Iden, Clone, Copy)]
enum RecurringIncomes {
    Table,
}

#[derive(Iden)]
enum Recurring {
    Id,
    UserId,
    AmountMinor,
    Frequency,
    StartDate,
    EndDate,
    Description,
    CategoryId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserProfiles::UserId).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(UserProfiles::FirstName)
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::LastName)
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(UserProfiles::Email).string_len(254).null().unique_key())
                    .col(ColumnDef::new(UserProfiles::PayDay).string_len(2).null())
                    .col(ColumnDef::new(UserProfiles::SalaryDay).string_len(2).null())
                    .col(ColumnDef::new(UserProfiles::DesiredBudget).big_integer().null())
                    .col(ColumnDef::new(UserProfiles::SavingTarget).big_integer().null())
                    .col(ColumnDef::new(UserProfiles::ExpectedIncome).big_integer().null())
                    .col(ColumnDef::new(UserProfiles::JoinDate).date().not_null())
                    .col(
                        ColumnDef::new(UserProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Daily reset lookup
        manager
            .create_index(
                Index::create()
                    .name("idx-user_profiles-pay_day")
                    .table(UserProfiles::Table)
                    .col(UserProfiles::PayDay)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserCategories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserCategories::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UserCategories::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserCategories::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(UserCategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_categories-user_id")
                            .from(UserCategories::Table, UserCategories::UserId)
                            .to(UserProfiles::Table, UserProfiles::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Budgets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Budgets::UserId).uuid().not_null())
                    .col(ColumnDef::new(Budgets::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Budgets::AmountMinor).big_integer().not_null())
                    .col(ColumnDef::new(Budgets::RemainingMinor).big_integer().not_null())
                    .col(ColumnDef::new(Budgets::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Budgets::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budgets-user_id")
                            .from(Budgets::Table, Budgets::UserId)
                            .to(UserProfiles::Table, UserProfiles::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budgets-user_id")
                    .table(Budgets::Table)
                    .col(Budgets::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::UserId).uuid().not_null())
                    .col(ColumnDef::new(Expenses::AmountMinor).big_integer().not_null())
                    .col(ColumnDef::new(Expenses::PayDate).date().null())
                    .col(ColumnDef::new(Expenses::Description).string_len(100).null())
                    .col(ColumnDef::new(Expenses::CategoryId).uuid().null())
                    .col(ColumnDef::new(Expenses::BudgetId).uuid().null())
                    .col(ColumnDef::new(Expenses::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Expenses::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-user_id")
                            .from(Expenses::Table, Expenses::UserId)
                            .to(UserProfiles::Table, UserProfiles::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-budget_id")
                            .from(Expenses::Table, Expenses::BudgetId)
                            .to(Budgets::Table, Budgets::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-category_id")
                            .from(Expenses::Table, Expenses::CategoryId)
                            .to(UserCategories::Table, UserCategories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-user_id-pay_date")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::PayDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-budget_id")
                    .table(Expenses::Table)
                    .col(Expenses::BudgetId)
                    .to_owned(),
            )
            .await?;

        create_recurring_table(manager, RecurringExpenses::Table, "recurring_expenses").await?;
        create_recurring_table(manager, RecurringIncomes::Table, "recurring_incomes").await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecurringIncomes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecurringExpenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await?;
        Ok(())
    }
}

async fn create_recurring_table<T>(
    manager: &SchemaManager<'_>,
    table: T,
    name: &str,
) -> Result<(), DbErr>
where
    T: Iden + Copy + 'static,
{
    manager
        .create_table(
            Table::create()
                .table(table)
                .if_not_exists()
                .col(ColumnDef::new(Recurring::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Recurring::UserId).uuid().not_null())
                .col(ColumnDef::new(Recurring::AmountMinor).big_integer().not_null())
                .col(ColumnDef::new(Recurring::Frequency).string_len(2).not_null().default("M"))
                .col(ColumnDef::new(Recurring::StartDate).date().not_null())
                .col(ColumnDef::new(Recurring::EndDate).date().null())
                .col(ColumnDef::new(Recurring::Description).string_len(100).null())
                .col(ColumnDef::new(Recurring::CategoryId).uuid().null())
                .col(ColumnDef::new(Recurring::IsActive).boolean().not_null().default(true))
                .col(ColumnDef::new(Recurring::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Recurring::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name(format!("fk-{name}-user_id"))
                        .from(table, Recurring::UserId)
                        .to(UserProfiles::Table, UserProfiles::UserId)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name(format!("fk-{name}-category_id"))
                        .from(table, Recurring::CategoryId)
                        .to(UserCategories::Table, UserCategories::Id)
                        .on_delete(ForeignKeyAction::SetNull),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name(format!("idx-{name}-user_id"))
                .table(table)
                .col(Recurring::UserId)
                .to_owned(),
        )
        .await
}
