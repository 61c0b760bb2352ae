//! `SeaORM` Entity for expenses table.

use purse_core::reconcile::ExpenseSnapshot;
use purse_shared::types::from_minor_units;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount_minor: i64,
    pub pay_date: Option<Date>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub budget_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budgets::Entity",
        from = "Column::BudgetId",
        to = "super::budgets::Column::Id",
        on_delete = "SetNull"
    )]
    Budgets,
    #[sea_orm(
        belongs_to = "super::user_categories::Entity",
        from = "Column::CategoryId",
        to = "super::user_categories::Column::Id",
        on_delete = "SetNull"
    )]
    UserCategories,
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl Related<super::user_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserCategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Budget link and amount, as seen by the reconciler.
    #[must_use]
    pub fn snapshot(&self) -> ExpenseSnapshot {
        ExpenseSnapshot::new(
            self.budget_id.map(Into::into),
            from_minor_units(self.amount_minor),
        )
    }
}
