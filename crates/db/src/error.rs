//! Repository error type and its mapping to `AppError`.

use purse_core::budget::BudgetError;
use purse_core::category::CategoryError;
use purse_core::expense::ExpenseError;
use purse_core::profile::ProfileError;
use purse_core::recurring::RecurringError;
use purse_shared::AppError;
use purse_shared::types::MoneyError;
use sea_orm::DbErr;
use uuid::Uuid;

/// Result alias for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error types for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Record not found, or owned by another user.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind.
        entity: &'static str,
        /// Requested ID.
        id: Uuid,
    },

    /// Record already exists.
    #[error("{0}")]
    Conflict(String),

    /// Input failed domain validation.
    #[error("{0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl RepositoryError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<Uuid>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

macro_rules! validation_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for RepositoryError {
                fn from(err: $source) -> Self {
                    Self::Validation(err.to_string())
                }
            }
        )*
    };
}

validation_from!(
    BudgetError,
    CategoryError,
    ExpenseError,
    MoneyError,
    ProfileError,
    RecurringError,
);

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => Self::NotFound(err.to_string()),
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            RepositoryError::Validation(msg) => Self::Validation(msg),
            RepositoryError::Database(db) => Self::Database(db.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use purse_core::amount::AmountError;

    #[test]
    fn test_maps_to_app_error() {
        let id = Uuid::nil();
        let app: AppError = RepositoryError::not_found("Budget", id).into();
        assert_eq!(app.status_code(), 404);
        assert_eq!(app.to_string(), format!("Not found: Budget not found: {id}"));

        let app: AppError =
            RepositoryError::from(BudgetError::InvalidAmount(AmountError::Negative)).into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");

        let app: AppError = RepositoryError::Database(DbErr::Custom("boom".into())).into();
        assert_eq!(app.status_code(), 500);
    }
}
