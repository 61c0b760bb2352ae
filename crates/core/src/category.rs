//! User-owned spending categories.

use thiserror::Error;

/// Maximum category name length.
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// Categories seeded for every new user, matching the default budgets.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Food", "Home", "General"];

/// Category errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    /// Name is empty.
    #[error("Category name cannot be empty")]
    EmptyName,

    /// Name is too long.
    #[error("Category name cannot exceed {max} characters")]
    NameTooLong {
        /// Maximum length.
        max: usize,
    },
}

/// Trims and checks a category name.
pub fn validate_category_name(name: &str) -> Result<String, CategoryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CategoryError::EmptyName);
    }
    if trimmed.chars().count() > MAX_CATEGORY_NAME_LEN {
        return Err(CategoryError::NameTooLong {
            max: MAX_CATEGORY_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}
