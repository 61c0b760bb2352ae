//! Active/inactive lifecycle and template validation.

use chrono::NaiveDate;
use serde::Serialize;

use super::error::RecurringError;

/// Longest stored description.
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// What a delete request did to a recurring template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionOutcome {
    /// The template was active and is now inactive.
    Deactivated,
    /// The template was already inactive and has been removed.
    Removed,
}

/// Outcome of deleting a template in the given state. There is no way to
/// skip straight from active to removed.
#[must_use]
pub const fn deletion_outcome(is_active: bool) -> DeletionOutcome {
    if is_active {
        DeletionOutcome::Deactivated
    } else {
        DeletionOutcome::Removed
    }
}

/// Checks that an optional end date does not precede the start date.
pub fn validate_schedule(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), RecurringError> {
    match end {
        Some(end) if end < start => Err(RecurringError::EndBeforeStart { start, end }),
        _ => Ok(()),
    }
}

/// Trims a description; blank becomes `None`.
pub fn validate_description(description: Option<String>) -> Result<Option<String>, RecurringError> {
    let Some(text) = description else {
        return Ok(None);
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(RecurringError::DescriptionTooLong {
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(Some(trimmed.to_string()))
}
