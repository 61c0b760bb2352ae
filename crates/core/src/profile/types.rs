//! Profile defaults and updates.

use serde::{Deserialize, Serialize};

use super::error::ProfileError;
use super::normalize::{looks_like_email, normalize_email, title_case};
use crate::patch::Patch;
use crate::schedule::PayDay;

/// Longest stored first or last name.
pub const MAX_PERSON_NAME_LEN: usize = 50;

/// Values a profile starts with at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileDefaults {
    /// Default reset day code.
    pub pay_day: &'static str,
    /// Default salary day code.
    pub salary_day: &'static str,
    /// Desired monthly budget, whole units.
    pub desired_budget: i64,
    /// Saving target, whole units.
    pub saving_target: i64,
    /// Expected income, whole units.
    pub expected_income: i64,
}

/// Registration defaults. Day codes are zero-padded so they match the
/// scheduler's day codes.
pub const PROFILE_DEFAULTS: ProfileDefaults = ProfileDefaults {
    pay_day: "01",
    salary_day: "01",
    desired_budget: 5000,
    saving_target: 5000,
    expected_income: 6000,
};

/// Requested profile changes. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdate {
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Email; an empty string clears it.
    pub email: Option<String>,
    /// Reset day code, `01`..`31`.
    pub pay_day: Option<String>,
    /// Salary day code, `01`..`31`.
    pub salary_day: Option<String>,
    /// Desired monthly budget.
    pub desired_budget: Option<i64>,
    /// Saving target.
    pub saving_target: Option<i64>,
    /// Expected income.
    pub expected_income: Option<i64>,
}

/// A normalized `ProfileUpdate`, ready to persist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedProfileUpdate {
    /// Title-cased first name.
    pub first_name: Option<String>,
    /// Title-cased last name.
    pub last_name: Option<String>,
    /// Email change.
    pub email: Patch<String>,
    /// Reset day.
    pub pay_day: Option<PayDay>,
    /// Salary day.
    pub salary_day: Option<PayDay>,
    /// Desired monthly budget.
    pub desired_budget: Option<i64>,
    /// Saving target.
    pub saving_target: Option<i64>,
    /// Expected income.
    pub expected_income: Option<i64>,
}

impl ProfileUpdate {
    /// Normalizes and validates every provided field.
    pub fn validate(self) -> Result<ValidatedProfileUpdate, ProfileError> {
        let email = match self.email {
            None => Patch::Keep,
            Some(raw) => match normalize_email(&raw) {
                None => Patch::Clear,
                Some(email) if looks_like_email(&email) => Patch::Set(email),
                Some(email) => return Err(ProfileError::InvalidEmail(email)),
            },
        };

        Ok(ValidatedProfileUpdate {
            first_name: self.first_name.as_deref().map(person_name).transpose()?,
            last_name: self.last_name.as_deref().map(person_name).transpose()?,
            email,
            pay_day: self.pay_day.as_deref().map(PayDay::parse).transpose()?,
            salary_day: self.salary_day.as_deref().map(PayDay::parse).transpose()?,
            desired_budget: non_negative("desired_budget", self.desired_budget)?,
            saving_target: non_negative("saving_target", self.saving_target)?,
            expected_income: non_negative("expected_income", self.expected_income)?,
        })
    }
}

fn person_name(raw: &str) -> Result<String, ProfileError> {
    let name = title_case(raw.trim());
    if name.chars().count() > MAX_PERSON_NAME_LEN {
        return Err(ProfileError::NameTooLong {
            max: MAX_PERSON_NAME_LEN,
        });
    }
    Ok(name)
}

fn non_negative(field: &'static str, value: Option<i64>) -> Result<Option<i64>, ProfileError> {
    match value {
        Some(v) if v < 0 => Err(ProfileError::NegativeTarget { field }),
        other => Ok(other),
    }
}
