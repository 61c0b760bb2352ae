//! Day-of-month codes that drive the budget reset schedule.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid pay-day code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayDayError {
    /// Not a two-digit day between `01` and `31`.
    #[error("Pay day must be a two-digit day of month between 01 and 31, got {0:?}")]
    Invalid(String),
}

/// A validated two-character day-of-month code, `"01"` to `"31"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayDay(String);

impl PayDay {
    /// Parses a pay-day code. Unpadded values such as `"5"` are rejected.
    ///
    /// # Errors
    ///
    /// Returns `PayDayError::Invalid` unless `code` is exactly two ASCII
    /// digits forming a day between 1 and 31.
    pub fn parse(code: &str) -> Result<Self, PayDayError> {
        let valid = code.len() == 2
            && code.bytes().all(|b| b.is_ascii_digit())
            && matches!(code.parse::<u8>(), Ok(1..=31));

        if valid {
            Ok(Self(code.to_string()))
        } else {
            Err(PayDayError::Invalid(code.to_string()))
        }
    }

    /// The pay-day code for the day of month of `date`.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        Self(day_code(date))
    }

    /// The code as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PayDay {
    fn default() -> Self {
        Self("01".to_string())
    }
}

impl std::fmt::Display for PayDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PayDay {
    type Error = PayDayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PayDay> for String {
    fn from(pay_day: PayDay) -> Self {
        pay_day.0
    }
}

/// Zero-padded two-digit day of month of `date`.
#[must_use]
pub fn day_code(date: NaiveDate) -> String {
    format!("{:02}", date.day())
}
