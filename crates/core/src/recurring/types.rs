//! Recurring schedule types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::RecurringError;

/// How often a recurring template repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Frequency {
    /// Every week (`W`).
    #[serde(rename = "W")]
    Weekly,
    /// Every two weeks (`B`).
    #[serde(rename = "B")]
    Biweekly,
    /// Every month (`M`).
    #[default]
    #[serde(rename = "M")]
    Monthly,
    /// Every two months (`BM`).
    #[serde(rename = "BM")]
    Bimonthly,
}

impl Frequency {
    /// Stored code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Weekly => "W",
            Self::Biweekly => "B",
            Self::Monthly => "M",
            Self::Bimonthly => "BM",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Frequency {
    type Err = RecurringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "W" => Ok(Self::Weekly),
            "B" => Ok(Self::Biweekly),
            "M" => Ok(Self::Monthly),
            "BM" => Ok(Self::Bimonthly),
            other => Err(RecurringError::InvalidFrequency(other.to_string())),
        }
    }
}

/// Which ledger side a recurring template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringKind {
    /// Recurring outgoing payment.
    Expense,
    /// Recurring incoming payment.
    Income,
}

impl fmt::Display for RecurringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => f.write_str("recurring expense"),
            Self::Income => f.write_str("recurring income"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("W", Frequency::Weekly)]
    #[case("B", Frequency::Biweekly)]
    #[case("M", Frequency::Monthly)]
    #[case("BM", Frequency::Bimonthly)]
    fn test_codes(#[case] code: &str, #[case] frequency: Frequency) {
        assert_eq!(code.parse::<Frequency>().unwrap(), frequency);
        assert_eq!(frequency.code(), code);
        assert_eq!(serde_json::to_string(&frequency).unwrap(), format!("\"{code}\""));
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(
            "m".parse::<Frequency>(),
            Err(RecurringError::InvalidFrequency("m".to_string()))
        );
    }

    #[test]
    fn test_default_is_monthly() {
        assert_eq!(Frequency::default(), Frequency::Monthly);
    }
}
