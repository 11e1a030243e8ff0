//! Monetary primitives and wire enums.

use std::{fmt::Display, ops::Add, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in major currency units (`12.3` meaning 12.30).
///
/// This struct represents the unit the gateway reports and accepts on
/// every transaction resource. Keeping it a newtype stops raw decimals
/// from leaking into amount bookkeeping.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MajorUnit(Decimal);

impl MajorUnit {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The smaller of the two amounts.
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    /// Subtraction clamped at zero. Budgets never go negative.
    pub fn saturating_sub(self, other: Self) -> Self {
        Self((self.0 - other.0).max(Decimal::ZERO))
    }

    pub fn into_inner(self) -> Decimal {
        self.0
    }
}

impl Add for MajorUnit {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Display for MajorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for MajorUnit {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for MajorUnit {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Self)
    }
}

/// Reason attached to a cancellation, defaulting to a plain cancel.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum CancelReasonCode {
    #[default]
    Cancel,
    Return,
    Credit,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn amount(s: &str) -> MajorUnit {
        s.parse().unwrap()
    }

    #[test]
    fn saturating_sub_clamps_at_zero() {
        assert_eq!(amount("10.0").saturating_sub(amount("2.3")), amount("7.7"));
        assert_eq!(amount("2.3").saturating_sub(amount("10.0")), MajorUnit::ZERO);
    }

    #[test]
    fn min_picks_the_smaller_amount() {
        assert_eq!(amount("12.3").min(amount("10.0")), amount("10.0"));
        assert_eq!(amount("10.0").min(amount("12.3")), amount("10.0"));
    }

    #[test]
    fn serializes_as_plain_number() {
        let value = serde_json::to_value(amount("12.3")).unwrap();
        assert_eq!(value, serde_json::json!(12.3));
    }

    #[test]
    fn reason_code_wire_form_is_uppercase() {
        assert_eq!(CancelReasonCode::Cancel.to_string(), "CANCEL");
        assert_eq!(
            serde_json::to_value(CancelReasonCode::Return).unwrap(),
            serde_json::json!("RETURN")
        );
        assert_eq!(CancelReasonCode::default(), CancelReasonCode::Cancel);
    }
}
