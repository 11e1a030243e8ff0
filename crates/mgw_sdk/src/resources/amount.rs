//! Amount bookkeeping attached to a payment.

use serde::{Deserialize, Serialize};

use crate::types::MajorUnit;

/// Tracks how much of a payment is settled, reversed and still open.
///
/// `remaining` is derived as `total - charged - canceled`, clamped at
/// zero while `total` is known; with an unknown total the remaining
/// amount is undefined rather than zero. Only the owning resource
/// mutates this when it processes a gateway response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<MajorUnit>,
    charged: MajorUnit,
    canceled: MajorUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    remaining: Option<MajorUnit>,
}

impl Amount {
    pub fn new(total: MajorUnit) -> Self {
        Self {
            total: Some(total),
            charged: MajorUnit::ZERO,
            canceled: MajorUnit::ZERO,
            remaining: Some(total),
        }
    }

    pub fn total(&self) -> Option<MajorUnit> {
        self.total
    }

    pub fn charged(&self) -> MajorUnit {
        self.charged
    }

    pub fn canceled(&self) -> MajorUnit {
        self.canceled
    }

    pub fn remaining(&self) -> Option<MajorUnit> {
        self.remaining
    }

    pub fn set_total(&mut self, total: MajorUnit) {
        self.total = Some(total);
        self.recompute_remaining();
    }

    /// Overrides the derived remaining amount with a gateway supplied
    /// value. Fetched payments carry this field on the wire.
    pub fn set_remaining(&mut self, remaining: MajorUnit) {
        self.remaining = Some(remaining);
    }

    /// Books a successful settlement against this payment.
    pub fn record_charged(&mut self, amount: MajorUnit) {
        self.charged = self.charged + amount;
        self.recompute_remaining();
    }

    /// Books a successful cancellation against this payment.
    pub fn record_canceled(&mut self, amount: MajorUnit) {
        self.canceled = self.canceled + amount;
        self.recompute_remaining();
    }

    fn recompute_remaining(&mut self) {
        self.remaining = self
            .total
            .map(|total| total.saturating_sub(self.charged + self.canceled));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn amount(s: &str) -> MajorUnit {
        s.parse().unwrap()
    }

    #[test]
    fn remaining_is_derived_from_total() {
        let mut subject = Amount::new(amount("100.0"));
        assert_eq!(subject.remaining(), Some(amount("100.0")));

        subject.record_charged(amount("40.0"));
        subject.record_canceled(amount("10.0"));
        assert_eq!(subject.remaining(), Some(amount("50.0")));
        assert_eq!(subject.charged(), amount("40.0"));
        assert_eq!(subject.canceled(), amount("10.0"));
    }

    #[test]
    fn remaining_clamps_at_zero() {
        let mut subject = Amount::new(amount("10.0"));
        subject.record_canceled(amount("12.3"));
        assert_eq!(subject.remaining(), Some(MajorUnit::ZERO));
    }

    #[test]
    fn remaining_is_undefined_without_a_total() {
        let mut subject = Amount::default();
        subject.record_charged(amount("5.0"));
        assert_eq!(subject.remaining(), None);

        subject.set_remaining(amount("3.0"));
        assert_eq!(subject.remaining(), Some(amount("3.0")));
    }
}
