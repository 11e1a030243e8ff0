//! The record of money reversed against an authorization or charge.

use serde::{Deserialize, Serialize};

use crate::types::{CancelReasonCode, MajorUnit};

/// Result of a successful cancel action, owned by the transaction that
/// produced it. A `None` amount on the request side means "full
/// remaining amount, determined by the gateway"; once the gateway has
/// assigned an id the record is immutable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cancellation {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<MajorUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason_code: Option<CancelReasonCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount_net: Option<MajorUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount_vat: Option<MajorUnit>,
}

impl Cancellation {
    pub fn new(amount: Option<MajorUnit>) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    /// Remote-assigned identifier, used by transport implementations
    /// when materializing the create response.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_reason_code(mut self, reason_code: CancelReasonCode) -> Self {
        self.reason_code = Some(reason_code);
        self
    }

    pub fn with_payment_reference(mut self, payment_reference: impl Into<String>) -> Self {
        self.payment_reference = Some(payment_reference.into());
        self
    }

    /// Net part of a split amount. Installment style charges only.
    pub fn with_amount_net(mut self, amount_net: MajorUnit) -> Self {
        self.amount_net = Some(amount_net);
        self
    }

    /// Vat part of a split amount. Installment style charges only.
    pub fn with_amount_vat(mut self, amount_vat: MajorUnit) -> Self {
        self.amount_vat = Some(amount_vat);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn amount(&self) -> Option<MajorUnit> {
        self.amount
    }

    pub fn reason_code(&self) -> Option<CancelReasonCode> {
        self.reason_code
    }

    pub fn payment_reference(&self) -> Option<&str> {
        self.payment_reference.as_deref()
    }

    pub fn amount_net(&self) -> Option<MajorUnit> {
        self.amount_net
    }

    pub fn amount_vat(&self) -> Option<MajorUnit> {
        self.amount_vat
    }
}
