//! The authorization transaction: a hold of funds against a payment
//! method, cancellable in whole or part before being charged.

use serde::{Deserialize, Serialize};

use super::cancellation::Cancellation;
use crate::{
    errors::SdkResult,
    services::resource_service::{CancellationParent, ResourceService},
    types::MajorUnit,
};

/// At most one authorization exists per payment. The `payment_id` back
/// reference is for addressing the remote resource only; the payment
/// aggregate owns this object outright.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<MajorUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    cancellations: Vec<Cancellation>,
}

impl Authorization {
    pub fn new(amount: MajorUnit) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_type_id(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    pub fn with_return_url(mut self, return_url: impl Into<String>) -> Self {
        self.return_url = Some(return_url.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn amount(&self) -> Option<MajorUnit> {
        self.amount
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }

    pub(crate) fn set_payment_id(&mut self, payment_id: Option<String>) {
        self.payment_id = payment_id;
    }

    pub fn cancellations(&self) -> &[Cancellation] {
        &self.cancellations
    }

    /// Sum of everything already reversed on this hold.
    pub fn canceled_total(&self) -> MajorUnit {
        self.cancellations
            .iter()
            .map(|cancellation| cancellation.amount().unwrap_or_default())
            .fold(MajorUnit::ZERO, |acc, amount| acc + amount)
    }

    /// Authorized amount minus the sum of its cancellations. `None`
    /// while the authorized amount is unknown.
    pub fn remaining(&self) -> Option<MajorUnit> {
        self.amount
            .map(|amount| amount.saturating_sub(self.canceled_total()))
    }

    /// Reverses `amount` of this hold (all of it when `None`) through
    /// the resource service. Appends the created record on success and
    /// propagates every gateway error unclassified; tolerating
    /// already-settled states is the caller's policy, not this
    /// resource's.
    pub fn cancel(
        &mut self,
        resources: &dyn ResourceService,
        amount: Option<MajorUnit>,
    ) -> SdkResult<Cancellation> {
        let parent = CancellationParent::Authorization {
            payment_id: self.payment_id.clone(),
        };
        let created = resources.create_cancellation(&parent, &Cancellation::new(amount))?;
        self.cancellations.push(created.clone());
        Ok(created)
    }
}
