//! The charge transaction: an actual settlement of funds, refundable
//! in whole or part.

use serde::{Deserialize, Serialize};

use super::cancellation::Cancellation;
use crate::{
    errors::SdkResult,
    services::{
        cancel_service::CancelOptions,
        resource_service::{CancellationParent, ResourceService},
    },
    types::MajorUnit,
};

/// A payment owns zero or more charges in creation order. A `None`
/// amount means "the full remaining authorized amount"; the gateway
/// settles on the exact figure. Repeated partial refunds accumulate as
/// separate cancellations against the same charge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
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

impl Charge {
    pub fn new(amount: Option<MajorUnit>) -> Self {
        Self {
            amount,
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

    /// Sum of everything already refunded on this charge.
    pub fn canceled_total(&self) -> MajorUnit {
        self.cancellations
            .iter()
            .map(|cancellation| cancellation.amount().unwrap_or_default())
            .fold(MajorUnit::ZERO, |acc, amount| acc + amount)
    }

    /// Settled amount minus the sum of its cancellations. `None` while
    /// the settled amount is unknown.
    pub fn remaining(&self) -> Option<MajorUnit> {
        self.amount
            .map(|amount| amount.saturating_sub(self.canceled_total()))
    }

    /// Refunds `amount` of this charge (all of it when `None`) through
    /// the resource service. Appends the created record on success and
    /// propagates every gateway error unclassified.
    pub fn cancel(
        &mut self,
        resources: &dyn ResourceService,
        amount: Option<MajorUnit>,
        options: &CancelOptions,
    ) -> SdkResult<Cancellation> {
        let mut request = Cancellation::new(amount);
        if let Some(reason_code) = options.reason_code {
            request = request.with_reason_code(reason_code);
        }
        if let Some(reference) = options.payment_reference.as_deref() {
            request = request.with_payment_reference(reference);
        }
        if let Some(amount_net) = options.amount_net {
            request = request.with_amount_net(amount_net);
        }
        if let Some(amount_vat) = options.amount_vat {
            request = request.with_amount_vat(amount_vat);
        }

        let parent = CancellationParent::Charge {
            payment_id: self.payment_id.clone(),
            charge_id: self.id.clone(),
        };
        let created = resources.create_cancellation(&parent, &request)?;
        self.cancellations.push(created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use mockall::predicate::eq;

    use super::*;
    use crate::{
        services::resource_service::MockResourceService,
        types::CancelReasonCode,
    };

    fn amount(s: &str) -> MajorUnit {
        s.parse().unwrap()
    }

    #[test]
    fn cancel_appends_the_created_record() {
        let mut charge = Charge::new(Some(amount("10.0")))
            .with_id("s-chg-1");
        charge.set_payment_id(Some("s-pay-1".into()));

        let mut resources = MockResourceService::new();
        resources
            .expect_create_cancellation()
            .with(
                eq(CancellationParent::Charge {
                    payment_id: Some("s-pay-1".into()),
                    charge_id: Some("s-chg-1".into()),
                }),
                eq(Cancellation::new(Some(amount("4.0")))
                    .with_reason_code(CancelReasonCode::Return)),
            )
            .times(1)
            .returning(|_, request| Ok(request.clone().with_id("s-cnl-1")));

        let options = CancelOptions {
            reason_code: Some(CancelReasonCode::Return),
            ..CancelOptions::default()
        };
        let cancellation = charge
            .cancel(&resources, Some(amount("4.0")), &options)
            .unwrap();

        assert_eq!(cancellation.id(), Some("s-cnl-1"));
        assert_eq!(charge.cancellations().len(), 1);
        assert_eq!(charge.remaining(), Some(amount("6.0")));
    }

    #[test]
    fn repeated_partial_cancels_accumulate() {
        let mut charge = Charge::new(Some(amount("10.0")));
        let mut resources = MockResourceService::new();
        resources
            .expect_create_cancellation()
            .times(2)
            .returning(|_, request| Ok(request.clone().with_id("s-cnl-n")));

        let options = CancelOptions::default();
        charge
            .cancel(&resources, Some(amount("3.0")), &options)
            .unwrap();
        charge
            .cancel(&resources, Some(amount("3.0")), &options)
            .unwrap();

        assert_eq!(charge.cancellations().len(), 2);
        assert_eq!(charge.canceled_total(), amount("6.0"));
        assert_eq!(charge.remaining(), Some(amount("4.0")));
    }
}
