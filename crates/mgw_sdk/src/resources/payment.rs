//! The payment aggregate root.

use serde::{Deserialize, Serialize};

use super::{
    amount::Amount,
    transaction_types::{Authorization, Cancellation, Charge},
};
use crate::{
    errors::{ApiErrorResponse, SdkResult},
    services::cancel_service::{CancelOptions, CancelService},
    types::MajorUnit,
};

/// A payment owns at most one authorization and an ordered list of
/// charges; the lists only ever grow, cancellations are recorded as
/// additional entries on the transactions rather than deletions.
/// Attaching a transaction stamps the payment id into its
/// back-reference so the remote resource path can be built; the
/// back-reference never carries ownership.
///
/// The aggregate is not safe for concurrent mutation: the in-memory
/// bookkeeping is updated non-atomically relative to the remote call
/// that produced it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    authorization: Option<Authorization>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    charges: Vec<Charge>,
}

impl Payment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Sets the payment id and restamps the back-reference of every
    /// owned transaction.
    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        if let Some(authorization) = self.authorization.as_mut() {
            authorization.set_payment_id(Some(id.clone()));
        }
        for charge in &mut self.charges {
            charge.set_payment_id(Some(id.clone()));
        }
        self.id = Some(id);
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.set_id(id);
        self
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn amount_mut(&mut self) -> &mut Amount {
        &mut self.amount
    }

    pub fn authorization(&self) -> Option<&Authorization> {
        self.authorization.as_ref()
    }

    pub fn authorization_mut(&mut self) -> Option<&mut Authorization> {
        self.authorization.as_mut()
    }

    pub fn set_authorization(&mut self, mut authorization: Authorization) {
        authorization.set_payment_id(self.id.clone());
        self.authorization = Some(authorization);
    }

    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    pub(crate) fn charges_mut(&mut self) -> &mut [Charge] {
        &mut self.charges
    }

    /// Appends a charge; insertion order is creation order.
    pub fn add_charge(&mut self, mut charge: Charge) {
        charge.set_payment_id(self.id.clone());
        self.charges.push(charge);
    }

    pub fn charge(&self, charge_id: &str) -> Option<&Charge> {
        self.charges
            .iter()
            .find(|charge| charge.id() == Some(charge_id))
    }

    pub fn charge_mut(&mut self, charge_id: &str) -> Option<&mut Charge> {
        self.charges
            .iter_mut()
            .find(|charge| charge.id() == Some(charge_id))
    }

    /// Cancels `amount` across the whole payment (everything remaining
    /// when `None`), authorization first, then charges in order.
    pub fn cancel_amount(
        &mut self,
        service: &CancelService,
        amount: Option<MajorUnit>,
        options: &CancelOptions,
    ) -> SdkResult<Vec<Cancellation>> {
        service.cancel_payment(self, amount, options)
    }

    /// Cancels the given amount of this payment's authorization, capped
    /// at the remaining amount. `None` when there is nothing to do.
    pub fn cancel_authorization_amount(
        &mut self,
        service: &CancelService,
        amount: Option<MajorUnit>,
    ) -> SdkResult<Option<Cancellation>> {
        service.cancel_payment_authorization(self, amount)
    }

    /// Legacy unconditional charge sweep.
    #[deprecated(note = "use `cancel_amount`, which allocates across the whole payment")]
    pub fn cancel_all_charges(
        &mut self,
        service: &CancelService,
    ) -> SdkResult<(Vec<Cancellation>, Vec<ApiErrorResponse>)> {
        #[allow(deprecated)]
        service.cancel_all_charges(self)
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
    fn charges_keep_insertion_order() {
        let mut payment = Payment::new().with_id("s-pay-1");
        payment.add_charge(Charge::new(Some(amount("10.0"))).with_id("s-chg-1"));
        payment.add_charge(Charge::new(Some(amount("12.3"))).with_id("s-chg-2"));

        let ids: Vec<_> = payment.charges().iter().filter_map(Charge::id).collect();
        assert_eq!(ids, ["s-chg-1", "s-chg-2"]);
        assert_eq!(payment.charge("s-chg-2").unwrap().amount(), Some(amount("12.3")));
        assert!(payment.charge("s-chg-9").is_none());
    }

    #[test]
    fn attaching_transactions_stamps_the_back_reference() {
        let mut payment = Payment::new().with_id("s-pay-7");
        payment.set_authorization(Authorization::new(amount("100.0")));
        payment.add_charge(Charge::new(None));

        assert_eq!(payment.authorization().unwrap().payment_id(), Some("s-pay-7"));
        assert_eq!(payment.charges()[0].payment_id(), Some("s-pay-7"));
    }

    #[test]
    fn set_id_restamps_existing_transactions() {
        let mut payment = Payment::new();
        payment.set_authorization(Authorization::new(amount("50.0")));
        assert_eq!(payment.authorization().unwrap().payment_id(), None);

        payment.set_id("s-pay-2");
        assert_eq!(payment.authorization().unwrap().payment_id(), Some("s-pay-2"));
    }
}
