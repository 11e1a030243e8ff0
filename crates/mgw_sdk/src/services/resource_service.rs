//! The collaborator that moves resources over the wire.

use crate::{
    errors::SdkResult,
    resources::{Authorization, Cancellation, Charge, Payment},
};

/// Addressing for the "create under parent" shape cancellations use:
/// a cancellation is never a top-level resource, it lives under the
/// transaction it reverses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CancellationParent {
    Authorization {
        payment_id: Option<String>,
    },
    Charge {
        payment_id: Option<String>,
        charge_id: Option<String>,
    },
}

/// Remote CRUD surface the SDK drives resources through. Calls are
/// blocking round trips issued strictly sequentially; every method
/// returns the materialized resource on 2xx and raises
/// [`crate::SdkError::Api`] with the gateway's response code otherwise.
///
/// Transport and serialization live entirely behind this trait.
pub trait ResourceService: Send + Sync {
    /// Creates the authorization transaction under a fresh payment.
    fn create_authorization(&self, authorization: &Authorization) -> SdkResult<Authorization>;

    /// Creates a charge, either directly or against an authorization.
    fn create_charge(&self, charge: &Charge) -> SdkResult<Charge>;

    /// Creates a cancellation under the given transaction.
    fn create_cancellation(
        &self,
        parent: &CancellationParent,
        cancellation: &Cancellation,
    ) -> SdkResult<Cancellation>;

    /// Fetches the payment aggregate including its transactions.
    fn fetch_payment(&self, payment_id: &str) -> SdkResult<Payment>;

    /// Pushes locally changed payment metadata to the gateway.
    fn update_payment(&self, payment: &Payment) -> SdkResult<Payment>;
}

#[cfg(test)]
mockall::mock! {
    pub ResourceService {}

    impl ResourceService for ResourceService {
        fn create_authorization(&self, authorization: &Authorization) -> SdkResult<Authorization>;
        fn create_charge(&self, charge: &Charge) -> SdkResult<Charge>;
        fn create_cancellation(
            &self,
            parent: &CancellationParent,
            cancellation: &Cancellation,
        ) -> SdkResult<Cancellation>;
        fn fetch_payment(&self, payment_id: &str) -> SdkResult<Payment>;
        fn update_payment(&self, payment: &Payment) -> SdkResult<Payment>;
    }
}
