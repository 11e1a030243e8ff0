//! The root client object merchants interact with.

use std::sync::Arc;

use error_stack::report;
use secrecy::{ExposeSecret, Secret};

use crate::{
    consts::{API_VERSION, URL_LIVE, URL_SANDBOX},
    errors::{SdkError, SdkResult},
    resources::{Authorization, Cancellation, Charge, Payment},
    services::{CancelOptions, CancelService, ResourceService},
    types::MajorUnit,
};

/// Which gateway the client talks to. Key shape and environment are
/// independent: sandbox and live are told apart by the key's contents
/// on the gateway side, the SDK only selects the endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Sandbox,
    Live,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => URL_SANDBOX,
            Self::Live => URL_LIVE,
        }
    }
}

/// Parameters for placing a hold on the customer's payment method.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthorizeRequest {
    pub amount: MajorUnit,
    pub currency: String,
    pub return_url: Option<String>,
    pub payment_type_id: Option<String>,
}

impl AuthorizeRequest {
    pub fn new(amount: MajorUnit, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            return_url: None,
            payment_type_id: None,
        }
    }
}

/// Parameters for a direct charge without a prior authorization.
#[derive(Clone, Debug, PartialEq)]
pub struct ChargeRequest {
    pub amount: MajorUnit,
    pub currency: String,
    pub return_url: Option<String>,
    pub payment_type_id: Option<String>,
}

impl ChargeRequest {
    pub fn new(amount: MajorUnit, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            return_url: None,
            payment_type_id: None,
        }
    }
}

/// Facade over the resource and cancel services. Holds the merchant's
/// private key; public keys belong in browser integrations and are
/// rejected here.
pub struct MgwClient {
    private_key: Secret<String>,
    environment: Environment,
    locale: Option<String>,
    resources: Arc<dyn ResourceService>,
    cancel_service: CancelService,
}

impl std::fmt::Debug for MgwClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MgwClient")
            .field("environment", &self.environment)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl MgwClient {
    /// Creates a client for the sandbox environment. Fails with
    /// [`SdkError::InvalidKey`] unless the key is private-key shaped.
    pub fn new(
        private_key: impl Into<String>,
        resources: Arc<dyn ResourceService>,
    ) -> SdkResult<Self> {
        let private_key = private_key.into();
        if !is_private_key(&private_key) {
            return Err(report!(SdkError::InvalidKey));
        }
        Ok(Self {
            private_key: Secret::new(private_key),
            environment: Environment::default(),
            locale: None,
            resources: Arc::clone(&resources),
            cancel_service: CancelService::new(resources),
        })
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Locale forwarded to the gateway for customer-facing messages,
    /// e.g. `de-DE`.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// The key as sent in the auth header. Kept behind [`Secret`] so it
    /// never leaks through `Debug` output.
    pub fn private_key(&self) -> &str {
        self.private_key.expose_secret()
    }

    /// Versioned API root for the selected environment.
    pub fn api_endpoint(&self) -> String {
        format!("{}{API_VERSION}", self.environment.base_url())
    }

    pub fn cancel_service(&self) -> &CancelService {
        &self.cancel_service
    }

    /// Places a hold and wraps it in a fresh payment aggregate.
    #[tracing::instrument(skip(self), fields(currency = %request.currency))]
    pub fn authorize(&self, request: AuthorizeRequest) -> SdkResult<Payment> {
        let mut authorization = Authorization::new(request.amount)
            .with_currency(request.currency);
        if let Some(return_url) = request.return_url {
            authorization = authorization.with_return_url(return_url);
        }
        if let Some(type_id) = request.payment_type_id {
            authorization = authorization.with_type_id(type_id);
        }

        let created = self.resources.create_authorization(&authorization)?;

        let mut payment = Payment::new();
        if let Some(payment_id) = created.payment_id() {
            payment.set_id(payment_id);
        }
        payment
            .amount_mut()
            .set_total(created.amount().unwrap_or(request.amount));
        payment.set_authorization(created);
        Ok(payment)
    }

    /// Settles funds directly and wraps the charge in a fresh payment
    /// aggregate.
    #[tracing::instrument(skip(self), fields(currency = %request.currency))]
    pub fn charge(&self, request: ChargeRequest) -> SdkResult<Payment> {
        let mut charge = Charge::new(Some(request.amount)).with_currency(request.currency);
        if let Some(return_url) = request.return_url {
            charge = charge.with_return_url(return_url);
        }
        if let Some(type_id) = request.payment_type_id {
            charge = charge.with_type_id(type_id);
        }

        let created = self.resources.create_charge(&charge)?;

        let mut payment = Payment::new();
        if let Some(payment_id) = created.payment_id() {
            payment.set_id(payment_id);
        }
        let settled = created.amount().unwrap_or(request.amount);
        payment.amount_mut().set_total(settled);
        payment.amount_mut().record_charged(settled);
        payment.add_charge(created);
        Ok(payment)
    }

    /// Settles `amount` of the payment's authorization (all of it when
    /// `None`) and records the new charge on the aggregate.
    #[tracing::instrument(skip(self, payment), fields(payment_id = payment.id()))]
    pub fn charge_authorization(
        &self,
        payment: &mut Payment,
        amount: Option<MajorUnit>,
    ) -> SdkResult<Charge> {
        let mut charge = Charge::new(amount);
        charge.set_payment_id(payment.id().map(str::to_owned));

        let created = self.resources.create_charge(&charge)?;
        payment
            .amount_mut()
            .record_charged(created.amount().unwrap_or_default());
        payment.add_charge(created.clone());
        Ok(created)
    }

    pub fn fetch_payment(&self, payment_id: &str) -> SdkResult<Payment> {
        self.resources.fetch_payment(payment_id)
    }

    /// Pushes locally changed payment metadata to the gateway.
    pub fn update_payment(&self, payment: &Payment) -> SdkResult<Payment> {
        self.resources.update_payment(payment)
    }

    pub fn cancel_authorization(
        &self,
        authorization: &mut Authorization,
        amount: Option<MajorUnit>,
    ) -> SdkResult<Cancellation> {
        self.cancel_service.cancel_authorization(authorization, amount)
    }

    pub fn cancel_charge(
        &self,
        charge: &mut Charge,
        amount: Option<MajorUnit>,
        options: &CancelOptions,
    ) -> SdkResult<Cancellation> {
        self.cancel_service.cancel_charge(charge, amount, options)
    }

    pub fn cancel_payment(
        &self,
        payment: &mut Payment,
        amount: Option<MajorUnit>,
        options: &CancelOptions,
    ) -> SdkResult<Vec<Cancellation>> {
        self.cancel_service.cancel_payment(payment, amount, options)
    }

    pub fn cancel_payment_by_id(
        &self,
        payment_id: &str,
        amount: Option<MajorUnit>,
        options: &CancelOptions,
    ) -> SdkResult<Vec<Cancellation>> {
        self.cancel_service
            .cancel_payment_by_id(payment_id, amount, options)
    }
}

/// Private keys look like `s-priv-…` (sandbox) or `p-priv-…` (live).
/// Anything else, public keys included, must never reach the server
/// side of an integration.
fn is_private_key(key: &str) -> bool {
    let Some(rest) = key
        .strip_prefix("s-priv-")
        .or_else(|| key.strip_prefix("p-priv-"))
    else {
        return false;
    };
    !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::services::resource_service::MockResourceService;

    fn amount(s: &str) -> MajorUnit {
        s.parse().unwrap()
    }

    fn client(resources: MockResourceService) -> MgwClient {
        MgwClient::new("s-priv-abc123", Arc::new(resources)).unwrap()
    }

    #[test]
    fn rejects_anything_but_a_private_key() {
        for key in [
            "s-pub-abc123",
            "p-pub-abc123",
            "priv-abc123",
            "s-priv-",
            "s-priv-abc 123",
            "",
        ] {
            let error = MgwClient::new(key, Arc::new(MockResourceService::new())).unwrap_err();
            assert!(
                matches!(error.current_context(), SdkError::InvalidKey),
                "key {key:?} should be rejected"
            );
        }
        assert!(MgwClient::new("p-priv-xyz9", Arc::new(MockResourceService::new())).is_ok());
    }

    #[test]
    fn environment_selects_the_endpoint() {
        let sandbox = client(MockResourceService::new());
        assert_eq!(sandbox.environment(), Environment::Sandbox);
        assert_eq!(sandbox.api_endpoint(), "https://sbx-api.mgw.example.com/v1");

        let live = client(MockResourceService::new()).with_environment(Environment::Live);
        assert_eq!(live.api_endpoint(), "https://api.mgw.example.com/v1");
    }

    #[test]
    fn authorize_builds_the_payment_aggregate() {
        let mut resources = MockResourceService::new();
        resources
            .expect_create_authorization()
            .withf(|authorization| {
                authorization.amount() == Some("100.0".parse().unwrap())
                    && authorization.currency() == Some("EUR")
            })
            .times(1)
            .returning(|authorization| {
                let mut created = authorization.clone().with_id("s-aut-1");
                created.set_payment_id(Some("s-pay-1".into()));
                Ok(created)
            });

        let payment = client(resources)
            .authorize(AuthorizeRequest::new(amount("100.0"), "EUR"))
            .unwrap();

        assert_eq!(payment.id(), Some("s-pay-1"));
        assert_eq!(payment.amount().total(), Some(amount("100.0")));
        assert_eq!(payment.amount().remaining(), Some(amount("100.0")));
        assert_eq!(payment.authorization().unwrap().id(), Some("s-aut-1"));
        assert_eq!(payment.authorization().unwrap().payment_id(), Some("s-pay-1"));
    }

    #[test]
    fn direct_charge_records_the_settled_amount() {
        let mut resources = MockResourceService::new();
        resources
            .expect_create_charge()
            .times(1)
            .returning(|charge| {
                let mut created = charge.clone().with_id("s-chg-1");
                created.set_payment_id(Some("s-pay-1".into()));
                Ok(created)
            });

        let payment = client(resources)
            .charge(ChargeRequest::new(amount("42.5"), "EUR"))
            .unwrap();

        assert_eq!(payment.charges().len(), 1);
        assert_eq!(payment.amount().charged(), amount("42.5"));
        assert_eq!(payment.amount().remaining(), Some(MajorUnit::ZERO));
    }

    #[test]
    fn charging_an_authorization_appends_to_the_payment() {
        let mut resources = MockResourceService::new();
        resources
            .expect_create_charge()
            .withf(|charge| charge.payment_id() == Some("s-pay-1"))
            .times(1)
            .returning(|charge| Ok(charge.clone().with_id("s-chg-1")));

        let mut payment = Payment::new().with_id("s-pay-1");
        payment.amount_mut().set_total(amount("100.0"));
        payment.set_authorization(Authorization::new(amount("100.0")).with_id("s-aut-1"));

        let charge = client(resources)
            .charge_authorization(&mut payment, Some(amount("60.0")))
            .unwrap();

        assert_eq!(charge.id(), Some("s-chg-1"));
        assert_eq!(payment.charges().len(), 1);
        assert_eq!(payment.amount().charged(), amount("60.0"));
        assert_eq!(payment.amount().remaining(), Some(amount("40.0")));
    }

    #[test]
    fn cancel_wrappers_delegate_to_the_cancel_service() {
        let mut resources = MockResourceService::new();
        resources
            .expect_create_cancellation()
            .times(1)
            .returning(|_, request| Ok(request.clone().with_id("s-cnl-1")));

        let mut payment = Payment::new().with_id("s-pay-1");
        payment.amount_mut().set_total(amount("10.0"));
        payment.set_authorization(Authorization::new(amount("10.0")).with_id("s-aut-1"));

        let cancellations = client(resources)
            .cancel_payment(&mut payment, None, &CancelOptions::default())
            .unwrap();
        assert_eq!(cancellations.len(), 1);
    }
}
