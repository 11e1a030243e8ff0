//! Cancellation orchestration: decides how much to cancel from which
//! transaction, in what order, and which gateway rejections to absorb.

use std::sync::Arc;

use error_stack::{report, Report};

use super::resource_service::ResourceService;
use crate::{
    consts::{
        AUTHORIZATION_CANCEL_IGNORABLE, CHARGE_CANCEL_IGNORABLE, LEGACY_SWEEP_IGNORABLE,
    },
    errors::{ApiErrorResponse, SdkError, SdkResult},
    resources::{Authorization, Cancellation, Charge, Payment},
    types::{CancelReasonCode, MajorUnit},
};

/// Optional fields carried by a charge cancellation. The net/vat split
/// applies to installment style charges only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CancelOptions {
    pub reason_code: Option<CancelReasonCode>,
    pub payment_reference: Option<String>,
    pub amount_net: Option<MajorUnit>,
    pub amount_vat: Option<MajorUnit>,
}

/// Stateless orchestrator for the cancel/refund allocation algorithm.
///
/// The sweep is a plain sequential loop with a mutable remaining-budget
/// variable: later requests depend on how much earlier ones actually
/// cancelled, so nothing here is issued in parallel. Cancellation is not
/// transactional across transactions — when a later step fails, earlier
/// cancellations stay in effect remotely.
pub struct CancelService {
    resources: Arc<dyn ResourceService>,
}

impl CancelService {
    pub fn new(resources: Arc<dyn ResourceService>) -> Self {
        Self { resources }
    }

    /// Cancels `amount` on the authorization (all of it when `None`),
    /// propagating every gateway error unclassified.
    pub fn cancel_authorization(
        &self,
        authorization: &mut Authorization,
        amount: Option<MajorUnit>,
    ) -> SdkResult<Cancellation> {
        authorization.cancel(self.resources.as_ref(), amount)
    }

    /// Cancels the authorization of the given payment.
    pub fn cancel_authorization_by_payment(
        &self,
        payment: &mut Payment,
        amount: Option<MajorUnit>,
    ) -> SdkResult<Cancellation> {
        let cancellation = payment
            .authorization_mut()
            .ok_or_else(|| report!(SdkError::MissingResource {
                name: "authorization",
            }))?
            .cancel(self.resources.as_ref(), amount)?;
        payment
            .amount_mut()
            .record_canceled(cancellation.amount().unwrap_or_default());
        Ok(cancellation)
    }

    /// Fetches the payment, then cancels its authorization.
    pub fn cancel_authorization_by_payment_id(
        &self,
        payment_id: &str,
        amount: Option<MajorUnit>,
    ) -> SdkResult<Cancellation> {
        let mut payment = self.resources.fetch_payment(payment_id)?;
        self.cancel_authorization_by_payment(&mut payment, amount)
    }

    /// Refunds `amount` of the given charge (all of it when `None`),
    /// propagating every gateway error unclassified.
    pub fn cancel_charge(
        &self,
        charge: &mut Charge,
        amount: Option<MajorUnit>,
        options: &CancelOptions,
    ) -> SdkResult<Cancellation> {
        charge.cancel(self.resources.as_ref(), amount, options)
    }

    /// Refunds a charge addressed by id within the given payment.
    pub fn cancel_charge_by_id(
        &self,
        payment: &mut Payment,
        charge_id: &str,
        amount: Option<MajorUnit>,
        options: &CancelOptions,
    ) -> SdkResult<Cancellation> {
        let cancellation = payment
            .charge_mut(charge_id)
            .ok_or_else(|| report!(SdkError::MissingResource { name: "charge" }))?
            .cancel(self.resources.as_ref(), amount, options)?;
        payment
            .amount_mut()
            .record_canceled(cancellation.amount().unwrap_or_default());
        Ok(cancellation)
    }

    /// Fetches the payment, then refunds the addressed charge.
    pub fn cancel_charge_by_payment_id(
        &self,
        payment_id: &str,
        charge_id: &str,
        amount: Option<MajorUnit>,
        options: &CancelOptions,
    ) -> SdkResult<Cancellation> {
        let mut payment = self.resources.fetch_payment(payment_id)?;
        self.cancel_charge_by_id(&mut payment, charge_id, amount, options)
    }

    /// Cancels `amount` across the whole payment; `None` cancels
    /// everything remaining. The authorization is drained first, then
    /// the charges in creation order, each capped at its own remaining
    /// amount and at whatever budget is left. Gateway codes meaning
    /// "already in the target state" skip the affected transaction;
    /// any other error aborts the sweep immediately and propagates.
    #[tracing::instrument(skip_all, fields(payment_id = payment.id(), amount = amount.map(tracing::field::display)))]
    pub fn cancel_payment(
        &self,
        payment: &mut Payment,
        amount: Option<MajorUnit>,
        options: &CancelOptions,
    ) -> SdkResult<Vec<Cancellation>> {
        if payment.authorization().is_none() && payment.charges().is_empty() {
            return Err(report!(SdkError::PaymentNotCancellable));
        }

        let mut cancellations = Vec::new();
        // None = unbounded: cancel everything remaining.
        let mut budget = amount;

        if let Some(cancellation) = self.cancel_payment_authorization(payment, budget)? {
            if let Some(left) = budget {
                budget = Some(left.saturating_sub(cancellation.amount().unwrap_or_default()));
            }
            cancellations.push(cancellation);
        }
        if budget.is_some_and(|left| left.is_zero()) {
            // The authorization alone satisfied the request.
            return Ok(cancellations);
        }

        let options = CancelOptions {
            reason_code: options.reason_code.or(Some(CancelReasonCode::default())),
            ..options.clone()
        };
        for index in 0..payment.charges().len() {
            let Some(charge) = payment.charges_mut().get_mut(index) else {
                break;
            };
            let remaining = charge.remaining();
            if remaining == Some(MajorUnit::ZERO) {
                continue;
            }
            // A charge with unknown remaining is attempted with the full
            // budget; the gateway settles on the exact figure.
            let charge_budget =
                budget.map(|left| remaining.map_or(left, |open| left.min(open)));

            match charge.cancel(self.resources.as_ref(), charge_budget, &options) {
                Ok(cancellation) => {
                    let cancelled = cancellation.amount().unwrap_or_default();
                    payment.amount_mut().record_canceled(cancelled);
                    cancellations.push(cancellation);
                    if let Some(left) = budget {
                        let left = left.saturating_sub(cancelled);
                        if left.is_zero() {
                            break;
                        }
                        budget = Some(left);
                    }
                }
                Err(error) if is_ignorable(&error, CHARGE_CANCEL_IGNORABLE) => {
                    tracing::debug!(
                        charge_id = charge_id_at(payment, index),
                        code = error.current_context().api_code(),
                        "charge already in target state, skipping"
                    );
                }
                Err(error) => return Err(error),
            }
        }

        Ok(cancellations)
    }

    /// Fetches the payment, then cancels across it.
    pub fn cancel_payment_by_id(
        &self,
        payment_id: &str,
        amount: Option<MajorUnit>,
        options: &CancelOptions,
    ) -> SdkResult<Vec<Cancellation>> {
        let mut payment = self.resources.fetch_payment(payment_id)?;
        self.cancel_payment(&mut payment, amount, options)
    }

    /// Cancels the given amount of the payment's authorization, capped
    /// at the payment's remaining amount. Returns `None` without any
    /// remote call when there is nothing left to cancel, and absorbs
    /// gateway codes meaning the hold is already released or consumed.
    pub fn cancel_payment_authorization(
        &self,
        payment: &mut Payment,
        amount: Option<MajorUnit>,
    ) -> SdkResult<Option<Cancellation>> {
        if payment.amount().remaining() == Some(MajorUnit::ZERO) {
            return Ok(None);
        }
        let effective = match amount {
            None => None,
            Some(requested) => {
                let capped = payment
                    .amount()
                    .remaining()
                    .map_or(requested, |remaining| requested.min(remaining));
                if capped.is_zero() {
                    return Ok(None);
                }
                Some(capped)
            }
        };
        let Some(authorization) = payment.authorization_mut() else {
            return Ok(None);
        };

        match authorization.cancel(self.resources.as_ref(), effective) {
            Ok(cancellation) => {
                payment
                    .amount_mut()
                    .record_canceled(cancellation.amount().unwrap_or_default());
                Ok(Some(cancellation))
            }
            Err(error) if is_ignorable(&error, AUTHORIZATION_CANCEL_IGNORABLE) => {
                tracing::debug!(
                    code = error.current_context().api_code(),
                    "authorization already in target state, skipping"
                );
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Legacy sweep: unconditionally cancels every charge in full. Only
    /// the already-charged-back code is tolerated; it is collected and
    /// returned alongside the successes instead of being dropped. Any
    /// other error short-circuits the sweep.
    #[deprecated(note = "use `cancel_payment`, which allocates across the whole payment")]
    pub fn cancel_all_charges(
        &self,
        payment: &mut Payment,
    ) -> SdkResult<(Vec<Cancellation>, Vec<ApiErrorResponse>)> {
        let mut cancellations = Vec::new();
        let mut ignored = Vec::new();
        let options = CancelOptions::default();

        for index in 0..payment.charges().len() {
            let Some(charge) = payment.charges_mut().get_mut(index) else {
                break;
            };
            match charge.cancel(self.resources.as_ref(), None, &options) {
                Ok(cancellation) => {
                    payment
                        .amount_mut()
                        .record_canceled(cancellation.amount().unwrap_or_default());
                    cancellations.push(cancellation);
                }
                Err(error) if is_ignorable(&error, LEGACY_SWEEP_IGNORABLE) => {
                    if let Some(response) = error.current_context().api_response() {
                        ignored.push(response.clone());
                    }
                }
                Err(error) => return Err(error),
            }
        }

        Ok((cancellations, ignored))
    }
}

/// A remote error is ignorable when its response code is in the allowed
/// set for the call site; everything else, local errors included, is
/// fatal.
fn is_ignorable(error: &Report<SdkError>, allowed: &[&str]) -> bool {
    error
        .current_context()
        .api_code()
        .is_some_and(|code| allowed.contains(&code))
}

fn charge_id_at(payment: &Payment, index: usize) -> Option<&str> {
    payment.charges().get(index).and_then(Charge::id)
}
