//! Client SDK for the merchant gateway payments API.
//!
//! The aggregate root is a [`Payment`] holding at most one
//! [`Authorization`] and an ordered list of [`Charge`]s. All remote
//! traffic goes through the [`ResourceService`] collaborator;
//! [`CancelService`] allocates cancel/refund requests across a
//! payment's transactions, and [`MgwClient`] ties the two together
//! behind the merchant's private key.
//!
//! ```no_run
//! use std::sync::Arc;
//! use mgw_sdk::{CancelOptions, MgwClient, ResourceService};
//!
//! fn refund(resources: Arc<dyn ResourceService>) -> mgw_sdk::SdkResult<()> {
//!     let client = MgwClient::new("s-priv-example", resources)?;
//!     let cancellations = client.cancel_payment_by_id(
//!         "s-pay-1",
//!         Some("12.30".parse().expect("literal")),
//!         &CancelOptions::default(),
//!     )?;
//!     for cancellation in cancellations {
//!         println!("cancelled {:?}", cancellation.amount());
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod consts;
pub mod errors;
pub mod resources;
pub mod services;
pub mod types;

pub use client::{AuthorizeRequest, ChargeRequest, Environment, MgwClient};
pub use errors::{ApiErrorResponse, CustomResult, SdkError, SdkResult};
pub use resources::{Amount, Authorization, Cancellation, Charge, Payment};
pub use services::{CancelOptions, CancelService, CancellationParent, ResourceService};
pub use types::{CancelReasonCode, MajorUnit};
