//! Orchestration layer between the resource model and the gateway.

pub mod cancel_service;
pub mod resource_service;

pub use cancel_service::{CancelOptions, CancelService};
pub use resource_service::{CancellationParent, ResourceService};
