//! Resource model of the gateway API.

pub mod amount;
pub mod payment;
pub mod transaction_types;

pub use amount::Amount;
pub use payment::Payment;
pub use transaction_types::{Authorization, Cancellation, Charge};
