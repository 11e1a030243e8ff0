//! Transaction resources a payment is composed of.

pub mod authorization;
pub mod cancellation;
pub mod charge;

pub use authorization::Authorization;
pub use cancellation::Cancellation;
pub use charge::Charge;
