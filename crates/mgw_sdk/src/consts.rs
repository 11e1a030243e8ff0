//! SDK wide constants: endpoints, version strings and gateway response codes.

/// Base URL of the sandbox gateway.
pub const URL_SANDBOX: &str = "https://sbx-api.mgw.example.com/";
/// Base URL of the live gateway.
pub const URL_LIVE: &str = "https://api.mgw.example.com/";
/// Version segment appended to the base URL.
pub const API_VERSION: &str = "v1";
/// Identifier this SDK sends along with every request.
pub const SDK_VERSION: &str = concat!("MgwRustSdk ", env!("CARGO_PKG_VERSION"));

/// The target was already cancelled when the cancel request arrived.
pub const API_ERROR_ALREADY_CANCELLED: &str = "API.340.100.014";
/// The target was already charged in full.
pub const API_ERROR_ALREADY_CHARGED: &str = "API.340.100.018";
/// The target was already charged back.
pub const API_ERROR_ALREADY_CHARGED_BACK: &str = "API.340.540.108";
/// The charged amount exceeded the authorized amount.
pub const API_ERROR_CHARGED_AMOUNT_HIGHER_THAN_EXPECTED: &str = "API.340.100.024";

/// Codes absorbed when cancelling an authorization: the hold is already
/// released or consumed, so there is nothing left to reverse.
pub const AUTHORIZATION_CANCEL_IGNORABLE: &[&str] =
    &[API_ERROR_ALREADY_CANCELLED, API_ERROR_ALREADY_CHARGED];

/// Codes absorbed while sweeping charges during a payment-level cancel.
pub const CHARGE_CANCEL_IGNORABLE: &[&str] = &[
    API_ERROR_ALREADY_CANCELLED,
    API_ERROR_ALREADY_CHARGED,
    API_ERROR_ALREADY_CHARGED_BACK,
];

/// The single code the legacy all-charges sweep tolerates.
pub const LEGACY_SWEEP_IGNORABLE: &[&str] = &[API_ERROR_ALREADY_CHARGED_BACK];
