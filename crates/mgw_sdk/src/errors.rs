//! Error types shared across the SDK.

use serde::{Deserialize, Serialize};

/// Result with the error variant wrapped in an [`error_stack::Report`],
/// so call sites can attach context as errors bubble up.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Result alias used throughout the SDK surface.
pub type SdkResult<T> = CustomResult<T, SdkError>;

/// Machine readable error payload the gateway returns on non-2xx
/// responses. The `code` is the only field the SDK dispatches on;
/// the messages are passthrough diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Gateway response code, e.g. `API.340.100.014`.
    pub code: String,
    /// Message intended for the merchant's logs.
    pub merchant_message: String,
    /// Message safe to display to the end customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_message: Option<String>,
}

impl ApiErrorResponse {
    pub fn new(code: impl Into<String>, merchant_message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            merchant_message: merchant_message.into(),
            customer_message: None,
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ code: {}, message: {} }}",
            self.code, self.merchant_message
        )
    }
}

/// The two error kinds of the SDK: remote API errors carrying a gateway
/// response code, and local logic errors raised before any network call.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// The gateway rejected a request. Call sites classify the response
    /// code against the ignorable sets in [`crate::consts`]; anything
    /// they do not recognize is fatal and propagates unchanged.
    #[error("gateway error {0}")]
    Api(ApiErrorResponse),

    /// The payment has neither an authorization nor any charge, so there
    /// is nothing a cancellation could apply to.
    #[error("This Payment could not be cancelled.")]
    PaymentNotCancellable,

    /// The aggregate does not contain the addressed sub-resource.
    #[error("the payment does not contain a {name} to act on")]
    MissingResource { name: &'static str },

    /// The configured key is not a private key.
    #[error("Illegal key: use a valid private key for server side calls.")]
    InvalidKey,
}

impl SdkError {
    /// Gateway response code, if this is a remote error.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api(response) => Some(response.code.as_str()),
            _ => None,
        }
    }

    /// The full gateway payload, if this is a remote error.
    pub fn api_response(&self) -> Option<&ApiErrorResponse> {
        match self {
            Self::Api(response) => Some(response),
            _ => None,
        }
    }
}
