//! Error types for order update delivery.

use thiserror::Error;

/// Ways the update-wake-order call can fail.
///
/// Only ever logged by the poller; nothing retries on these.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeliveryError {
    /// The request never got a response (connect, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-2xx status.
    #[error("Endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A response that claimed to be JSON but was not.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The delivery task ended without producing a result.
    #[error("Delivery aborted: {0}")]
    Aborted(String),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> Self {
        DeliveryError::Transport(e.to_string())
    }
}
