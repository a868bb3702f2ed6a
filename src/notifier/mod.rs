//! Delivery of the connector token / order id pairing to the backend.
//!
//! - [`Notifier`]: the port the poller dispatches through
//! - [`HttpNotifier`]: the real client, one JSON POST per request
//! - [`mock::MockNotifier`]: an expectation-driven stand-in for tests

pub mod error;
pub mod http;
pub mod mock;

pub use error::*;
pub use http::*;

use async_trait::async_trait;
use serde_json::Value;

use crate::model::NotificationRequest;

/// Sends one notification and yields the backend's response body.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, request: NotificationRequest) -> Result<Value, DeliveryError>;
}

/// What became of a dispatched notification.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryReport {
    Delivered(Value),
    Failed(DeliveryError),
}

impl DeliveryReport {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryReport::Delivered(_))
    }
}

impl From<Result<Value, DeliveryError>> for DeliveryReport {
    fn from(result: Result<Value, DeliveryError>) -> Self {
        match result {
            Ok(body) => DeliveryReport::Delivered(body),
            Err(e) => DeliveryReport::Failed(e),
        }
    }
}
