//! # Mock Notifier
//!
//! Stand-in for [`HttpNotifier`](crate::notifier::HttpNotifier) in tests.
//!
//! Queue responses with [`MockNotifier::expect_notify`], hand the mock to the
//! connector, then inspect [`MockNotifier::requests`] and call
//! [`MockNotifier::verify`] to make sure every queued response was consumed.
//!
//! ```ignore
//! let mock = Arc::new(MockNotifier::new());
//! mock.expect_notify().return_ok(json!({ "status": "ok" }));
//! mock.expect_notify().return_err(DeliveryError::Transport("refused".into()));
//!
//! let connector = WakeOrderConnector::new(config, source, mock.clone());
//! // ...
//! mock.verify();
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::model::NotificationRequest;
use crate::notifier::{DeliveryError, Notifier};

/// A queued response, optionally held back for a while to simulate latency.
struct Expectation {
    response: Result<Value, DeliveryError>,
    latency: Option<Duration>,
}

/// A notifier that answers from a queue of expectations and records requests.
///
/// Panics on a request with nothing queued, the same way an unexpected
/// message would fail a mocked client.
#[derive(Default)]
pub struct MockNotifier {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Arc<Mutex<Vec<NotificationRequest>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the response for the next `notify` call.
    pub fn expect_notify(&self) -> NotifyExpectationBuilder {
        NotifyExpectationBuilder {
            expectations: self.expectations.clone(),
            latency: None,
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<NotificationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, request: NotificationRequest) -> Result<Value, DeliveryError> {
        self.requests.lock().unwrap().push(request);

        let expectation = self.expectations.lock().unwrap().pop_front();
        let Some(expectation) = expectation else {
            panic!("Unexpected notify call: no response queued");
        };

        if let Some(latency) = expectation.latency {
            tokio::time::sleep(latency).await;
        }
        expectation.response
    }
}

/// Builder for `notify` expectations.
pub struct NotifyExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    latency: Option<Duration>,
}

impl NotifyExpectationBuilder {
    /// Delays the response by `latency` once the request arrives.
    pub fn after(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, body: Value) {
        self.push(Ok(body));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: DeliveryError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, DeliveryError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            response,
            latency: self.latency,
        });
    }
}
