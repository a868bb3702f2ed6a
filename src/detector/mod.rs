//! Readiness detection over the host cart state.
//!
//! The host populates its cart asynchronously and not atomically, so each
//! required field is checked on its own. Checks run in a fixed order and stop
//! at the first one that fails:
//!
//! 1. the cart namespace exists,
//! 2. the cart exposes its metadata container,
//! 3. the metadata holds a truthy connector token,
//! 4. the cart holds a truthy order id.
//!
//! Nothing here can fail. A source error or an oddly shaped snapshot is just
//! "not ready".

pub mod error;
pub mod source;

pub use error::*;
pub use source::*;

use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{CartSnapshot, NotificationRequest};

/// Verdict of a single readiness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    NoCart,
    NoMetadata,
    MissingConnector,
    MissingOrderId,
    Ready,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Host-side truthiness: `null`, `false`, `0` and `""` count as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn present(value: Option<&Value>) -> bool {
    value.map(is_truthy).unwrap_or(false)
}

/// Runs the four checks and reports the first one that failed.
pub fn assess(snapshot: &CartSnapshot) -> Readiness {
    if !present(snapshot.cart()) {
        return Readiness::NoCart;
    }
    if !present(snapshot.metadata()) {
        return Readiness::NoMetadata;
    }
    if !present(snapshot.connector_token()) {
        debug!(metadata = ?snapshot.metadata(), "Metadata found, but no connector token");
        return Readiness::MissingConnector;
    }
    if !present(snapshot.order_id()) {
        debug!("Cart found, but no order id");
        return Readiness::MissingOrderId;
    }
    Readiness::Ready
}

pub fn is_ready(snapshot: &CartSnapshot) -> bool {
    assess(snapshot).is_ready()
}

/// Reads the snapshot from `source` and checks it, absorbing read failures.
///
/// Yields the snapshot only when it is ready, so identifiers are extracted
/// from the same state that was judged ready.
pub fn check(source: &dyn CartSource) -> Option<CartSnapshot> {
    let snapshot = match source.read() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "Failed to read cart state");
            return None;
        }
    };
    match assess(&snapshot) {
        Readiness::Ready => Some(snapshot),
        readiness => {
            debug!(?readiness, "Cart not ready");
            None
        }
    }
}

/// Pulls the identifier pair out of a snapshot already judged ready.
///
/// No re-validation happens here; a field that vanished is carried as `null`.
pub fn extract_identifiers(snapshot: &CartSnapshot) -> NotificationRequest {
    let connector_token = snapshot.connector_token().cloned().unwrap_or(Value::Null);
    let order_id = snapshot.order_id().cloned().unwrap_or(Value::Null);
    NotificationRequest::new(connector_token, order_id)
}
