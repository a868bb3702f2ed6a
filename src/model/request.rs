use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An identifier read from the host cart, kept exactly as the host typed it.
///
/// Order ids show up as strings on some storefronts and as numbers on others;
/// the backend receives whichever one the page had.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(Value);

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<Value> for Identifier {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self(Value::String(value))
    }
}

impl From<u64> for Identifier {
    fn from(value: u64) -> Self {
        Self(Value::from(value))
    }
}

/// Body of the update-wake-order call.
///
/// Built once the cart is ready and handed to the notifier by value. Field
/// order is the wire order: `{"wake_cart_id":...,"wake_order":...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationRequest {
    wake_cart_id: Identifier,
    wake_order: Identifier,
}

impl NotificationRequest {
    pub fn new(connector_token: impl Into<Identifier>, order_id: impl Into<Identifier>) -> Self {
        Self {
            wake_cart_id: connector_token.into(),
            wake_order: order_id.into(),
        }
    }

    pub fn connector_token(&self) -> &Identifier {
        &self.wake_cart_id
    }

    pub fn order_id(&self) -> &Identifier {
        &self.wake_order
    }
}
