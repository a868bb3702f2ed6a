use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level cart namespace published by the host page.
pub const CART_KEY: &str = "Carrinho";
/// Metadata container nested under the cart.
pub const METADATA_KEY: &str = "Metadados";
/// Connector token field inside the metadata container.
pub const CONNECTOR_KEY: &str = "conector_benova";
/// Order id field on the cart itself.
pub const ORDER_ID_KEY: &str = "PedidoId";

/// Read-only copy of the host page's cart state.
///
/// The host owns the shape and decides when it gets populated, so the snapshot
/// is kept as raw JSON. The accessors below never fail: a missing key or a
/// value of the wrong type simply yields `None`.
///
/// ```text
/// { "Carrinho": { "PedidoId": <id>, "Metadados": { "conector_benova": <token> } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartSnapshot(Value);

impl CartSnapshot {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// A snapshot of a page where the cart runtime has not loaded yet.
    pub fn empty() -> Self {
        Self(Value::Null)
    }

    pub fn cart(&self) -> Option<&Value> {
        self.0.get(CART_KEY)
    }

    pub fn metadata(&self) -> Option<&Value> {
        self.cart()?.get(METADATA_KEY)
    }

    pub fn connector_token(&self) -> Option<&Value> {
        self.metadata()?.get(CONNECTOR_KEY)
    }

    pub fn order_id(&self) -> Option<&Value> {
        self.cart()?.get(ORDER_ID_KEY)
    }
}

impl From<Value> for CartSnapshot {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_follow_the_nested_path() {
        let snapshot = CartSnapshot::new(json!({
            "Carrinho": { "PedidoId": 42, "Metadados": { "conector_benova": "abc" } }
        }));

        assert_eq!(snapshot.order_id(), Some(&json!(42)));
        assert_eq!(snapshot.connector_token(), Some(&json!("abc")));
    }

    #[test]
    fn accessors_tolerate_wrong_types() {
        let snapshot = CartSnapshot::new(json!({ "Carrinho": ["not", "an", "object"] }));

        assert!(snapshot.cart().is_some());
        assert!(snapshot.metadata().is_none());
        assert!(snapshot.order_id().is_none());
        assert!(CartSnapshot::empty().connector_token().is_none());
    }
}
