//! # Observability & Tracing
//!
//! Every transition of a polling loop and every delivery outcome is a `tracing`
//! event with structured fields:
//!
//! - **debug**: each check, each reason a cart was not ready, each scheduled retry,
//!   abandonment after the ceiling
//! - **info**: trigger fired, cart ready (with `wake_cart_id` / `wake_order`),
//!   backend response
//! - **warn**: cart state that could not be read, failed order updates
//!
//! Loops run inside a `poll` span carrying their trigger, so output from the
//! DOM-ready loop and the window-load loop can be told apart:
//!
//! ```text
//! INFO  DOM loaded, waiting for cart trigger=dom_ready
//! DEBUG poll: Checking cart trigger=dom_ready attempt=1 max_attempts=20
//! DEBUG poll: Cart not ready readiness=NoMetadata trigger=dom_ready
//! DEBUG poll: Checking cart trigger=dom_ready attempt=2 max_attempts=20
//! INFO  poll: Cart ready trigger=dom_ready attempt=2 wake_cart_id=CART456 wake_order=ORD123
//! INFO  poll: Order updated trigger=dom_ready response={"ok":true}
//! ```
//!
//! ## Debug toggle
//!
//! `RUST_LOG` wins when it is set. Otherwise the `debug` configuration flag
//! picks the filter: `wake_order=debug` when on, nothing at all when off.
//!
//! ```bash
//! RUST_LOG=wake_order=info wake-order cart.json
//! WAKE_ORDER__DEBUG=false wake-order cart.json   # silent
//! ```

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "wake_order=debug"
    } else {
        "off"
    }
}

pub fn setup_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
