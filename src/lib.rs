//! # wake-order
//!
//! > **Report a storefront cart's connector token and order id to the order-tracking API.**
//!
//! A host storefront fills in its cart object some time after the page starts
//! loading. This crate waits for the two identifiers it needs to appear, then
//! posts them to the backend once per trigger:
//!
//! ```text
//! { "Carrinho": { "PedidoId": "ORD123", "Metadados": { "conector_benova": "CART456" } } }
//!
//! POST <api_url>
//! {"wake_cart_id":"CART456","wake_order":"ORD123"}
//! ```
//!
//! ## Design
//!
//! ### 1. The host state is injected
//! The cart belongs to the host and changes behind our back. Readers implement
//! [`CartSource`](detector::CartSource) and only ever read, so tests can feed
//! fabricated snapshots instead of a real page.
//!
//! ### 2. Polling is an explicit state machine
//! [`PollLoop`](poller::PollLoop) holds the transitions
//! (`Idle → Checking → Ready/NotReady → Scheduled → ... → Dispatched/Abandoned`)
//! and knows nothing about time. [`PollingDriver`](poller::PollingDriver) runs it
//! against a [`Scheduler`](poller::Scheduler), which tests swap for a virtual clock.
//!
//! ### 3. Delivery is fire-and-forget
//! Once the cart is ready the loop spawns the notification and ends. The result
//! is logged and available for observation, but never retried or escalated.
//!
//! ### 4. Triggers are independent
//! DOM-ready and window-load each start their own loop with their own counter.
//! Both may dispatch; see [`WakeOrderConnector`](lifecycle::WakeOrderConnector).
//!
//! ## Module Tour
//!
//! - [`model`]: snapshot, identifiers, request body, triggers
//! - [`detector`]: readiness checks and cart sources
//! - [`notifier`]: the HTTP notifier and its mock
//! - [`poller`]: state machine, schedulers, driver
//! - [`lifecycle`]: the connector entry point and tracing setup
//! - [`settings`]: layered configuration
//!
//! ## Running
//!
//! ```bash
//! wake-order cart.json --config wake-order.toml
//! RUST_LOG=wake_order=debug wake-order cart.json
//! ```

pub mod detector;
pub mod lifecycle;
pub mod model;
pub mod notifier;
pub mod poller;
pub mod settings;
