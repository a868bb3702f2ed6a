//! # Page Lifecycle & Orchestration
//!
//! The host page fires up to two lifecycle events, DOM-ready and window-load,
//! in no guaranteed order and possibly not at all. Each one calls the same
//! entry point, [`WakeOrderConnector::on_trigger`], which starts its own
//! polling loop.
//!
//! ```text
//!  DOM-ready ───► on_trigger ──► PollingDriver ──► Notifier ──► POST
//! window-load ──► on_trigger ──► PollingDriver ──► Notifier ──► POST
//! ```
//!
//! The connector owns nothing mutable: it hands every loop clones of the same
//! read-only cart source, notifier and scheduler. Loops cannot be cancelled;
//! each one ends as `Dispatched` or `Abandoned`.
//!
//! [`setup_tracing`] installs the log sink; see the [`tracing`] module.

pub mod connector;
pub mod tracing;

pub use self::connector::*;
pub use self::tracing::*;
