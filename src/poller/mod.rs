//! Bounded readiness polling.
//!
//! [`PollLoop`] is the pure state machine. [`PollingDriver`] runs it against a
//! [`CartSource`](crate::detector::CartSource), a [`Scheduler`] and a
//! [`Notifier`](crate::notifier::Notifier), and publishes every phase change
//! on a watch channel.

pub mod driver;
pub mod scheduler;
pub mod state;

pub use driver::*;
pub use scheduler::*;
pub use state::*;
