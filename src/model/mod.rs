//! Plain data carried between the detector, the poller and the notifier.

pub mod request;
pub mod snapshot;
pub mod trigger;

pub use request::*;
pub use snapshot::*;
pub use trigger::*;
