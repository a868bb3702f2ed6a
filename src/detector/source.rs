//! Read-only accessors for the host cart state.

use std::path::PathBuf;

use serde_json::Value;
use tokio::sync::watch;

use crate::detector::SnapshotError;
use crate::model::CartSnapshot;

/// Injected accessor for the host page's cart state.
///
/// Implementations only read. Whoever owns the host state is responsible for
/// populating it; the poller calls [`CartSource::read`] once per attempt.
pub trait CartSource: Send + Sync {
    fn read(&self) -> Result<CartSnapshot, SnapshotError>;
}

/// A cart that never changes.
#[derive(Debug, Clone, Default)]
pub struct StaticCart {
    snapshot: CartSnapshot,
}

impl StaticCart {
    pub fn new(value: Value) -> Self {
        Self {
            snapshot: CartSnapshot::new(value),
        }
    }
}

impl CartSource for StaticCart {
    fn read(&self) -> Result<CartSnapshot, SnapshotError> {
        Ok(self.snapshot.clone())
    }
}

/// Writer half of a [`WatchedCart`], held by the host runtime.
///
/// Readers keep seeing the last published state after it is dropped.
#[derive(Debug)]
pub struct CartHandle {
    sender: watch::Sender<Value>,
}

impl CartHandle {
    /// Replaces the published cart state.
    pub fn publish(&self, value: Value) {
        self.sender.send_replace(value);
    }
}

/// A cart whose state is published by the host over a watch channel.
#[derive(Debug, Clone)]
pub struct WatchedCart {
    receiver: watch::Receiver<Value>,
}

impl WatchedCart {
    /// Creates an unpopulated cart and the handle the host uses to fill it.
    pub fn new() -> (Self, CartHandle) {
        let (sender, receiver) = watch::channel(Value::Null);
        (Self { receiver }, CartHandle { sender })
    }
}

impl CartSource for WatchedCart {
    fn read(&self) -> Result<CartSnapshot, SnapshotError> {
        Ok(CartSnapshot::new(self.receiver.borrow().clone()))
    }
}

/// A cart dumped to a JSON file by the host, re-read on every check.
///
/// A missing file reads as an empty page rather than an error, since the host
/// may simply not have written it yet.
#[derive(Debug, Clone)]
pub struct FileCart {
    path: PathBuf,
}

impl FileCart {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartSource for FileCart {
    // Blocking read on the polling task; cart dumps are a few hundred bytes.
    fn read(&self) -> Result<CartSnapshot, SnapshotError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(CartSnapshot::empty()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(CartSnapshot::empty());
        }
        let value: Value = serde_json::from_str(&raw)?;
        Ok(CartSnapshot::new(value))
    }
}
