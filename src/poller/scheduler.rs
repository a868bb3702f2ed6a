use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

/// Supplies the delay between two readiness checks.
///
/// The delay is a cooperative yield: other loops and deliveries keep running
/// while one loop waits.
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Real timers from the tokio runtime.
///
/// Also deterministic under a paused test clock (`start_paused = true`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// A virtual clock: records every requested delay and returns immediately.
#[derive(Debug, Clone, Default)]
pub struct RecordingScheduler {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }

    /// Total virtual time that has passed.
    pub fn elapsed(&self) -> Duration {
        self.delays.lock().unwrap().iter().sum()
    }
}

#[async_trait]
impl Scheduler for RecordingScheduler {
    async fn sleep(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
        tokio::task::yield_now().await;
    }
}
