use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn, Instrument};

use crate::detector::{self, CartSource};
use crate::model::{CartSnapshot, NotificationRequest};
use crate::notifier::{DeliveryError, DeliveryReport, Notifier};
use crate::poller::{PollLoop, PollPhase, Scheduler, Step};
use crate::settings::ConnectorConfig;

/// Timing parameters for one loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl From<&ConnectorConfig> for PollSettings {
    fn from(config: &ConnectorConfig) -> Self {
        Self {
            interval: config.check_interval(),
            max_attempts: config.max_attempts,
        }
    }
}

/// A notification that was handed off and may still be in flight.
///
/// The loop that produced it has already finished. Awaiting the report is
/// only for whoever wants to observe the result.
pub struct Delivery {
    handle: JoinHandle<DeliveryReport>,
}

impl Delivery {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn report(self) -> DeliveryReport {
        match self.handle.await {
            Ok(report) => report,
            Err(e) => DeliveryReport::Failed(DeliveryError::Aborted(e.to_string())),
        }
    }
}

impl fmt::Debug for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delivery")
            .field("finished", &self.handle.is_finished())
            .finish()
    }
}

/// How a loop ended.
#[derive(Debug)]
pub enum PollOutcome {
    Dispatched { attempts: u32, delivery: Delivery },
    Abandoned { attempts: u32 },
}

impl PollOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            PollOutcome::Dispatched { attempts, .. } | PollOutcome::Abandoned { attempts } => *attempts,
        }
    }

    pub fn is_dispatched(&self) -> bool {
        matches!(self, PollOutcome::Dispatched { .. })
    }

    pub fn into_delivery(self) -> Option<Delivery> {
        match self {
            PollOutcome::Dispatched { delivery, .. } => Some(delivery),
            PollOutcome::Abandoned { .. } => None,
        }
    }
}

/// Runs one [`PollLoop`] to completion.
///
/// Each trigger gets its own driver. Drivers share the read-only cart source
/// and the notifier but no state: two drivers that both find the cart ready
/// both dispatch.
pub struct PollingDriver {
    settings: PollSettings,
    source: Arc<dyn CartSource>,
    notifier: Arc<dyn Notifier>,
    scheduler: Arc<dyn Scheduler>,
    machine: PollLoop,
    phase_tx: watch::Sender<PollPhase>,
}

impl PollingDriver {
    pub fn new(
        settings: PollSettings,
        source: Arc<dyn CartSource>,
        notifier: Arc<dyn Notifier>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        let machine = PollLoop::new(settings.max_attempts);
        let (phase_tx, _) = watch::channel(machine.phase());
        Self {
            settings,
            source,
            notifier,
            scheduler,
            machine,
            phase_tx,
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.machine.phase()
    }

    /// Follows this loop's phase changes.
    pub fn subscribe(&self) -> watch::Receiver<PollPhase> {
        self.phase_tx.subscribe()
    }

    fn publish(&self) {
        self.phase_tx.send_replace(self.machine.phase());
    }

    /// Checks, waits and re-checks until the cart is ready or the ceiling is hit.
    pub async fn run(mut self) -> PollOutcome {
        let max_attempts = self.machine.max_attempts();
        let mut ready: Option<CartSnapshot> = None;
        let mut step = self.machine.next_attempt();

        loop {
            self.publish();
            let attempt = self.machine.state().attempts_made;

            step = match step {
                Step::Check => {
                    debug!(attempt, max_attempts, "Checking cart");
                    ready = detector::check(self.source.as_ref());
                    self.machine.record_check(ready.is_some())
                }
                Step::Dispatch => {
                    // Only reached right after a check that yielded a snapshot.
                    let snapshot = ready.take().unwrap_or_default();
                    let request = detector::extract_identifiers(&snapshot);
                    info!(
                        attempt,
                        wake_cart_id = %request.connector_token(),
                        wake_order = %request.order_id(),
                        metadata = ?snapshot.metadata(),
                        "Cart ready"
                    );
                    let delivery = self.dispatch(request);

                    self.machine.mark_dispatched();
                    self.publish();
                    return PollOutcome::Dispatched {
                        attempts: attempt,
                        delivery,
                    };
                }
                Step::Wait => {
                    debug!(attempt, delay = ?self.settings.interval, "Cart not ready yet, retrying shortly");
                    self.machine.schedule();
                    self.publish();
                    self.scheduler.sleep(self.settings.interval).await;
                    self.machine.next_attempt()
                }
                Step::Abandon => {
                    debug!(attempts = attempt, max_attempts, "Maximum attempts exceeded, giving up");
                    return PollOutcome::Abandoned { attempts: attempt };
                }
            };
        }
    }

    /// Hands the request to the notifier without waiting for it.
    fn dispatch(&self, request: NotificationRequest) -> Delivery {
        let notifier = Arc::clone(&self.notifier);
        let handle = tokio::spawn(
            async move {
                debug!(?request, "Sending order update");
                let report = DeliveryReport::from(notifier.notify(request).await);
                match &report {
                    DeliveryReport::Delivered(body) => info!(response = %body, "Order updated"),
                    DeliveryReport::Failed(e) => warn!(error = %e, "Order update failed"),
                }
                report
            }
            .in_current_span(),
        );
        Delivery { handle }
    }
}
