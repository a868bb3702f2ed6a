use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, info_span, Instrument};

use crate::detector::CartSource;
use crate::model::Trigger;
use crate::notifier::Notifier;
use crate::poller::{PollOutcome, PollSettings, PollingDriver, Scheduler, TokioScheduler};
use crate::settings::ConnectorConfig;

/// The entry point page lifecycle events call into.
///
/// `WakeOrderConnector` is responsible for:
/// - **Wiring**: holding the cart source, notifier and scheduler shared by every loop
/// - **Fan-out**: starting one independent [`PollingDriver`] per trigger
/// - **Settling**: letting the caller wait for the loops it started
///
/// # Double delivery
///
/// Loops started by different triggers never coordinate. If the cart is ready
/// when both DOM-ready and window-load fire, the backend receives the same
/// pairing twice. Deduplication belongs on the server.
///
/// # Example
///
/// ```ignore
/// let connector = WakeOrderConnector::new(config, Arc::new(cart), Arc::new(notifier));
///
/// let page = connector.page_load();
/// for (trigger, outcome) in page.settle().await? {
///     info!(%trigger, attempts = outcome.attempts(), "Loop finished");
/// }
/// ```
#[derive(Clone)]
pub struct WakeOrderConnector {
    settings: PollSettings,
    source: Arc<dyn CartSource>,
    notifier: Arc<dyn Notifier>,
    scheduler: Arc<dyn Scheduler>,
}

impl WakeOrderConnector {
    pub fn new(
        config: ConnectorConfig,
        source: Arc<dyn CartSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            settings: PollSettings::from(&config),
            source,
            notifier,
            scheduler: Arc::new(TokioScheduler),
        }
    }

    /// Replaces the timer used between checks.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    fn driver(&self) -> PollingDriver {
        PollingDriver::new(
            self.settings,
            Arc::clone(&self.source),
            Arc::clone(&self.notifier),
            Arc::clone(&self.scheduler),
        )
    }

    /// Handles one trigger by spawning a fresh polling loop.
    ///
    /// Returns immediately; the loop runs on its own task.
    pub fn on_trigger(&self, trigger: Trigger) -> JoinHandle<PollOutcome> {
        info!(%trigger, "{}", trigger.announcement());
        let driver = self.driver();
        let span = info_span!("poll", %trigger);
        tokio::spawn(driver.run().instrument(span))
    }

    /// Fires DOM-ready and then window-load, as a full page load would.
    pub fn page_load(&self) -> PageLoad {
        let handles = [Trigger::DomReady, Trigger::WindowLoad]
            .into_iter()
            .map(|trigger| (trigger, self.on_trigger(trigger)))
            .collect();
        PageLoad { handles }
    }
}

/// The loops started by one page load.
pub struct PageLoad {
    handles: Vec<(Trigger, JoinHandle<PollOutcome>)>,
}

impl PageLoad {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Waits for every loop to reach `Dispatched` or `Abandoned`.
    ///
    /// Deliveries may still be in flight afterwards. Returns an error only if
    /// a loop task panicked.
    pub async fn settle(self) -> Result<Vec<(Trigger, PollOutcome)>, String> {
        let mut outcomes = Vec::with_capacity(self.handles.len());
        for (trigger, handle) in self.handles {
            match handle.await {
                Ok(outcome) => outcomes.push((trigger, outcome)),
                Err(e) => {
                    error!(%trigger, "Polling loop failed: {:?}", e);
                    return Err(format!("Polling loop for {} failed: {:?}", trigger, e));
                }
            }
        }
        Ok(outcomes)
    }
}
