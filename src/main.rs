//! Command-line runner: watches a cart JSON file the way the storefront
//! script watches the live page, firing both lifecycle triggers.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use wake_order::detector::FileCart;
use wake_order::lifecycle::{setup_tracing, WakeOrderConnector};
use wake_order::notifier::{DeliveryReport, HttpNotifier};
use wake_order::poller::PollOutcome;
use wake_order::settings::ConnectorConfig;

#[derive(Debug, Parser)]
#[command(name = "wake-order", version, about = "Report a cart's connector token and order id")]
struct Cli {
    /// JSON file holding the host cart state; re-read on every check.
    cart: PathBuf,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = Cli::parse();

    let config = ConnectorConfig::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    setup_tracing(config.debug);

    let notifier = HttpNotifier::new(&config).map_err(|e| e.to_string())?;
    info!(endpoint = %notifier.endpoint(), cart = %cli.cart.display(), "Starting");

    let connector = WakeOrderConnector::new(
        config,
        Arc::new(FileCart::new(cli.cart)),
        Arc::new(notifier),
    );

    for (trigger, outcome) in connector.page_load().settle().await? {
        match outcome {
            PollOutcome::Dispatched { attempts, delivery } => match delivery.report().await {
                DeliveryReport::Delivered(_) => info!(%trigger, attempts, "Order update delivered"),
                DeliveryReport::Failed(e) => error!(%trigger, attempts, error = %e, "Order update not delivered"),
            },
            PollOutcome::Abandoned { attempts } => {
                warn!(%trigger, attempts, "Cart never became ready")
            }
        }
    }

    Ok(())
}
