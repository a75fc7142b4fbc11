//! Periodic eviction of expired and exhausted links.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::application::services::LifecycleService;
use crate::domain::repositories::LinkRepository;

/// Runs [`LifecycleService::sweep_all`] every `period`, forever.
///
/// The first sweep happens one full period after start. Failures are logged
/// and the loop continues.
pub async fn run_sweeper<L>(lifecycle: Arc<LifecycleService<L>>, period: Duration)
where
    L: LinkRepository + 'static,
{
    info!(interval_secs = period.as_secs(), "Link sweeper started");

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    loop {
        ticker.tick().await;

        if let Err(e) = lifecycle.sweep_all().await {
            error!(error = %e, "Sweep failed");
        }
    }
}
