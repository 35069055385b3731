use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{error, info, warn};

use crate::{
    App,
    jobs::update_tvl::{self, PassOutcome},
    shutdown,
};

/// Run a pass immediately and then every `period` until shutdown is requested.
///
/// Shutdown during a pass drops it; its partial results are never stored.
pub async fn run(app: Arc<App>, period: Duration, mut shutdown_rx: watch::Receiver<bool>) {
    let mut ticker = interval_at(Instant::now(), period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(period_secs = period.as_secs(), "tvl scheduler started");

    loop {
        tokio::select! {
            _ = shutdown::requested(&mut shutdown_rx) => break,
            _ = ticker.tick() => {}
        }

        tokio::select! {
            _ = shutdown::requested(&mut shutdown_rx) => {
                warn!("shutdown during tvl pass, discarding partial results");
                break;
            }
            res = update_tvl::run_one(&app) => match res {
                Ok(PassOutcome::Recorded(record)) => {
                    info!(id = record.id, value = %record.value, "scheduled tvl update finished");
                }
                Ok(PassOutcome::Skipped) => {}
                Err(e) => {
                    error!(error = %format!("{e:#}"), "scheduled tvl update failed");
                }
            }
        }
    }

    info!("tvl scheduler stopped");
}
