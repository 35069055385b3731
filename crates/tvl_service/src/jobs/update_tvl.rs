use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;
use tvl_lib::types::TvlRecord;

use crate::App;

#[derive(Debug, PartialEq, Eq)]
pub enum PassOutcome {
    Recorded(TvlRecord),
    /// Another pass was already running.
    Skipped,
}

/// Compute TVL and append it to the store.
///
/// At most one pass runs at a time; a call made while another is in flight
/// returns [`PassOutcome::Skipped`]. Nothing is written unless the whole
/// computation succeeds, so dropping the future mid-pass leaves the store as it was.
pub async fn run_one(app: &App) -> Result<PassOutcome> {
    let Ok(_guard) = app.pass_lock.try_lock() else {
        info!("previous tvl pass still running, skipping");
        return Ok(PassOutcome::Skipped);
    };

    info!("calculating tvl");
    let breakdown = app.aggregator().compute().await?;

    let store = app.store().clone();
    let total = breakdown.total;
    let record = tokio::task::spawn_blocking(move || store.record(total, Utc::now()))
        .await
        .context("tvl insert task failed")??;

    info!(id = record.id, value = %record.value, "tvl updated in database");
    Ok(PassOutcome::Recorded(record))
}
