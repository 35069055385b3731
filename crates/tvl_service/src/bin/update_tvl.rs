use anyhow::{Result, bail};
use tracing::info;
use tvl_service::{
    App, config,
    jobs::update_tvl::{self, PassOutcome},
    shutdown,
};

/// Run a single TVL pass and exit. Suited to an external cron.
///
/// The single-pass guard is per process, so do not run this against a database
/// that a running `tvl_server` is also scheduling passes into.
#[tokio::main]
async fn main() -> Result<()> {
    let cfg = config::load()?;
    tvl_service::logging::init_tracing(&cfg);

    let app = App::init_from(&cfg)?;

    tokio::select! {
        _ = shutdown::wait_for_signal() => bail!("interrupted, tvl pass discarded"),
        res = update_tvl::run_one(&app) => match res? {
            PassOutcome::Recorded(record) => {
                info!(id = record.id, value = %record.value, "tvl updated");
                println!("{}", record.value);
            }
            PassOutcome::Skipped => info!("tvl pass skipped"),
        },
    }

    Ok(())
}
