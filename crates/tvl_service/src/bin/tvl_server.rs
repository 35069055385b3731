use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tvl_service::{App, api, config, jobs, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = config::load()?;
    tvl_service::logging::init_tracing(&cfg);

    let app = Arc::new(App::init_from(&cfg)?);
    let shutdown_rx = shutdown::spawn_listener();

    let scheduler = tokio::spawn(jobs::scheduler::run(
        app.clone(),
        Duration::from_secs(cfg.tvl_update_period_in_secs),
        shutdown_rx.clone(),
    ));

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .context("invalid HOST/PORT")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "tvl api listening");

    let mut server_shutdown = shutdown_rx.clone();
    axum::serve(listener, api::router(app))
        .with_graceful_shutdown(async move { shutdown::requested(&mut server_shutdown).await })
        .await?;

    scheduler.await.context("scheduler task panicked")?;
    Ok(())
}
