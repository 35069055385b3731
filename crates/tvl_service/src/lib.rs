use crate::config::RuntimeConfig;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tvl_lib::{
    aggregator::Aggregator,
    client::{JupiterPriceClient, Rpc},
    storage::TvlStore,
};

pub mod api;
pub mod config;
pub mod jobs;
pub mod logging;
pub mod shutdown;

pub struct App {
    aggregator: Aggregator,
    store: TvlStore,
    /// Held for the duration of an aggregation pass. Scoped to this process.
    pass_lock: Mutex<()>,
}

impl App {
    pub fn init_from(cfg: &RuntimeConfig) -> Result<Self> {
        let rpc = Rpc::new(&cfg.solana_rpc_url, cfg.rpc_timeout_ms, cfg.commitment);
        let prices = JupiterPriceClient::new(&cfg.price_api_url, cfg.price_timeout_ms)?;
        let store = TvlStore::open(&cfg.database_path)?;

        let aggregator = Aggregator::new(cfg.aggregator_config(), Arc::new(rpc), Arc::new(prices));

        Ok(Self::new(aggregator, store))
    }

    pub fn new(aggregator: Aggregator, store: TvlStore) -> Self {
        Self {
            aggregator,
            store,
            pass_lock: Mutex::new(()),
        }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn store(&self) -> &TvlStore {
        &self.store
    }
}
