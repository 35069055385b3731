use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tokio::sync::Notify;
use tvl_lib::{
    aggregator::{Aggregator, AggregatorConfig},
    client::BalanceSource,
    storage::TvlStore,
    testing::{FakeChain, FakePrices},
    types::{EnumerationFailurePolicy, NativeBalance, TokenBalance},
};

use crate::App;

pub fn app_with(chain: FakeChain, prices: FakePrices, program_ids: Vec<Pubkey>) -> App {
    app_with_policy(chain, prices, program_ids, EnumerationFailurePolicy::Skip)
}

pub fn app_with_policy(
    chain: FakeChain,
    prices: FakePrices,
    program_ids: Vec<Pubkey>,
    failure_policy: EnumerationFailurePolicy,
) -> App {
    let config = AggregatorConfig {
        program_ids,
        failure_policy,
        ..Default::default()
    };
    let aggregator = Aggregator::new(config, Arc::new(chain), Arc::new(prices));
    App::new(aggregator, TvlStore::open_in_memory().unwrap())
}

pub fn app_with_source(source: Arc<dyn BalanceSource>, program_ids: Vec<Pubkey>) -> App {
    let config = AggregatorConfig {
        program_ids,
        ..Default::default()
    };
    let aggregator = Aggregator::new(config, source, Arc::new(FakePrices::default()));
    App::new(aggregator, TvlStore::open_in_memory().unwrap())
}

/// Chain whose program enumeration blocks until released.
#[derive(Default)]
pub struct GatedChain {
    entered: Notify,
    gate: Notify,
}

impl GatedChain {
    /// Wait until a pass is blocked inside enumeration.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let one blocked (or the next) enumeration through.
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl BalanceSource for GatedChain {
    async fn governance_accounts(
        &self,
        _program_id: &Pubkey,
        _account_size: u64,
    ) -> Result<Vec<Pubkey>> {
        self.entered.notify_one();
        self.gate.notified().await;
        Ok(Vec::new())
    }

    async fn token_balances(
        &self,
        _owner: &Pubkey,
        _token_program_id: &Pubkey,
    ) -> Result<Vec<TokenBalance>> {
        Ok(Vec::new())
    }

    async fn native_balance(&self, _account: &Pubkey) -> Result<NativeBalance> {
        Ok(NativeBalance::default())
    }
}
