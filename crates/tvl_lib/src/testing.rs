//! In-memory chain and price index for tests.

use anyhow::{Result, bail};
use async_trait::async_trait;
use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;
use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use crate::{
    client::{governance::BalanceSource, price::PriceSource},
    types::{NativeBalance, PriceLookup, TokenBalance},
};

#[derive(Default)]
pub struct FakeChain {
    programs: HashMap<Pubkey, Vec<Pubkey>>,
    tokens: HashMap<Pubkey, Vec<TokenBalance>>,
    lamports: HashMap<Pubkey, u64>,
    failing: HashSet<Pubkey>,
}

impl FakeChain {
    /// Register a governance account under `program_id`.
    pub fn with_account(
        mut self,
        program_id: Pubkey,
        account: Pubkey,
        tokens: Vec<TokenBalance>,
        lamports: u64,
    ) -> Self {
        self.programs.entry(program_id).or_default().push(account);
        self.tokens.insert(account, tokens);
        self.lamports.insert(account, lamports);
        self
    }

    /// Register a program that owns no governance accounts.
    pub fn with_program(mut self, program_id: Pubkey) -> Self {
        self.programs.entry(program_id).or_default();
        self
    }

    /// Make every query touching `key` (a program or an account) fail.
    pub fn failing(mut self, key: Pubkey) -> Self {
        self.failing.insert(key);
        self
    }

    fn check(&self, key: &Pubkey) -> Result<()> {
        if self.failing.contains(key) {
            bail!("rpc request for {} timed out", key);
        }
        Ok(())
    }
}

#[async_trait]
impl BalanceSource for FakeChain {
    async fn governance_accounts(
        &self,
        program_id: &Pubkey,
        _account_size: u64,
    ) -> Result<Vec<Pubkey>> {
        self.check(program_id)?;
        Ok(self.programs.get(program_id).cloned().unwrap_or_default())
    }

    async fn token_balances(
        &self,
        owner: &Pubkey,
        _token_program_id: &Pubkey,
    ) -> Result<Vec<TokenBalance>> {
        self.check(owner)?;
        Ok(self.tokens.get(owner).cloned().unwrap_or_default())
    }

    async fn native_balance(&self, account: &Pubkey) -> Result<NativeBalance> {
        self.check(account)?;
        Ok(NativeBalance::new(
            self.lamports.get(account).copied().unwrap_or_default(),
        ))
    }
}

/// Price index answering from a fixed table; records every lookup.
#[derive(Default)]
pub struct FakePrices {
    prices: HashMap<Pubkey, Decimal>,
    lookups: Mutex<Vec<Pubkey>>,
}

impl FakePrices {
    pub fn with_price(mut self, mint: Pubkey, price: Decimal) -> Self {
        self.prices.insert(mint, price);
        self
    }

    pub fn lookups(&self) -> Vec<Pubkey> {
        self.lookups.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PriceSource for FakePrices {
    async fn lookup(&self, mint: &Pubkey) -> PriceLookup {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push(*mint);
        }
        match self.prices.get(mint) {
            Some(price) => PriceLookup::Found(*price),
            None => PriceLookup::NotFound,
        }
    }
}
