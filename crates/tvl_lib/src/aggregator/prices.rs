use solana_sdk::pubkey::Pubkey;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

use crate::{
    client::price::PriceSource,
    types::{PriceLookup, ProgramHoldings},
};

/// Prices resolved for one pass, keyed by mint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PriceBook {
    prices: BTreeMap<Pubkey, PriceLookup>,
}

impl PriceBook {
    /// Mints never looked up are unknown.
    pub fn get(&self, mint: &Pubkey) -> PriceLookup {
        self.prices
            .get(mint)
            .copied()
            .unwrap_or(PriceLookup::NotFound)
    }

    pub fn insert(&mut self, mint: Pubkey, lookup: PriceLookup) {
        self.prices.insert(mint, lookup);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn unpriced(&self) -> Vec<Pubkey> {
        self.prices
            .iter()
            .filter(|(_, lookup)| !lookup.is_found())
            .map(|(mint, _)| *mint)
            .collect()
    }
}

impl FromIterator<(Pubkey, PriceLookup)> for PriceBook {
    fn from_iter<I: IntoIterator<Item = (Pubkey, PriceLookup)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

/// Distinct mints held across `holdings`, plus `native_mint` when any account exists.
pub fn held_assets(holdings: &[ProgramHoldings], native_mint: &Pubkey) -> BTreeSet<Pubkey> {
    let mut assets = BTreeSet::new();
    for account in holdings.iter().flat_map(|p| &p.accounts) {
        assets.insert(*native_mint);
        assets.extend(account.tokens.iter().map(|b| b.mint));
    }
    assets
}

/// Look up each held asset once, in mint order.
pub async fn resolve_prices(
    source: &dyn PriceSource,
    holdings: &[ProgramHoldings],
    native_mint: &Pubkey,
) -> PriceBook {
    let mut book = PriceBook::default();
    for mint in held_assets(holdings, native_mint) {
        let lookup = source.lookup(&mint).await;
        book.insert(mint, lookup);
    }

    info!(
        assets = book.len(),
        unpriced = book.unpriced().len(),
        "resolved prices"
    );
    book
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePrices;
    use crate::types::{AccountHoldings, NativeBalance, TokenBalance};
    use rust_decimal_macros::dec;

    fn holding(mints: &[Pubkey]) -> AccountHoldings {
        AccountHoldings {
            account: Pubkey::new_unique(),
            tokens: mints
                .iter()
                .map(|mint| TokenBalance {
                    mint: *mint,
                    raw_amount: 1,
                    decimals: 0,
                })
                .collect(),
            native: NativeBalance::default(),
        }
    }

    #[test]
    fn native_mint_only_counted_with_accounts() {
        let sol = Pubkey::new_unique();
        let empty = vec![ProgramHoldings {
            program_id: Pubkey::new_unique(),
            accounts: vec![],
            skipped_accounts: vec![],
            skipped: false,
        }];
        assert!(held_assets(&empty, &sol).is_empty());

        let one = vec![ProgramHoldings {
            program_id: Pubkey::new_unique(),
            accounts: vec![holding(&[])],
            skipped_accounts: vec![],
            skipped: false,
        }];
        assert_eq!(held_assets(&one, &sol).into_iter().collect::<Vec<_>>(), vec![sol]);
    }

    #[tokio::test]
    async fn repeated_assets_are_looked_up_once() {
        let sol = Pubkey::new_unique();
        let usdc = Pubkey::new_unique();
        let prices = FakePrices::default()
            .with_price(sol, dec!(150))
            .with_price(usdc, dec!(1));
        let holdings = vec![ProgramHoldings {
            program_id: Pubkey::new_unique(),
            accounts: vec![holding(&[usdc]), holding(&[usdc, usdc]), holding(&[])],
            skipped_accounts: vec![],
            skipped: false,
        }];

        let book = resolve_prices(&prices, &holdings, &sol).await;

        assert_eq!(book.get(&sol), PriceLookup::Found(dec!(150)));
        assert_eq!(book.get(&usdc), PriceLookup::Found(dec!(1)));
        assert_eq!(prices.lookups().len(), 2);
    }

    #[test]
    fn unknown_mints_are_not_found() {
        let book = PriceBook::default();
        assert_eq!(book.get(&Pubkey::new_unique()), PriceLookup::NotFound);
    }
}
