//! TVL aggregation pipeline.
//!
//! A pass runs three stages with explicit data between them:
//! [`enumerate::collect_holdings`] reads governance accounts and balances from
//! the chain, [`prices::resolve_prices`] looks up each distinct asset once, and
//! [`valuation::sum_holdings`] values everything without further I/O.

pub mod enumerate;
pub mod prices;
pub mod valuation;

use anyhow::{Result, bail};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tracing::info;

use crate::{
    client::{governance::BalanceSource, price::PriceSource},
    constants::{
        DEFAULT_GOVERNANCE_PROGRAM_IDS, GOVERNANCE_ACCOUNT_SIZE, TOKEN_PROGRAM_ID,
        WRAPPED_SOL_MINT,
    },
    types::EnumerationFailurePolicy,
};

pub use prices::PriceBook;
pub use valuation::{ProgramValue, TvlBreakdown};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Governance programs, in the order they are enumerated.
    pub program_ids: Vec<Pubkey>,
    pub token_program_id: Pubkey,
    /// Mint whose price values native lamports.
    pub wrapped_native_mint: Pubkey,
    pub governance_account_size: u64,
    pub failure_policy: EnumerationFailurePolicy,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            program_ids: DEFAULT_GOVERNANCE_PROGRAM_IDS.to_vec(),
            token_program_id: TOKEN_PROGRAM_ID,
            wrapped_native_mint: WRAPPED_SOL_MINT,
            governance_account_size: GOVERNANCE_ACCOUNT_SIZE,
            failure_policy: EnumerationFailurePolicy::default(),
        }
    }
}

pub struct Aggregator {
    config: AggregatorConfig,
    balances: Arc<dyn BalanceSource>,
    prices: Arc<dyn PriceSource>,
}

impl Aggregator {
    pub fn new(
        config: AggregatorConfig,
        balances: Arc<dyn BalanceSource>,
        prices: Arc<dyn PriceSource>,
    ) -> Self {
        Self {
            config,
            balances,
            prices,
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Compute TVL over the configured program list.
    pub async fn compute(&self) -> Result<TvlBreakdown> {
        self.compute_total(&self.config.program_ids).await
    }

    /// Compute TVL over `program_ids`.
    ///
    /// Fails when enumeration fails under [`EnumerationFailurePolicy::Abort`], or when
    /// no program in a non-empty list could be enumerated at all.
    pub async fn compute_total(&self, program_ids: &[Pubkey]) -> Result<TvlBreakdown> {
        let holdings =
            enumerate::collect_holdings(self.balances.as_ref(), &self.config, program_ids).await?;

        if !holdings.is_empty() && holdings.iter().all(|h| h.skipped) {
            bail!(
                "enumeration failed for all {} governance programs",
                holdings.len()
            );
        }

        let prices = prices::resolve_prices(
            self.prices.as_ref(),
            &holdings,
            &self.config.wrapped_native_mint,
        )
        .await;

        let breakdown =
            valuation::sum_holdings(&holdings, &prices, &self.config.wrapped_native_mint);

        info!(
            total = %breakdown.total,
            programs = breakdown.programs.len(),
            skipped_programs = breakdown.skipped_programs.len(),
            skipped_accounts = breakdown.skipped_accounts.len(),
            unpriced_assets = breakdown.unpriced_assets.len(),
            "computed tvl"
        );

        Ok(breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeChain, FakePrices};
    use crate::types::TokenBalance;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn aggregator(
        chain: FakeChain,
        prices: FakePrices,
        policy: EnumerationFailurePolicy,
    ) -> Aggregator {
        let config = AggregatorConfig {
            program_ids: vec![],
            failure_policy: policy,
            ..Default::default()
        };
        Aggregator::new(config, Arc::new(chain), Arc::new(prices))
    }

    fn token(mint: Pubkey, raw_amount: u128, decimals: u8) -> TokenBalance {
        TokenBalance {
            mint,
            raw_amount,
            decimals,
        }
    }

    #[tokio::test]
    async fn two_account_scenario_totals_60_75() {
        let program = Pubkey::new_unique();
        let usdc = Pubkey::new_unique();
        let chain = FakeChain::default()
            .with_account(program, Pubkey::new_unique(), vec![token(usdc, 500_000, 6)], 0)
            .with_account(program, Pubkey::new_unique(), vec![], 3_000_000_000);
        let prices = FakePrices::default()
            .with_price(usdc, dec!(1.50))
            .with_price(WRAPPED_SOL_MINT, dec!(20.00));

        let agg = aggregator(chain, prices, EnumerationFailurePolicy::Skip);
        let breakdown = agg.compute_total(&[program]).await.unwrap();

        assert_eq!(breakdown.total, dec!(60.75));
    }

    #[tokio::test]
    async fn single_token_balance_is_exact() {
        let program = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let chain = FakeChain::default().with_account(
            program,
            Pubkey::new_unique(),
            vec![token(mint, 1_000_000, 6)],
            0,
        );
        let prices = FakePrices::default().with_price(mint, dec!(2.00));

        let agg = aggregator(chain, prices, EnumerationFailurePolicy::Skip);
        let breakdown = agg.compute_total(&[program]).await.unwrap();

        assert_eq!(breakdown.total, dec!(2.00));
    }

    #[tokio::test]
    async fn native_balance_alone_is_valued() {
        let program = Pubkey::new_unique();
        let chain =
            FakeChain::default().with_account(program, Pubkey::new_unique(), vec![], 2_000_000_000);
        let prices = FakePrices::default().with_price(WRAPPED_SOL_MINT, dec!(100.00));

        let agg = aggregator(chain, prices, EnumerationFailurePolicy::Skip);
        let breakdown = agg.compute_total(&[program]).await.unwrap();

        assert_eq!(breakdown.total, dec!(200.00));
    }

    #[tokio::test]
    async fn zero_amounts_contribute_nothing() {
        let program = Pubkey::new_unique();
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let chain = FakeChain::default().with_account(
            program,
            Pubkey::new_unique(),
            vec![token(a, 0, 6), token(b, 0, 9)],
            0,
        );
        let prices = FakePrices::default()
            .with_price(a, dec!(99999.99))
            .with_price(b, dec!(0.0001))
            .with_price(WRAPPED_SOL_MINT, dec!(150));

        let agg = aggregator(chain, prices, EnumerationFailurePolicy::Skip);
        let breakdown = agg.compute_total(&[program]).await.unwrap();

        assert_eq!(breakdown.total, Decimal::ZERO);
    }

    #[tokio::test]
    async fn unknown_price_does_not_abort() {
        let program = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let chain = FakeChain::default().with_account(
            program,
            Pubkey::new_unique(),
            vec![token(mint, 5_000_000, 6)],
            1_000_000_000,
        );
        let prices = FakePrices::default().with_price(WRAPPED_SOL_MINT, dec!(10));

        let agg = aggregator(chain, prices, EnumerationFailurePolicy::Skip);
        let breakdown = agg.compute_total(&[program]).await.unwrap();

        assert_eq!(breakdown.total, dec!(10));
        assert_eq!(breakdown.unpriced_assets, vec![mint]);
    }

    #[tokio::test]
    async fn empty_program_list_is_zero() {
        let agg = aggregator(
            FakeChain::default(),
            FakePrices::default(),
            EnumerationFailurePolicy::Abort,
        );
        let breakdown = agg.compute_total(&[]).await.unwrap();

        assert_eq!(breakdown.total, Decimal::ZERO);
        assert!(breakdown.programs.is_empty());
    }

    #[tokio::test]
    async fn program_without_accounts_is_zero() {
        let program = Pubkey::new_unique();
        let prices = FakePrices::default().with_price(WRAPPED_SOL_MINT, dec!(10));

        let agg = aggregator(
            FakeChain::default().with_program(program),
            prices,
            EnumerationFailurePolicy::Abort,
        );
        let breakdown = agg.compute_total(&[program]).await.unwrap();

        assert_eq!(breakdown.total, Decimal::ZERO);
        assert_eq!(breakdown.programs[0].accounts, 0);
    }

    #[tokio::test]
    async fn repeated_runs_are_identical() {
        let program = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let mut chain = FakeChain::default();
        for i in 0..50u128 {
            chain = chain.with_account(
                program,
                Pubkey::new_unique(),
                vec![token(mint, 333_333 + i, 6)],
                1_111_111_111,
            );
        }
        let prices = FakePrices::default()
            .with_price(mint, dec!(0.1))
            .with_price(WRAPPED_SOL_MINT, dec!(3.3));

        let agg = aggregator(chain, prices, EnumerationFailurePolicy::Skip);
        let first = agg.compute_total(&[program]).await.unwrap();
        let second = agg.compute_total(&[program]).await.unwrap();

        assert_eq!(first.total, second.total);
        assert_eq!(first.total.to_string(), second.total.to_string());
    }

    #[tokio::test]
    async fn native_price_is_looked_up_once_per_pass() {
        let program = Pubkey::new_unique();
        let chain = FakeChain::default()
            .with_account(program, Pubkey::new_unique(), vec![], 1)
            .with_account(program, Pubkey::new_unique(), vec![], 2)
            .with_account(program, Pubkey::new_unique(), vec![], 3);
        let prices = Arc::new(FakePrices::default().with_price(WRAPPED_SOL_MINT, dec!(1)));

        let agg = Aggregator::new(
            AggregatorConfig::default(),
            Arc::new(chain),
            prices.clone(),
        );
        agg.compute_total(&[program]).await.unwrap();

        assert_eq!(prices.lookups(), vec![WRAPPED_SOL_MINT]);
    }

    #[tokio::test]
    async fn skip_policy_isolates_failing_program() {
        let (bad, good) = (Pubkey::new_unique(), Pubkey::new_unique());
        let chain = FakeChain::default()
            .with_account(good, Pubkey::new_unique(), vec![], 1_000_000_000)
            .failing(bad);
        let prices = FakePrices::default().with_price(WRAPPED_SOL_MINT, dec!(25));

        let agg = aggregator(chain, prices, EnumerationFailurePolicy::Skip);
        let breakdown = agg.compute_total(&[bad, good]).await.unwrap();

        assert_eq!(breakdown.total, dec!(25));
        assert_eq!(breakdown.skipped_programs, vec![bad]);
    }

    #[tokio::test]
    async fn abort_policy_fails_the_pass() {
        let bad = Pubkey::new_unique();
        let agg = aggregator(
            FakeChain::default().failing(bad),
            FakePrices::default(),
            EnumerationFailurePolicy::Abort,
        );

        assert!(agg.compute_total(&[bad]).await.is_err());
    }

    #[tokio::test]
    async fn skip_policy_fails_when_every_program_fails() {
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let agg = aggregator(
            FakeChain::default().failing(a).failing(b),
            FakePrices::default(),
            EnumerationFailurePolicy::Skip,
        );

        assert!(agg.compute_total(&[a, b]).await.is_err());
    }

    #[tokio::test]
    async fn failed_accounts_are_reported_in_breakdown() {
        let program = Pubkey::new_unique();
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let chain = FakeChain::default()
            .with_account(program, a, vec![], 5_000_000_000)
            .with_account(program, b, vec![], 5_000_000_000)
            .failing(a)
            .failing(b);
        let prices = FakePrices::default().with_price(WRAPPED_SOL_MINT, dec!(10));

        let agg = aggregator(chain, prices, EnumerationFailurePolicy::Skip);
        let breakdown = agg.compute_total(&[program]).await.unwrap();

        assert_eq!(breakdown.total, Decimal::ZERO);
        assert_eq!(breakdown.skipped_accounts, vec![a, b]);
        assert!(breakdown.skipped_programs.is_empty());
    }

    #[tokio::test]
    async fn compute_uses_configured_programs() {
        let program = Pubkey::new_unique();
        let chain =
            FakeChain::default().with_account(program, Pubkey::new_unique(), vec![], 4_000_000_000);
        let prices = FakePrices::default().with_price(WRAPPED_SOL_MINT, dec!(0.5));
        let config = AggregatorConfig {
            program_ids: vec![program],
            ..Default::default()
        };

        let agg = Aggregator::new(config, Arc::new(chain), Arc::new(prices));

        assert_eq!(agg.compute().await.unwrap().total, dec!(2));
    }
}
