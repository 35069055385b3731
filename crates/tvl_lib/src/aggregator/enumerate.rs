use anyhow::Result;
use solana_sdk::pubkey::Pubkey;
use tracing::{info, warn};

use crate::{
    aggregator::AggregatorConfig,
    client::governance::BalanceSource,
    types::{AccountHoldings, EnumerationFailurePolicy, ProgramHoldings},
};

/// Enumerate the governance accounts of each program, in order, with their balances.
pub async fn collect_holdings(
    source: &dyn BalanceSource,
    config: &AggregatorConfig,
    program_ids: &[Pubkey],
) -> Result<Vec<ProgramHoldings>> {
    let mut out = Vec::with_capacity(program_ids.len());

    for program_id in program_ids {
        info!(program_id = %program_id, "fetching governance accounts");

        let accounts = match source
            .governance_accounts(program_id, config.governance_account_size)
            .await
        {
            Ok(accounts) => accounts,
            Err(err) => match config.failure_policy {
                EnumerationFailurePolicy::Abort => return Err(err),
                EnumerationFailurePolicy::Skip => {
                    warn!(
                        program_id = %program_id,
                        error = %format!("{err:#}"),
                        "skipping program"
                    );
                    out.push(ProgramHoldings::skipped(*program_id));
                    continue;
                }
            },
        };

        info!(program_id = %program_id, accounts = accounts.len(), "found governance accounts");

        let mut holdings = Vec::with_capacity(accounts.len());
        let mut skipped_accounts = Vec::new();
        for account in accounts {
            match collect_account(source, config, account).await {
                Ok(h) => holdings.push(h),
                Err(err) => match config.failure_policy {
                    EnumerationFailurePolicy::Abort => return Err(err),
                    EnumerationFailurePolicy::Skip => {
                        warn!(
                            program_id = %program_id,
                            account = %account,
                            error = %format!("{err:#}"),
                            "skipping governance account"
                        );
                        skipped_accounts.push(account);
                    }
                },
            }
        }

        out.push(ProgramHoldings {
            program_id: *program_id,
            accounts: holdings,
            skipped_accounts,
            skipped: false,
        });
    }

    Ok(out)
}

async fn collect_account(
    source: &dyn BalanceSource,
    config: &AggregatorConfig,
    account: Pubkey,
) -> Result<AccountHoldings> {
    let tokens = source
        .token_balances(&account, &config.token_program_id)
        .await?;
    let native = source.native_balance(&account).await?;

    Ok(AccountHoldings {
        account,
        tokens,
        native,
    })
}
