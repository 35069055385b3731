use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use solana_account_decoder::{UiAccountData, UiAccountEncoding, UiDataSliceConfig};
use solana_client::{
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::RpcFilterType,
    rpc_request::TokenAccountsFilter,
};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use tracing::warn;

use crate::{
    client::rpc::Rpc,
    errors::BalanceParseError,
    types::{NativeBalance, TokenBalance},
};

/// Read side of the chain needed to enumerate governance holdings.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Accounts owned by `program_id` whose data is exactly `account_size` bytes.
    async fn governance_accounts(
        &self,
        program_id: &Pubkey,
        account_size: u64,
    ) -> Result<Vec<Pubkey>>;

    /// Token accounts owned by `owner` under `token_program_id`.
    async fn token_balances(
        &self,
        owner: &Pubkey,
        token_program_id: &Pubkey,
    ) -> Result<Vec<TokenBalance>>;

    async fn native_balance(&self, account: &Pubkey) -> Result<NativeBalance>;
}

#[async_trait]
impl BalanceSource for Rpc {
    async fn governance_accounts(
        &self,
        program_id: &Pubkey,
        account_size: u64,
    ) -> Result<Vec<Pubkey>> {
        let config = governance_accounts_config(account_size, *self.commitment_cfg());

        let accounts = self
            .client()
            .get_program_accounts_with_config(program_id, config)
            .await
            .with_context(|| format!("Failed to get governance accounts for {}", program_id))?;

        Ok(accounts.into_iter().map(|(pubkey, _)| pubkey).collect())
    }

    async fn token_balances(
        &self,
        owner: &Pubkey,
        token_program_id: &Pubkey,
    ) -> Result<Vec<TokenBalance>> {
        let accounts = self
            .client()
            .get_token_accounts_by_owner(owner, TokenAccountsFilter::ProgramId(*token_program_id))
            .await
            .with_context(|| format!("Failed to get token accounts owned by {}", owner))?;

        let mut out = Vec::with_capacity(accounts.len());
        for keyed in accounts {
            match parse_token_balance(&keyed.account.data) {
                Ok(balance) => out.push(balance),
                Err(err) => {
                    warn!(
                        owner = %owner,
                        token_account = %keyed.pubkey,
                        error = %err,
                        "skipping malformed token account"
                    );
                }
            }
        }

        Ok(out)
    }

    async fn native_balance(&self, account: &Pubkey) -> Result<NativeBalance> {
        let lamports = self
            .client()
            .get_balance(account)
            .await
            .with_context(|| format!("Failed to get balance of {}", account))?;

        Ok(NativeBalance::new(lamports))
    }
}

/// `getProgramAccounts` config selecting accounts of exactly `account_size` bytes.
///
/// Only the keys are used, so no account data is requested.
pub fn governance_accounts_config(
    account_size: u64,
    commitment: CommitmentConfig,
) -> RpcProgramAccountsConfig {
    RpcProgramAccountsConfig {
        filters: Some(vec![RpcFilterType::DataSize(account_size)]),
        account_config: RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            data_slice: Some(UiDataSliceConfig {
                offset: 0,
                length: 0,
            }),
            commitment: Some(commitment),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Extract a balance from `getTokenAccountsByOwner` account data.
pub fn parse_token_balance(data: &UiAccountData) -> Result<TokenBalance, BalanceParseError> {
    match data {
        UiAccountData::Json(parsed) => parse_token_account_info(&parsed.parsed),
        _ => Err(BalanceParseError::UnexpectedEncoding),
    }
}

/// Parse the `{"info": {"mint", "tokenAmount": {"amount", "decimals"}}}` payload
/// of an SPL token account.
pub fn parse_token_account_info(parsed: &Value) -> Result<TokenBalance, BalanceParseError> {
    let info = parsed
        .get("info")
        .ok_or(BalanceParseError::MissingField("info"))?;

    let mint = info
        .get("mint")
        .and_then(Value::as_str)
        .ok_or(BalanceParseError::MissingField("mint"))?;
    let mint =
        Pubkey::from_str(mint).map_err(|_| BalanceParseError::InvalidMint(mint.to_string()))?;

    let token_amount = info
        .get("tokenAmount")
        .ok_or(BalanceParseError::MissingField("tokenAmount"))?;

    let raw_amount = match token_amount.get("amount") {
        Some(Value::String(s)) => s
            .parse::<u128>()
            .map_err(|_| BalanceParseError::InvalidAmount(s.clone()))?,
        Some(other) => return Err(BalanceParseError::InvalidAmount(other.to_string())),
        None => return Err(BalanceParseError::MissingField("amount")),
    };

    let decimals = match token_amount.get("decimals") {
        Some(v) => v
            .as_u64()
            .and_then(|d| u8::try_from(d).ok())
            .ok_or_else(|| BalanceParseError::InvalidDecimals(v.to_string()))?,
        None => return Err(BalanceParseError::MissingField("decimals")),
    };

    Ok(TokenBalance {
        mint,
        raw_amount,
        decimals,
    })
}
