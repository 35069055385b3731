use anyhow::{Context, Result, anyhow};
use solana_commitment_config::CommitmentLevel;
use solana_sdk::pubkey::Pubkey;
use std::{env, str::FromStr};
use tvl_lib::{
    aggregator::AggregatorConfig,
    constants::{
        DEFAULT_GOVERNANCE_PROGRAM_IDS, DEFAULT_PRICE_API_URL, GOVERNANCE_ACCOUNT_SIZE,
        TOKEN_PROGRAM_ID, WRAPPED_SOL_MINT,
    },
    types::EnumerationFailurePolicy,
};

/// Roughly one month, the cadence the TVL has historically been refreshed at.
const DEFAULT_UPDATE_PERIOD_IN_SECS: u64 = 30 * 24 * 3600;

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub solana_rpc_url: String,
    pub commitment: CommitmentLevel,
    pub rpc_timeout_ms: u64,

    pub price_api_url: String,
    pub price_timeout_ms: u64,

    pub governance_program_ids: Vec<Pubkey>,
    pub token_program_id: Pubkey,
    pub wrapped_native_mint: Pubkey,
    pub governance_account_size: u64,
    pub enumeration_failure_policy: EnumerationFailurePolicy,

    pub tvl_update_period_in_secs: u64,
    pub database_path: String,

    pub host: String,
    pub port: u16,

    pub log_level: String,
    pub log_format: String,
    pub log_color: bool,
}

impl RuntimeConfig {
    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            program_ids: self.governance_program_ids.clone(),
            token_program_id: self.token_program_id,
            wrapped_native_mint: self.wrapped_native_mint,
            governance_account_size: self.governance_account_size,
            failure_policy: self.enumeration_failure_policy,
        }
    }
}

pub fn load() -> Result<RuntimeConfig> {
    let _ = dotenvy::dotenv();
    load_from(|key| env::var(key).ok())
}

/// Build the config from an arbitrary variable source.
pub fn load_from<F>(get: F) -> Result<RuntimeConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let solana_rpc_url = get("SOLANA_RPC_URL").context("SOLANA_RPC_URL must be set")?;
    let commitment = env_commitment(&get, "COMMITMENT", CommitmentLevel::Confirmed)?;
    let rpc_timeout_ms = env_parse(&get, "RPC_TIMEOUT_MS", 30_000)?;

    let price_api_url = env_str(&get, "PRICE_API_URL", DEFAULT_PRICE_API_URL);
    let price_timeout_ms = env_parse(&get, "PRICE_TIMEOUT_MS", 10_000)?;

    let governance_program_ids = env_pubkeys(
        &get,
        "GOVERNANCE_PROGRAM_IDS",
        &DEFAULT_GOVERNANCE_PROGRAM_IDS,
    )?;
    let token_program_id = env_parse(&get, "TOKEN_PROGRAM_ID", TOKEN_PROGRAM_ID)?;
    let wrapped_native_mint = env_parse(&get, "WRAPPED_NATIVE_MINT", WRAPPED_SOL_MINT)?;
    let governance_account_size =
        env_parse(&get, "GOVERNANCE_ACCOUNT_SIZE", GOVERNANCE_ACCOUNT_SIZE)?;
    let enumeration_failure_policy = env_parse(
        &get,
        "ENUMERATION_FAILURE_POLICY",
        EnumerationFailurePolicy::default(),
    )?;

    let tvl_update_period_in_secs = env_parse(
        &get,
        "TVL_UPDATE_PERIOD_IN_SECS",
        DEFAULT_UPDATE_PERIOD_IN_SECS,
    )?;
    if tvl_update_period_in_secs == 0 {
        return Err(anyhow!("TVL_UPDATE_PERIOD_IN_SECS must be greater than zero"));
    }
    let database_path = env_str(&get, "DATABASE_PATH", "data/tvl.sqlite");

    let host = env_str(&get, "HOST", "0.0.0.0");
    let port = env_parse(&get, "PORT", 3000u16)?;

    let log_level = env_str(&get, "LOG_LEVEL", "info");
    let log_format = env_str(&get, "LOG_FORMAT", "json");
    let log_color = env_parse(&get, "LOG_COLOR", false)?;

    Ok(RuntimeConfig {
        solana_rpc_url,
        commitment,
        rpc_timeout_ms,
        price_api_url,
        price_timeout_ms,
        governance_program_ids,
        token_program_id,
        wrapped_native_mint,
        governance_account_size,
        enumeration_failure_policy,
        tvl_update_period_in_secs,
        database_path,
        host,
        port,
        log_level,
        log_format,
        log_color,
    })
}

fn env_str<F: Fn(&str) -> Option<String>>(get: &F, key: &str, default: &str) -> String {
    get(key).unwrap_or_else(|| default.to_string())
}

fn env_parse<F, T>(get: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match get(key) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| anyhow!("{} has an invalid value: {}", key, v)),
        None => Ok(default),
    }
}

fn env_pubkeys<F: Fn(&str) -> Option<String>>(
    get: &F,
    key: &str,
    default: &[Pubkey],
) -> Result<Vec<Pubkey>> {
    let Some(v) = get(key) else {
        return Ok(default.to_vec());
    };

    v.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Pubkey::from_str(s).map_err(|_| anyhow!("{} has an invalid pubkey: {}", key, s)))
        .collect()
}

fn env_commitment<F: Fn(&str) -> Option<String>>(
    get: &F,
    key: &str,
    default: CommitmentLevel,
) -> Result<CommitmentLevel> {
    let Some(v) = get(key) else {
        return Ok(default);
    };

    match v.to_lowercase().as_str() {
        "finalized" => Ok(CommitmentLevel::Finalized),
        "confirmed" => Ok(CommitmentLevel::Confirmed),
        "processed" => Ok(CommitmentLevel::Processed),
        _ => Err(anyhow!("{} has an invalid value: {}", key, v)),
    }
}
