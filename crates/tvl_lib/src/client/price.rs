//! Jupiter price index client.
//!
//! `GET {base_url}?ids={mint}` answers with
//! `{"data": {"<mint>": {"id": "<mint>", "price": 1.0, ...}}}`. Missing entries
//! mean the index has no price for that mint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use solana_sdk::pubkey::Pubkey;
use std::{str::FromStr, time::Duration};
use tracing::{debug, warn};

use crate::{errors::PriceError, types::PriceLookup};

/// Tolerant price lookup in the reference currency (USD).
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Never fails: transport and decoding problems come back as `NotFound`.
    async fn lookup(&self, mint: &Pubkey) -> PriceLookup;
}

pub struct JupiterPriceClient {
    client: Client,
    base_url: String,
}

impl JupiterPriceClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .context("Failed to build price index HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    async fn fetch(&self, mint: &Pubkey) -> Result<PriceLookup, PriceError> {
        let id = mint.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("ids", id.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PriceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_price_response(&body, &id)
    }
}

#[async_trait]
impl PriceSource for JupiterPriceClient {
    async fn lookup(&self, mint: &Pubkey) -> PriceLookup {
        match self.fetch(mint).await {
            Ok(lookup) => {
                debug!(mint = %mint, ?lookup, "price lookup");
                lookup
            }
            Err(err) => {
                warn!(mint = %mint, error = %err, "price lookup failed, valuing at zero");
                PriceLookup::NotFound
            }
        }
    }
}

/// Decode a price index response body for asset `id`.
pub fn parse_price_response(body: &str, id: &str) -> Result<PriceLookup, PriceError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| PriceError::Malformed(e.to_string()))?;

    let data = value
        .get("data")
        .and_then(Value::as_object)
        .ok_or_else(|| PriceError::Malformed("missing data object".to_string()))?;

    let price = match data.get(id).and_then(|entry| entry.get("price")) {
        None | Some(Value::Null) => return Ok(PriceLookup::NotFound),
        Some(Value::Number(n)) => parse_decimal(&n.to_string())?,
        Some(Value::String(s)) => parse_decimal(s)?,
        Some(other) => return Err(PriceError::Malformed(format!("price is {other}"))),
    };

    if price.is_sign_negative() {
        return Err(PriceError::Malformed(format!("negative price {price}")));
    }

    Ok(PriceLookup::Found(price))
}

fn parse_decimal(s: &str) -> Result<Decimal, PriceError> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| PriceError::Malformed(format!("unparsable price {s}")))
}
