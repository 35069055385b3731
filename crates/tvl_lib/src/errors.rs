use thiserror::Error;

/// A parsed token account that cannot be turned into a [`TokenBalance`](crate::types::TokenBalance).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BalanceParseError {
    #[error("account data is not jsonParsed")]
    UnexpectedEncoding,

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid mint: {0}")]
    InvalidMint(String),

    #[error("invalid token amount: {0}")]
    InvalidAmount(String),

    #[error("invalid decimals: {0}")]
    InvalidDecimals(String),
}

/// A balance whose value cannot be represented exactly.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValuationError {
    #[error("raw amount {0} exceeds decimal range")]
    AmountOutOfRange(u128),

    #[error("decimals {0} exceed decimal scale")]
    DecimalsOutOfRange(u8),

    #[error("value overflow")]
    Overflow,
}

/// Failures talking to the price index. Never escapes the resolver.
#[derive(Error, Debug)]
pub enum PriceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}
